//! Container parsers for EXIF extraction.
//!
//! - [`jpeg`] walks JPEG marker segments to find the EXIF APP1 segment
//! - [`tiff`] parses the TIFF header and IFDs inside that segment

pub mod jpeg;
pub mod tiff;

pub use jpeg::{find_exif_segment, find_tiff_start, Segment};
