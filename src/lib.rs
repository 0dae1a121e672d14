//! # jpeg-exif
//!
//! A decoder for EXIF metadata embedded in JPEG files.
//!
//! The decoder works entirely on an in-memory buffer with no external parsing
//! library. It walks the JPEG marker segments, finds the APP1 segment holding
//! the EXIF payload, reads the TIFF header inside it, and resolves IFD0 plus
//! the EXIF and GPS sub-directories into one flat name → value map.
//!
//! ## Features
//!
//! - **Bounds-checked**: every offset read from the file is validated before
//!   use; malformed files produce errors or skipped tags, never panics
//! - **Both byte orders**: little-endian ("II") and big-endian ("MM") payloads
//! - **Per-tag recovery**: one bad entry never aborts the rest of the decode
//! - **Pure**: no I/O and no shared state, safe to call from many threads
//!
//! ## Architecture
//!
//! - [`io`] - Bounds-checked byte reader and byte order handling
//! - [`mod@format`] - JPEG marker scanning and TIFF/IFD parsing
//! - [`exif`] - The decode pipeline and the resulting [`MetadataMap`]
//! - [`report`] - Table and JSON rendering for the command-line tool
//! - [`config`] - CLI configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use jpeg_exif::{decode, DecodedValue};
//!
//! let data = std::fs::read("photo.jpg").unwrap();
//! match decode(&data) {
//!     Ok(metadata) if metadata.is_empty() => println!("no metadata found"),
//!     Ok(metadata) => {
//!         for (name, value) in metadata.iter() {
//!             match value {
//!                 DecodedValue::Text(text) => println!("{name}: {text}"),
//!                 DecodedValue::Number(number) => println!("{name}: {number}"),
//!             }
//!         }
//!     }
//!     Err(e) => println!("no metadata found ({e})"),
//! }
//! ```

pub mod config;
pub mod error;
pub mod exif;
pub mod format;
pub mod io;
pub mod report;

// Re-export commonly used types
pub use config::{Config, OutputFormat, DEFAULT_MAX_FILE_SIZE};
pub use error::{ExifError, IoError, ValueError};
pub use exif::{decode, MetadataMap};
pub use format::tiff::{
    parse_directory, DecodedValue, Directory, DirectoryEntry, FormatCode, Namespace,
    TagDictionary, TaggedValue, TiffHeader, ValueDecoder, EXIF_IFD_POINTER, GPS_INFO_IFD_POINTER,
    GPS_TAGS, MAIN_TAGS,
};
pub use format::{find_exif_segment, find_tiff_start, Segment};
pub use io::{ByteOrder, ByteReader};
pub use report::{render_json, render_table, FileOutcome, Outcome};
