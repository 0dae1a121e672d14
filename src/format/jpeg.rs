//! JPEG marker scanning.
//!
//! EXIF metadata lives in an APP1 application segment near the start of a
//! JPEG stream. This module walks the segment headers that follow the
//! Start-Of-Image marker until it finds that segment.
//!
//! # Segment Layout
//!
//! ```text
//! FF D8                          SOI (no length)
//! FF En  LL LL  payload...       APPn, LL LL = big-endian length incl. itself
//! FF E1  LL LL  "Exif" 00 00  TIFF header...
//! ```
//!
//! Scanning stops at the first marker that is not an application segment
//! (DQT, SOF, SOS, EOI, ...): by then the metadata segments are behind us.

use tracing::debug;

use crate::error::ExifError;
use crate::io::{ByteOrder, ByteReader};

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: u16 = 0xFFD8;

/// End Of Image marker
pub const EOI: u16 = 0xFFD9;

/// Application segment 0 (JFIF) marker
pub const APP0: u16 = 0xFFE0;

/// Application segment 1 (EXIF, XMP) marker
pub const APP1: u16 = 0xFFE1;

/// Application segment 15, last of the APPn range
pub const APP15: u16 = 0xFFEF;

/// Literal that opens an EXIF APP1 payload.
pub const EXIF_SIGNATURE: [u8; 4] = *b"Exif";

/// "Exif" followed by two padding bytes; the TIFF header follows.
pub const EXIF_HEADER_LEN: usize = 6;

/// Size of a marker plus its length field.
const SEGMENT_HEADER_LEN: usize = 4;

// =============================================================================
// Segment
// =============================================================================

/// A JPEG marker segment header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Two-byte marker, e.g. `0xFFE1`
    pub marker: u16,

    /// Segment length as stored, including the two length bytes
    pub length: u16,

    /// Absolute offset of the first payload byte
    pub payload_offset: usize,
}

impl Segment {
    /// Absolute offset of the TIFF header inside an EXIF segment.
    #[inline]
    pub fn tiff_start(&self) -> usize {
        self.payload_offset + EXIF_HEADER_LEN
    }

    /// Absolute offset of the next marker.
    #[inline]
    fn next_offset(&self) -> usize {
        // length counts its own two bytes, which sit just before the payload
        self.payload_offset - 2 + self.length as usize
    }
}

/// Whether a marker is one of APP0..APP15.
#[inline]
pub const fn is_app_marker(marker: u16) -> bool {
    marker >= APP0 && marker <= APP15
}

// =============================================================================
// Marker Scanner
// =============================================================================

/// States of the marker scan.
///
/// Every `Scanning` step either moves strictly forward or leaves the
/// scanning state, so the scan always terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Expecting a marker at this offset
    Scanning(usize),
    /// Found the EXIF APP1 segment
    Found(Segment),
    /// Reached a non-APPn marker, a malformed segment, or the end of data
    NotFound,
}

/// Locate the APP1 segment carrying EXIF data.
///
/// # Errors
/// - `NotAJpeg` if the buffer does not start with `FF D8`
/// - `NoExifData` if no EXIF segment precedes the first non-APPn marker
pub fn find_exif_segment(reader: &ByteReader<'_>) -> Result<Segment, ExifError> {
    match reader.read_u16(0, ByteOrder::BigEndian) {
        Ok(SOI) => {}
        _ => return Err(ExifError::NotAJpeg),
    }

    let mut state = ScanState::Scanning(2);
    loop {
        state = match state {
            ScanState::Scanning(offset) => step(reader, offset),
            ScanState::Found(segment) => {
                debug!(
                    offset = segment.payload_offset,
                    length = segment.length,
                    "found EXIF APP1 segment"
                );
                return Ok(segment);
            }
            ScanState::NotFound => return Err(ExifError::NoExifData),
        };
    }
}

/// Locate the start of the TIFF header embedded in a JPEG's EXIF segment.
pub fn find_tiff_start(reader: &ByteReader<'_>) -> Result<usize, ExifError> {
    find_exif_segment(reader).map(|segment| segment.tiff_start())
}

/// Advance the scan by one segment.
fn step(reader: &ByteReader<'_>, offset: usize) -> ScanState {
    let Some(segment) = read_segment(reader, offset) else {
        debug!(offset, "ran out of segments while scanning for EXIF");
        return ScanState::NotFound;
    };

    if !is_app_marker(segment.marker) {
        debug!(offset, marker = segment.marker, "reached non-APPn marker");
        return ScanState::NotFound;
    }

    if segment.marker == APP1 && has_exif_signature(reader, &segment) {
        return ScanState::Found(segment);
    }

    // A length below 2 cannot even cover its own field
    if segment.length < 2 {
        debug!(offset, length = segment.length, "malformed segment length");
        return ScanState::NotFound;
    }

    debug!(
        offset,
        marker = segment.marker,
        length = segment.length,
        "skipping segment"
    );
    ScanState::Scanning(segment.next_offset())
}

/// Read the marker at `offset` and, for segments that carry one, its length.
fn read_segment(reader: &ByteReader<'_>, offset: usize) -> Option<Segment> {
    let marker = reader.read_u16(offset, ByteOrder::BigEndian).ok()?;

    // Non-APPn markers end the scan; their length is irrelevant
    if !is_app_marker(marker) {
        return Some(Segment {
            marker,
            length: 0,
            payload_offset: offset.checked_add(2)?,
        });
    }

    let length = reader.read_u16(offset + 2, ByteOrder::BigEndian).ok()?;
    Some(Segment {
        marker,
        length,
        payload_offset: offset.checked_add(SEGMENT_HEADER_LEN)?,
    })
}

fn has_exif_signature(reader: &ByteReader<'_>, segment: &Segment) -> bool {
    reader
        .read_array::<4>(segment.payload_offset)
        .is_ok_and(|signature| signature == EXIF_SIGNATURE)
}

// =============================================================================
// Tests
// =============================================================================
