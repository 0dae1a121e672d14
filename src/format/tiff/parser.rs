//! TIFF header parsing.
//!
//! The EXIF payload of a JPEG reuses the classic TIFF structure: an 8-byte
//! header followed by Image File Directories. Every offset inside the
//! payload is relative to the first byte of this header, not to the start
//! of the JPEG file.
//!
//! # TIFF Header Structure
//!
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A)
//! Bytes 4-7: Offset to IFD0, relative to byte 0 (4 bytes)
//! ```

use crate::error::ExifError;
use crate::io::{ByteOrder, ByteReader};

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: [u8; 2] = *b"II";

/// Version number for classic TIFF
const VERSION_TIFF: u16 = 42;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header of an EXIF payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the payload
    pub byte_order: ByteOrder,

    /// Absolute offset of the TIFF header in the buffer
    pub tiff_start: usize,

    /// Offset of IFD0, relative to `tiff_start`
    pub ifd0_offset: usize,
}

impl TiffHeader {
    /// Parse the TIFF header located at `tiff_start`.
    ///
    /// "II" selects little-endian; any other pair is read as big-endian
    /// ("MM" by convention). The version field must then read as 42 in the
    /// selected order, which rejects garbage that merely looks like "MM".
    ///
    /// # Errors
    /// - `OutOfBounds` if the 8 header bytes do not fit in the buffer
    /// - `InvalidTiffMagic` if the version is not 42
    pub fn parse(reader: &ByteReader<'_>, tiff_start: usize) -> Result<Self, ExifError> {
        // Check the whole header fits before interpreting any of it
        reader.read_bytes(tiff_start, TIFF_HEADER_SIZE)?;

        let byte_order = match reader.read_array::<2>(tiff_start)? {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            _ => ByteOrder::BigEndian,
        };

        let version = reader.read_u16(tiff_start + 2, byte_order)?;
        if version != VERSION_TIFF {
            return Err(ExifError::InvalidTiffMagic(version));
        }

        let ifd0_offset = reader.read_u32(tiff_start + 4, byte_order)? as usize;

        Ok(TiffHeader {
            byte_order,
            tiff_start,
            ifd0_offset,
        })
    }

    /// Convert an offset relative to the TIFF header into an absolute one.
    ///
    /// Returns `None` on arithmetic overflow; bounds are checked by the reader.
    #[inline]
    pub fn absolute(&self, relative: usize) -> Option<usize> {
        self.tiff_start.checked_add(relative)
    }
}

// =============================================================================
// Tests
// =============================================================================
