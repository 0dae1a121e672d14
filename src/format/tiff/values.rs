//! EXIF tag value decoding.
//!
//! Values are stored either inline in the 4-byte value field of a directory
//! entry (when they fit) or at an offset relative to the TIFF header. Only
//! the first component of numeric values is decoded; ASCII values use all
//! components up to the first NUL.

use std::fmt;

use serde::Serialize;

use crate::error::{IoError, ValueError};
use crate::io::{ByteOrder, ByteReader};

use super::ifd::DirectoryEntry;
use super::parser::TiffHeader;
use super::tags::FormatCode;

// =============================================================================
// DecodedValue
// =============================================================================

/// A decoded tag value.
///
/// SHORT, LONG and RATIONAL all decode to `Number`; RATIONAL is reduced to
/// numerator / denominator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecodedValue {
    Text(String),
    Number(f64),
}

impl DecodedValue {
    /// Whether this value carries nothing worth reporting: empty text or a
    /// number that is not finite.
    pub fn is_null_equivalent(&self) -> bool {
        match self {
            DecodedValue::Text(text) => text.is_empty(),
            DecodedValue::Number(number) => !number.is_finite(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DecodedValue::Text(text) => Some(text),
            DecodedValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            DecodedValue::Text(_) => None,
            DecodedValue::Number(number) => Some(*number),
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Text(text) => f.write_str(text),
            DecodedValue::Number(number) => write!(f, "{}", number),
        }
    }
}

// =============================================================================
// ValueDecoder
// =============================================================================

/// Decodes directory entry values from an EXIF payload.
///
/// Combines the byte reader with the TIFF header so values are read in the
/// payload's byte order and indirect offsets are resolved against the
/// header start.
pub struct ValueDecoder<'r, 'a> {
    reader: &'r ByteReader<'a>,
    header: &'r TiffHeader,
}

impl<'r, 'a> ValueDecoder<'r, 'a> {
    /// Create a new ValueDecoder.
    pub fn new(reader: &'r ByteReader<'a>, header: &'r TiffHeader) -> Self {
        Self { reader, header }
    }

    /// Get the byte order from the header.
    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.header.byte_order
    }

    /// Absolute offset of an entry's value data.
    ///
    /// For inline values this is the value field itself; otherwise the
    /// value field holds an offset relative to the TIFF header.
    fn value_offset(&self, entry: &DirectoryEntry, format: FormatCode) -> Result<usize, ValueError> {
        if format.fits_inline(entry.component_count) {
            return Ok(entry.value_field_offset);
        }

        self.header
            .absolute(entry.value_field as usize)
            .ok_or_else(|| self.out_of_bounds(usize::MAX, format, entry))
    }

    fn out_of_bounds(&self, offset: usize, format: FormatCode, entry: &DirectoryEntry) -> ValueError {
        let requested =
            usize::try_from(format.total_size(entry.component_count)).unwrap_or(usize::MAX);
        ValueError::Io(IoError::OutOfBounds {
            offset,
            requested,
            size: self.reader.len(),
        })
    }

    /// Decode an entry's value.
    ///
    /// # Errors
    /// - `UnsupportedFormat` for any format other than ASCII, SHORT, LONG,
    ///   RATIONAL
    /// - `Io` if the value bytes lie outside the buffer
    /// - `ZeroDenominator` for a RATIONAL with denominator 0
    pub fn decode(&self, entry: &DirectoryEntry) -> Result<DecodedValue, ValueError> {
        let format = entry
            .format
            .ok_or(ValueError::UnsupportedFormat(entry.format_raw))?;

        let offset = self.value_offset(entry, format)?;
        let order = self.byte_order();

        match format {
            FormatCode::Ascii => {
                let max_len = entry.component_count as usize;
                let text = self.reader.read_ascii(offset, max_len)?;
                Ok(DecodedValue::Text(text.trim_end().to_string()))
            }
            FormatCode::Short => {
                let value = self.reader.read_u16(offset, order)?;
                Ok(DecodedValue::Number(f64::from(value)))
            }
            FormatCode::Long => {
                let value = self.reader.read_u32(offset, order)?;
                Ok(DecodedValue::Number(f64::from(value)))
            }
            FormatCode::Rational => {
                let numerator = self.reader.read_u32(offset, order)?;
                let denominator = self.reader.read_u32(offset + 4, order)?;
                decode_rational(numerator, denominator)
            }
        }
    }
}

/// Reduce a RATIONAL to a floating-point number.
pub fn decode_rational(numerator: u32, denominator: u32) -> Result<DecodedValue, ValueError> {
    if denominator == 0 {
        return Err(ValueError::ZeroDenominator { numerator });
    }
    Ok(DecodedValue::Number(
        f64::from(numerator) / f64::from(denominator),
    ))
}

// =============================================================================
// Tests
// =============================================================================
