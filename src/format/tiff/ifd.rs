//! Image File Directory parsing.
//!
//! # IFD Structure
//!
//! ```text
//! Bytes 0-1:       Entry count N
//! Bytes 2..2+12N:  N entries of 12 bytes each
//!   Bytes 0-1:     Tag ID
//!   Bytes 2-3:     Format code
//!   Bytes 4-7:     Component count
//!   Bytes 8-11:    Value (if it fits in 4 bytes) or offset to value
//! ```
//!
//! The trailing next-IFD offset is not followed: IFD1 only describes the
//! embedded thumbnail.

use tracing::{debug, trace, warn};

use crate::error::IoError;
use crate::io::ByteReader;

use super::parser::TiffHeader;
use super::tags::{FormatCode, TagDictionary};
use super::values::{DecodedValue, ValueDecoder};

/// Size of the entry count field at the start of an IFD.
pub const IFD_COUNT_SIZE: usize = 2;

/// Size of a single IFD entry.
pub const IFD_ENTRY_SIZE: usize = 12;

// =============================================================================
// DirectoryEntry
// =============================================================================

/// A raw 12-byte IFD entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Tag identifier
    pub tag_id: u16,

    /// Decoded format, `None` if the format is not one we decode
    pub format: Option<FormatCode>,

    /// Format code as stored, kept for error reporting
    pub format_raw: u16,

    /// Number of components of the given format
    pub component_count: u32,

    /// Inline value bytes or an offset relative to the TIFF header
    pub value_field: u32,

    /// Absolute offset of the 4-byte value field in the buffer
    pub value_field_offset: usize,
}

impl DirectoryEntry {
    /// Read the entry whose first byte is at absolute `offset`.
    pub fn parse(
        reader: &ByteReader<'_>,
        header: &TiffHeader,
        offset: usize,
    ) -> Result<Self, IoError> {
        reader.read_bytes(offset, IFD_ENTRY_SIZE)?;
        let order = header.byte_order;

        let tag_id = reader.read_u16(offset, order)?;
        let format_raw = reader.read_u16(offset + 2, order)?;
        let component_count = reader.read_u32(offset + 4, order)?;
        let value_field = reader.read_u32(offset + 8, order)?;

        Ok(DirectoryEntry {
            tag_id,
            format: FormatCode::from_u16(format_raw),
            format_raw,
            component_count,
            value_field,
            value_field_offset: offset + 8,
        })
    }

    /// Whether the value is stored in the value field itself.
    ///
    /// Returns `None` for formats that are not decoded, since their size is
    /// unknown here.
    pub fn is_inline(&self) -> Option<bool> {
        self.format
            .map(|format| format.fits_inline(self.component_count))
    }
}

// =============================================================================
// Directory
// =============================================================================

/// A decoded directory value together with the tag it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedValue {
    pub tag_id: u16,
    pub name: &'static str,
    pub value: DecodedValue,
}

/// Decoded contents of one IFD, in entry order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directory {
    pub values: Vec<TaggedValue>,
}

impl Directory {
    /// Find the value decoded for a tag.
    pub fn get(&self, tag_id: u16) -> Option<&DecodedValue> {
        self.values
            .iter()
            .find(|tagged| tagged.tag_id == tag_id)
            .map(|tagged| &tagged.value)
    }

    /// Read a tag as an offset (a non-negative integral number).
    pub fn offset_of(&self, tag_id: u16) -> Option<usize> {
        let number = self.get(tag_id)?.as_number()?;
        if (0.0..=u32::MAX as f64).contains(&number) && number.fract() == 0.0 {
            Some(number as usize)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// =============================================================================
// Directory Parser
// =============================================================================

/// Parse the IFD at `ifd_offset` (relative to the TIFF header).
///
/// Only tags present in `dictionary` are decoded. An entry that fails to
/// decode (value out of bounds, unsupported format, zero denominator) is
/// skipped; the rest of the directory is still returned. If the entry table
/// runs past the end of the buffer, parsing stops there and the entries read
/// so far are kept.
///
/// # Errors
/// `IoError::OutOfBounds` if the entry count itself cannot be read.
pub fn parse_directory(
    reader: &ByteReader<'_>,
    header: &TiffHeader,
    ifd_offset: usize,
    dictionary: &TagDictionary,
) -> Result<Directory, IoError> {
    let start = header.absolute(ifd_offset).ok_or(IoError::OutOfBounds {
        offset: usize::MAX,
        requested: IFD_COUNT_SIZE,
        size: reader.len(),
    })?;

    let count = reader.read_u16(start, header.byte_order)? as usize;
    debug!(
        offset = ifd_offset,
        entries = count,
        namespace = ?dictionary.namespace(),
        "parsing IFD"
    );

    let decoder = ValueDecoder::new(reader, header);
    let mut directory = Directory::default();

    for index in 0..count {
        let entry_offset = start + IFD_COUNT_SIZE + index * IFD_ENTRY_SIZE;
        let entry = match DirectoryEntry::parse(reader, header, entry_offset) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(
                    index,
                    declared = count,
                    error = %e,
                    "IFD entry table truncated"
                );
                break;
            }
        };

        let Some(name) = dictionary.name(entry.tag_id) else {
            trace!(tag = entry.tag_id, "skipping unknown tag");
            continue;
        };

        match decoder.decode(&entry) {
            Ok(value) => directory.values.push(TaggedValue {
                tag_id: entry.tag_id,
                name,
                value,
            }),
            Err(e) => {
                debug!(tag = name, error = %e, "skipping undecodable entry");
            }
        }
    }

    Ok(directory)
}

// =============================================================================
// Tests
// =============================================================================
