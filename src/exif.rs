//! EXIF extraction from a complete JPEG buffer.
//!
//! [`decode`] ties the pipeline together:
//!
//! 1. Find the EXIF APP1 segment ([`crate::format::jpeg`])
//! 2. Parse the TIFF header inside it
//! 3. Parse IFD0 with the main tag dictionary
//! 4. Follow `ExifIFDPointer` (main dictionary) and `GPSInfoIFDPointer`
//!    (GPS dictionary) one level down
//! 5. Merge everything into a flat [`MetadataMap`], without pointer tags and
//!    without empty values
//!
//! Decoding is a pure function of the input buffer: there is no I/O and no
//! shared state, so any number of buffers may be decoded concurrently.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ExifError;
use crate::format::jpeg::find_exif_segment;
use crate::format::tiff::{
    is_pointer_tag, parse_directory, DecodedValue, Directory, TagDictionary, TiffHeader,
    EXIF_IFD_POINTER, GPS_INFO_IFD_POINTER, GPS_TAGS, MAIN_TAGS,
};
use crate::io::ByteReader;

// =============================================================================
// MetadataMap
// =============================================================================

/// Flat mapping from tag name to decoded value.
///
/// Iterates in tag-name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetadataMap {
    entries: BTreeMap<String, DecodedValue>,
}

impl MetadataMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&DecodedValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DecodedValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Insert a value unless it is null-equivalent.
    ///
    /// Returns whether the value was stored. A later insert under the same
    /// name replaces the earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: DecodedValue) -> bool {
        if value.is_null_equivalent() {
            return false;
        }
        self.entries.insert(name.into(), value);
        true
    }

    /// Merge a decoded directory, dropping pointer tags.
    fn merge(&mut self, directory: Directory) {
        for tagged in directory.values {
            if is_pointer_tag(tagged.tag_id) {
                continue;
            }
            self.insert(tagged.name, tagged.value);
        }
    }
}

impl<'a> IntoIterator for &'a MetadataMap {
    type Item = (&'a String, &'a DecodedValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, DecodedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode the EXIF metadata of a JPEG file held in memory.
///
/// An empty map means the EXIF segment was structurally valid but held no
/// usable tags; it is not an error.
///
/// # Errors
/// - `NotAJpeg` if the buffer does not start with `FF D8`
/// - `NoExifData` if there is no EXIF APP1 segment
/// - `InvalidTiffMagic` if the TIFF header version is not 42
/// - `OutOfBounds` if the TIFF header or IFD0 lies outside the buffer
pub fn decode(data: &[u8]) -> Result<MetadataMap, ExifError> {
    let reader = ByteReader::new(data);

    let segment = find_exif_segment(&reader)?;
    let header = TiffHeader::parse(&reader, segment.tiff_start())?;
    debug!(
        tiff_start = header.tiff_start,
        byte_order = ?header.byte_order,
        ifd0 = header.ifd0_offset,
        "parsed TIFF header"
    );

    let ifd0 = parse_directory(&reader, &header, header.ifd0_offset, &MAIN_TAGS)?;

    let exif = sub_directory(&reader, &header, &ifd0, EXIF_IFD_POINTER, &MAIN_TAGS);
    let gps = sub_directory(&reader, &header, &ifd0, GPS_INFO_IFD_POINTER, &GPS_TAGS);

    let mut metadata = MetadataMap::new();
    metadata.merge(ifd0);
    for directory in [exif, gps].into_iter().flatten() {
        metadata.merge(directory);
    }

    debug!(tags = metadata.len(), "decoded EXIF metadata");
    Ok(metadata)
}

/// Follow a pointer tag of IFD0 to its sub-directory.
///
/// A pointer that cannot be followed is logged and treated as absent: it is
/// a single bad field, not a broken file.
fn sub_directory(
    reader: &ByteReader<'_>,
    header: &TiffHeader,
    ifd0: &Directory,
    pointer_tag: u16,
    dictionary: &TagDictionary,
) -> Option<Directory> {
    let offset = ifd0.offset_of(pointer_tag)?;

    match parse_directory(reader, header, offset, dictionary) {
        Ok(directory) => Some(directory),
        Err(e) => {
            warn!(
                pointer = pointer_tag,
                offset,
                error = %e,
                "skipping unreadable sub-IFD"
            );
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
