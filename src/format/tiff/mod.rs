//! TIFF structure embedded in EXIF payloads.
//!
//! # Key Concepts
//!
//! - **Byte order**: the payload declares its endianness (II = little-endian,
//!   MM = big-endian) in the header. All multi-byte values must be read
//!   respecting this order.
//!
//! - **IFD (Image File Directory)**: a list of tagged entries. IFD0 may point
//!   at the EXIF and GPS sub-IFDs through pointer tags.
//!
//! - **Inline vs offset values**: values of up to 4 bytes are stored inline
//!   in the IFD entry, larger values at an offset relative to the TIFF header.

mod ifd;
mod parser;
mod tags;
mod values;

pub use ifd::{
    parse_directory, Directory, DirectoryEntry, TaggedValue, IFD_COUNT_SIZE, IFD_ENTRY_SIZE,
};
pub use parser::{TiffHeader, TIFF_HEADER_SIZE};
pub use tags::{
    is_pointer_tag, FormatCode, Namespace, TagDictionary, EXIF_IFD_POINTER,
    GPS_INFO_IFD_POINTER, GPS_TAGS, MAIN_TAGS,
};
pub use values::{decode_rational, DecodedValue, ValueDecoder};
