//! Bounds-checked access to an in-memory byte buffer.
//!
//! Every parser in this crate reads the input through [`ByteReader`]. No
//! other module indexes the buffer directly, so every offset taken from the
//! file (segment lengths, IFD offsets, value offsets) is checked against the
//! buffer length before it is dereferenced.

use crate::error::IoError;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of multi-byte values.
///
/// JPEG marker segments are always big-endian. The EXIF payload declares its
/// own order in the TIFF header ("II" or "MM").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Interpret two bytes as a u16 in this byte order.
    #[inline]
    pub fn u16_from(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
        }
    }

    /// Interpret four bytes as a u32 in this byte order.
    #[inline]
    pub fn u32_from(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
        }
    }
}

// =============================================================================
// ByteReader
// =============================================================================

/// Read-only, bounds-checked view over a byte buffer.
///
/// The reader borrows the caller's buffer and never copies or mutates it.
/// All accessors take an absolute offset and return `IoError::OutOfBounds`
/// instead of panicking when the requested range does not fit.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    /// Wrap a buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Total size of the buffer in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read exactly `len` bytes starting at `offset`.
    pub fn read_bytes(&self, offset: usize, len: usize) -> Result<&'a [u8], IoError> {
        let out_of_bounds = IoError::OutOfBounds {
            offset,
            requested: len,
            size: self.data.len(),
        };

        let end = offset.checked_add(len).ok_or_else(|| out_of_bounds.clone())?;
        self.data.get(offset..end).ok_or(out_of_bounds)
    }

    /// Read a fixed-size array starting at `offset`.
    pub fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N], IoError> {
        let bytes = self.read_bytes(offset, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&self, offset: usize) -> Result<u8, IoError> {
        let [byte] = self.read_array::<1>(offset)?;
        Ok(byte)
    }

    /// Read a u16 in the given byte order.
    #[inline]
    pub fn read_u16(&self, offset: usize, order: ByteOrder) -> Result<u16, IoError> {
        Ok(order.u16_from(self.read_array(offset)?))
    }

    /// Read a u32 in the given byte order.
    #[inline]
    pub fn read_u32(&self, offset: usize, order: ByteOrder) -> Result<u32, IoError> {
        Ok(order.u32_from(self.read_array(offset)?))
    }

    /// Read up to `max_len` single-byte characters, stopping at the first NUL.
    ///
    /// Each byte is mapped to the code point of the same value (Latin-1),
    /// so arbitrary bytes never fail to decode. The full `max_len` range must
    /// lie inside the buffer even when a NUL ends the text early.
    pub fn read_ascii(&self, offset: usize, max_len: usize) -> Result<String, IoError> {
        let bytes = self.read_bytes(offset, max_len)?;
        Ok(bytes
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| char::from(b))
            .collect())
    }
}
