use thiserror::Error;

/// Errors raised by the bounds-checked byte reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IoError {
    /// Requested range exceeds buffer bounds
    #[error("Range out of bounds: requested {requested} bytes at offset {offset}, size is {size}")]
    OutOfBounds {
        offset: usize,
        requested: usize,
        size: usize,
    },
}

/// Fatal errors that abort decoding of a whole buffer.
///
/// Callers are expected to turn any of these into a "no metadata found"
/// message rather than fail hard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExifError {
    /// Buffer does not start with the JPEG Start-Of-Image marker
    #[error("Not a JPEG: missing 0xFFD8 start-of-image marker")]
    NotAJpeg,

    /// No APP1 segment carrying an Exif header was found
    #[error("No EXIF data: no APP1/Exif segment before the first non-APPn marker")]
    NoExifData,

    /// TIFF header magic is not 42
    #[error("Invalid TIFF magic: expected 42, got {0}")]
    InvalidTiffMagic(u16),

    /// A structural offset (TIFF header, IFD0) points outside the buffer
    #[error("Out of bounds: {0}")]
    OutOfBounds(#[from] IoError),
}

/// Errors decoding a single directory entry.
///
/// These never abort the decode; the entry is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// Value bytes lie outside the buffer
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Format code outside ASCII, SHORT, LONG and RATIONAL
    #[error("Unsupported format code: {0}")]
    UnsupportedFormat(u16),

    /// RATIONAL value with a zero denominator
    #[error("Rational with zero denominator (numerator {numerator})")]
    ZeroDenominator { numerator: u32 },
}
