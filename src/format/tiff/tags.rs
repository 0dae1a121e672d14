//! EXIF format codes and tag dictionaries.
//!
//! This module defines the vocabulary for IFD parsing:
//! - Format codes that determine how values are encoded
//! - Two tag dictionaries mapping tag IDs to names, one for IFD0 and the
//!   EXIF sub-IFD, one for the GPS sub-IFD
//!
//! The GPS IFD reuses small tag numbers (0x0000-0x001F) that mean something
//! else in the main namespace, so the two dictionaries are kept apart and a
//! directory is only ever decoded with the dictionary of its own namespace.

// =============================================================================
// Format Codes
// =============================================================================

/// EXIF field formats that are decoded.
///
/// Note: TIFF defines further formats (BYTE, UNDEFINED, signed variants,
/// FLOAT, DOUBLE). Entries using them are skipped, never guessed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FormatCode {
    /// 8-bit ASCII character (1 byte)
    Ascii = 2,

    /// Unsigned 16-bit integer (2 bytes)
    Short = 3,

    /// Unsigned 32-bit integer (4 bytes)
    Long = 4,

    /// Two unsigned 32-bit integers, numerator then denominator (8 bytes)
    Rational = 5,
}

impl FormatCode {
    /// Maximum bytes stored inline in the 4-byte value field of an entry.
    pub const INLINE_THRESHOLD: u64 = 4;

    /// Size of a single component of this format in bytes.
    #[inline]
    pub const fn component_size(self) -> usize {
        match self {
            FormatCode::Ascii => 1,
            FormatCode::Short => 2,
            FormatCode::Long => 4,
            FormatCode::Rational => 8,
        }
    }

    /// Create a FormatCode from its numeric value.
    ///
    /// Returns `None` for formats that are not decoded.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            2 => Some(FormatCode::Ascii),
            3 => Some(FormatCode::Short),
            4 => Some(FormatCode::Long),
            5 => Some(FormatCode::Rational),
            _ => None,
        }
    }

    /// Total size in bytes of `count` components, computed in u64 so a
    /// hostile count cannot overflow.
    #[inline]
    pub fn total_size(self, count: u32) -> u64 {
        self.component_size() as u64 * count as u64
    }

    /// Whether `count` components fit in the entry's 4-byte value field.
    #[inline]
    pub fn fits_inline(self, count: u32) -> bool {
        self.total_size(count) <= Self::INLINE_THRESHOLD
    }
}

// =============================================================================
// Tag Dictionaries
// =============================================================================

/// Tag pointing at the EXIF sub-IFD.
pub const EXIF_IFD_POINTER: u16 = 0x8769;

/// Tag pointing at the GPS sub-IFD.
pub const GPS_INFO_IFD_POINTER: u16 = 0x8825;

/// Which tag namespace a dictionary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// IFD0 and the EXIF sub-IFD
    Main,
    /// The GPS sub-IFD
    Gps,
}

/// Static mapping from tag ID to tag name.
///
/// Entries are sorted by ID so lookups are a binary search.
#[derive(Debug, Clone, Copy)]
pub struct TagDictionary {
    namespace: Namespace,
    entries: &'static [(u16, &'static str)],
}

impl TagDictionary {
    /// Namespace covered by this dictionary.
    #[inline]
    pub const fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Look up a tag name. Unknown tags return `None` and are dropped by
    /// the directory parser.
    pub fn name(&self, tag_id: u16) -> Option<&'static str> {
        self.entries
            .binary_search_by_key(&tag_id, |&(id, _)| id)
            .ok()
            .map(|index| self.entries[index].1)
    }

    /// Reverse lookup, mostly useful in tests and tooling.
    pub fn id(&self, name: &str) -> Option<u16> {
        self.entries
            .iter()
            .find(|&&(_, entry_name)| entry_name == name)
            .map(|&(id, _)| id)
    }

    /// Iterate over all `(id, name)` pairs in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tags of IFD0 and the EXIF sub-IFD.
pub static MAIN_TAGS: TagDictionary = TagDictionary {
    namespace: Namespace::Main,
    entries: &[
        // ---------------------------------------------------------------------
        // Image structure
        // ---------------------------------------------------------------------
        (0x0100, "ImageWidth"),
        (0x0101, "ImageHeight"),
        (0x0102, "BitsPerSample"),
        (0x0103, "Compression"),
        (0x0106, "PhotometricInterpretation"),
        (0x010E, "ImageDescription"),
        (0x010F, "Make"),
        (0x0110, "Model"),
        (0x0112, "Orientation"),
        (0x0115, "SamplesPerPixel"),
        (0x011A, "XResolution"),
        (0x011B, "YResolution"),
        (0x011C, "PlanarConfiguration"),
        (0x0128, "ResolutionUnit"),
        (0x0131, "Software"),
        (0x0132, "DateTime"),
        (0x013B, "Artist"),
        (0x0213, "YCbCrPositioning"),
        (0x8298, "Copyright"),
        // ---------------------------------------------------------------------
        // Exposure
        // ---------------------------------------------------------------------
        (0x829A, "ExposureTime"),
        (0x829D, "FNumber"),
        (0x8769, "ExifIFDPointer"),
        (0x8822, "ExposureProgram"),
        (0x8825, "GPSInfoIFDPointer"),
        (0x8827, "ISOSpeedRatings"),
        (0x9003, "DateTimeOriginal"),
        (0x9004, "DateTimeDigitized"),
        (0x9102, "CompressedBitsPerPixel"),
        (0x9202, "ApertureValue"),
        (0x9205, "MaxApertureValue"),
        (0x9206, "SubjectDistance"),
        (0x9207, "MeteringMode"),
        (0x9208, "LightSource"),
        (0x9209, "Flash"),
        (0x920A, "FocalLength"),
        (0x9290, "SubsecTime"),
        (0x9291, "SubsecTimeOriginal"),
        (0x9292, "SubsecTimeDigitized"),
        // ---------------------------------------------------------------------
        // Image and capture settings
        // ---------------------------------------------------------------------
        (0xA001, "ColorSpace"),
        (0xA002, "PixelXDimension"),
        (0xA003, "PixelYDimension"),
        (0xA004, "RelatedSoundFile"),
        (0xA20E, "FocalPlaneXResolution"),
        (0xA20F, "FocalPlaneYResolution"),
        (0xA210, "FocalPlaneResolutionUnit"),
        (0xA215, "ExposureIndex"),
        (0xA217, "SensingMethod"),
        (0xA401, "CustomRendered"),
        (0xA402, "ExposureMode"),
        (0xA403, "WhiteBalance"),
        (0xA404, "DigitalZoomRatio"),
        (0xA405, "FocalLengthIn35mmFilm"),
        (0xA406, "SceneCaptureType"),
        (0xA407, "GainControl"),
        (0xA408, "Contrast"),
        (0xA409, "Saturation"),
        (0xA40A, "Sharpness"),
        (0xA40C, "SubjectDistanceRange"),
        (0xA420, "ImageUniqueID"),
        (0xA430, "CameraOwnerName"),
        (0xA431, "BodySerialNumber"),
        (0xA432, "LensSpecification"),
        (0xA433, "LensMake"),
        (0xA434, "LensModel"),
        (0xA435, "LensSerialNumber"),
    ],
};

/// Tags of the GPS sub-IFD.
pub static GPS_TAGS: TagDictionary = TagDictionary {
    namespace: Namespace::Gps,
    entries: &[
        (0x0000, "GPSVersionID"),
        (0x0001, "GPSLatitudeRef"),
        (0x0002, "GPSLatitude"),
        (0x0003, "GPSLongitudeRef"),
        (0x0004, "GPSLongitude"),
        (0x0005, "GPSAltitudeRef"),
        (0x0006, "GPSAltitude"),
        (0x0007, "GPSTimeStamp"),
        (0x0008, "GPSSatellites"),
        (0x0009, "GPSStatus"),
        (0x000A, "GPSMeasureMode"),
        (0x000B, "GPSDOP"),
        (0x000C, "GPSSpeedRef"),
        (0x000D, "GPSSpeed"),
        (0x000E, "GPSTrackRef"),
        (0x000F, "GPSTrack"),
        (0x0010, "GPSImgDirectionRef"),
        (0x0011, "GPSImgDirection"),
        (0x0012, "GPSMapDatum"),
        (0x0013, "GPSDestLatitudeRef"),
        (0x0014, "GPSDestLatitude"),
        (0x0015, "GPSDestLongitudeRef"),
        (0x0016, "GPSDestLongitude"),
        (0x0017, "GPSDestBearingRef"),
        (0x0018, "GPSDestBearing"),
        (0x0019, "GPSDestDistanceRef"),
        (0x001A, "GPSDestDistance"),
        (0x001D, "GPSDateStamp"),
        (0x001E, "GPSDifferential"),
    ],
};

/// Whether a tag only drives sub-IFD resolution and is never reported.
#[inline]
pub const fn is_pointer_tag(tag_id: u16) -> bool {
    matches!(tag_id, EXIF_IFD_POINTER | GPS_INFO_IFD_POINTER)
}

// =============================================================================
// Tests
// =============================================================================
