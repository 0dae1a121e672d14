//! End-to-end decode tests.
//!
//! Tests verify:
//! - IFD0, EXIF and GPS directories are merged into one map
//! - Little-endian and big-endian payloads decode identically
//! - Bad entries are skipped without losing the rest of the file
//! - Structural problems surface as the right error

use jpeg_exif::{decode, render_json, DecodedValue, ExifError, FileOutcome, EXIF_IFD_POINTER};

use super::test_utils::{exif_app1, ByteOrderType, ExifBuilder, Value};

fn camera_exif(order: ByteOrderType) -> ExifBuilder {
    ExifBuilder::new(order)
        .ifd0(0x010F, Value::ascii("Canon"))
        .ifd0(0x0110, Value::ascii("Canon EOS 5D Mark IV"))
        .ifd0(0x0112, Value::Short(1))
        .ifd0(0x011A, Value::Rational(72, 1))
        .exif(0x829A, Value::Rational(1, 250))
        .exif(0x829D, Value::Rational(28, 10))
        .exif(0x8827, Value::Short(400))
        .exif(0x9003, Value::ascii("2024:05:01 12:30:00"))
        .gps(0x0001, Value::ascii("N"))
        .gps(0x0002, Value::Rationals(vec![(48, 1), (51, 1), (2964, 100)]))
        .gps(0x0006, Value::Rational(35, 1))
}

fn text(value: &str) -> DecodedValue {
    DecodedValue::Text(value.to_string())
}

fn number(value: f64) -> DecodedValue {
    DecodedValue::Number(value)
}

// =============================================================================
// Happy Path
// =============================================================================

#[test]
fn test_orientation_only() {
    let jpeg = ExifBuilder::new(ByteOrderType::LittleEndian)
        .ifd0(0x0112, Value::Short(1))
        .build_jpeg();

    let metadata = decode(&jpeg).unwrap();
    assert_eq!(metadata.len(), 1);
    assert_eq!(metadata.get("Orientation"), Some(&number(1.0)));
}

#[test]
fn test_all_directories_merged() {
    let metadata = decode(&camera_exif(ByteOrderType::LittleEndian).build_jpeg()).unwrap();

    assert_eq!(metadata.get("Make"), Some(&text("Canon")));
    assert_eq!(metadata.get("Model"), Some(&text("Canon EOS 5D Mark IV")));
    assert_eq!(metadata.get("Orientation"), Some(&number(1.0)));
    assert_eq!(metadata.get("XResolution"), Some(&number(72.0)));
    assert_eq!(metadata.get("ExposureTime"), Some(&number(0.004)));
    assert_eq!(metadata.get("FNumber"), Some(&number(2.8)));
    assert_eq!(metadata.get("ISOSpeedRatings"), Some(&number(400.0)));
    assert_eq!(metadata.get("DateTimeOriginal"), Some(&text("2024:05:01 12:30:00")));
    assert_eq!(metadata.get("GPSLatitudeRef"), Some(&text("N")));
    assert_eq!(metadata.get("GPSAltitude"), Some(&number(35.0)));
    assert_eq!(metadata.len(), 11);
}

#[test]
fn test_pointer_tags_not_in_output() {
    let metadata = decode(&camera_exif(ByteOrderType::BigEndian).build_jpeg()).unwrap();

    assert!(!metadata.contains("ExifIFDPointer"));
    assert!(!metadata.contains("GPSInfoIFDPointer"));
}

#[test]
fn test_multi_component_uses_first() {
    let metadata = decode(&camera_exif(ByteOrderType::LittleEndian).build_jpeg()).unwrap();

    // Degrees only; minutes and seconds are not decoded
    assert_eq!(metadata.get("GPSLatitude"), Some(&number(48.0)));
}

#[test]
fn test_byte_orders_decode_identically() {
    let le = decode(&camera_exif(ByteOrderType::LittleEndian).build_jpeg()).unwrap();
    let be = decode(&camera_exif(ByteOrderType::BigEndian).build_jpeg()).unwrap();

    assert!(!le.is_empty());
    assert_eq!(le, be);
}

#[test]
fn test_ascii_trailing_whitespace_trimmed() {
    let jpeg = ExifBuilder::new(ByteOrderType::BigEndian)
        .ifd0(0x010F, Value::ascii("NIKON CORPORATION   "))
        .build_jpeg();

    let metadata = decode(&jpeg).unwrap();
    assert_eq!(metadata.get("Make"), Some(&text("NIKON CORPORATION")));
}

#[test]
fn test_empty_text_dropped() {
    let jpeg = ExifBuilder::new(ByteOrderType::LittleEndian)
        .ifd0(0x0131, Value::ascii(""))
        .ifd0(0x0110, Value::ascii("    "))
        .ifd0(0x0112, Value::Short(6))
        .build_jpeg();

    let metadata = decode(&jpeg).unwrap();
    assert!(!metadata.contains("Software"));
    assert!(!metadata.contains("Model"));
    assert_eq!(metadata.get("Orientation"), Some(&number(6.0)));
}

#[test]
fn test_empty_ifd0_is_empty_map() {
    let jpeg = ExifBuilder::new(ByteOrderType::LittleEndian).build_jpeg();

    let metadata = decode(&jpeg).unwrap();
    assert!(metadata.is_empty());
}

// =============================================================================
// Per-Entry Recovery
// =============================================================================

#[test]
fn test_dangling_offset_skipped() {
    let jpeg = ExifBuilder::new(ByteOrderType::LittleEndian)
        .ifd0(
            0x010F,
            Value::Dangling {
                format: 2,
                count: 32,
                offset: 0xFFFF_0000,
            },
        )
        .ifd0(0x0112, Value::Short(3))
        .build_jpeg();

    let metadata = decode(&jpeg).unwrap();
    assert!(!metadata.contains("Make"));
    assert_eq!(metadata.get("Orientation"), Some(&number(3.0)));
}

#[test]
fn test_unknown_tag_skipped() {
    let jpeg = ExifBuilder::new(ByteOrderType::BigEndian)
        .ifd0(0xC4A5, Value::Long(7))
        .ifd0(0x0112, Value::Short(1))
        .build_jpeg();

    let metadata = decode(&jpeg).unwrap();
    assert_eq!(metadata.len(), 1);
    assert!(metadata.contains("Orientation"));
}

#[test]
fn test_unsupported_format_skipped() {
    // Format 7 (UNDEFINED) is not decoded
    let jpeg = ExifBuilder::new(ByteOrderType::LittleEndian)
        .ifd0(
            0x010F,
            Value::Raw {
                format: 7,
                count: 4,
                bytes: b"0230".to_vec(),
            },
        )
        .ifd0(0x0112, Value::Short(1))
        .build_jpeg();

    let metadata = decode(&jpeg).unwrap();
    assert!(!metadata.contains("Make"));
    assert!(metadata.contains("Orientation"));
}

#[test]
fn test_zero_denominator_skipped() {
    let jpeg = ExifBuilder::new(ByteOrderType::LittleEndian)
        .exif(0x829A, Value::Rational(1, 0))
        .exif(0x829D, Value::Rational(28, 10))
        .build_jpeg();

    let metadata = decode(&jpeg).unwrap();
    assert!(!metadata.contains("ExposureTime"));
    assert_eq!(metadata.get("FNumber"), Some(&number(2.8)));
}

#[test]
fn test_bad_sub_ifd_pointer_skipped() {
    let jpeg = ExifBuilder::new(ByteOrderType::BigEndian)
        .ifd0(0x010F, Value::ascii("Canon"))
        .ifd0(EXIF_IFD_POINTER, Value::Long(0x00FF_FFFF))
        .build_jpeg();

    let metadata = decode(&jpeg).unwrap();
    assert_eq!(metadata.get("Make"), Some(&text("Canon")));
    assert!(!metadata.contains("ExifIFDPointer"));
}

// =============================================================================
// Fatal Errors
// =============================================================================

#[test]
fn test_not_a_jpeg() {
    let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    assert_eq!(decode(png), Err(ExifError::NotAJpeg));
    assert_eq!(decode(&[]), Err(ExifError::NotAJpeg));
    assert_eq!(decode(&[0xFF]), Err(ExifError::NotAJpeg));
}

#[test]
fn test_soi_eoi_has_no_exif() {
    assert_eq!(decode(&[0xFF, 0xD8, 0xFF, 0xD9]), Err(ExifError::NoExifData));
}

#[test]
fn test_wrong_magic() {
    let jpeg = ExifBuilder::new(ByteOrderType::LittleEndian)
        .magic(43)
        .ifd0(0x0112, Value::Short(1))
        .build_jpeg();

    assert_eq!(decode(&jpeg), Err(ExifError::InvalidTiffMagic(43)));
}

#[test]
fn test_ifd0_out_of_bounds() {
    let mut tiff = ExifBuilder::new(ByteOrderType::LittleEndian)
        .ifd0(0x0112, Value::Short(1))
        .build_tiff();
    tiff[4..8].copy_from_slice(&0x0001_0000u32.to_le_bytes());

    let mut jpeg = vec![0xFF, 0xD8];
    jpeg.extend(exif_app1(&tiff));
    jpeg.extend_from_slice(&[0xFF, 0xD9]);

    assert!(matches!(decode(&jpeg), Err(ExifError::OutOfBounds(_))));
}

#[test]
fn test_truncated_tiff_header() {
    let mut jpeg = vec![0xFF, 0xD8];
    jpeg.extend(exif_app1(b"II*\0"));

    assert!(matches!(decode(&jpeg), Err(ExifError::OutOfBounds(_))));
}

// =============================================================================
// Reporting
// =============================================================================

#[test]
fn test_json_report_from_decode() {
    let metadata = decode(&camera_exif(ByteOrderType::LittleEndian).build_jpeg()).unwrap();
    let outcomes = vec![
        FileOutcome::decoded("camera.jpg", metadata),
        FileOutcome::failed("plain.png", ExifError::NotAJpeg.to_string()),
    ];

    let json = render_json(&outcomes).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed[0]["status"], "decoded");
    assert_eq!(parsed[0]["detail"]["Make"], "Canon");
    assert_eq!(parsed[0]["detail"]["ISOSpeedRatings"], 400.0);
    assert!(parsed[0]["detail"].get("ExifIFDPointer").is_none());
    assert_eq!(parsed[1]["status"], "failed");
}
