//! Capture dates embedded in image metadata.

use chrono::NaiveDate;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Extensions whose files are searched for embedded capture dates
const RASTER_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "bmp", "tif", "tiff", "heic", "heif", "webp",
];

/// Capture-date tags in the order they are consulted:
/// 36868 (DateTimeDigitized), 36867 (DateTimeOriginal), 306 (DateTime)
const CAPTURE_TAGS: [Tag; 3] = [Tag::DateTimeDigitized, Tag::DateTimeOriginal, Tag::DateTime];

/// Check if the file is a raster image that may carry EXIF data
pub fn is_raster_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| RASTER_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Read the capture date from the first capture-date tag present.
///
/// Returns `None` when the file has no EXIF data, none of the tags, or
/// a value that is not a valid date. A present but malformed tag does
/// not fall through to the next tag.
pub fn read_capture_date(path: &Path) -> Option<NaiveDate> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let exif = Reader::new().read_from_container(&mut reader).ok()?;

    let field = CAPTURE_TAGS
        .iter()
        .find_map(|tag| exif.get_field(*tag, In::PRIMARY))?;

    match field.value {
        Value::Ascii(ref values) => values
            .first()
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .and_then(parse_exif_date),
        _ => None,
    }
}

/// Parse the date portion of an EXIF `YYYY:MM:DD HH:MM:SS` value
pub fn parse_exif_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim_matches(|c: char| c == '\0' || c == '"' || c.is_whitespace());
    let date_part = value.split(' ').next()?;

    let mut parts = date_part.split(':');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}
