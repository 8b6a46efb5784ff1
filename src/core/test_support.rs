//! Shared fixtures for unit tests.

use crate::core::fs::{FileSystem, LocalFileSystem};
use chrono::{Local, NaiveDate, TimeZone};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::SystemTime;

/// Local file system that counts reads and can refuse copies as if the
/// source were held open by another process.
#[derive(Default)]
pub struct TestFs {
    pub opens: AtomicUsize,
    pub copy_attempts: AtomicUsize,
    /// Number of copy attempts that fail with `PermissionDenied`
    pub locked_attempts: usize,
    /// Fail every `remove_file` as if the volume were mounted read-only
    pub refuse_removes: bool,
}

impl TestFs {
    pub fn locked_for(attempts: usize) -> Self {
        Self {
            locked_attempts: attempts,
            ..Default::default()
        }
    }

    pub fn refusing_removes() -> Self {
        Self {
            refuse_removes: true,
            ..Default::default()
        }
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn copy_attempts(&self) -> usize {
        self.copy_attempts.load(Ordering::SeqCst)
    }
}

impl FileSystem for TestFs {
    fn file_size(&self, path: &Path) -> io::Result<u64> {
        LocalFileSystem.file_size(path)
    }

    fn exists(&self, path: &Path) -> bool {
        LocalFileSystem.exists(path)
    }

    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        LocalFileSystem.open_read(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        LocalFileSystem.create_dir_all(path)
    }

    fn copy_new(&self, from: &Path, to: &Path) -> io::Result<u64> {
        let attempt = self.copy_attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.locked_attempts {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "The process cannot access the file because it is being used by another process",
            ));
        }
        LocalFileSystem.copy_new(from, to)
    }

    fn is_read_only(&self, path: &Path) -> io::Result<bool> {
        LocalFileSystem.is_read_only(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        if self.refuse_removes {
            return Err(io::Error::other("Read-only file system"));
        }
        LocalFileSystem.remove_file(path)
    }
}

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Set a file's modified time to noon (local time) on `date`
pub fn set_modified(path: &Path, date: NaiveDate) {
    let noon = Local
        .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
        .unwrap();
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::from(noon))
        .unwrap();
}

const TAG_DATE_TIME: u16 = 306;
const TAG_EXIF_POINTER: u16 = 0x8769;
const TYPE_ASCII: u16 = 2;
const TYPE_LONG: u16 = 4;

/// Build a minimal JPEG whose APP1 segment carries the given ASCII tags.
///
/// Tag 306 goes into IFD0, every other tag into the Exif sub-IFD. Values
/// must be at least four characters long so they are stored out of line.
pub fn jpeg_with_exif(tags: &[(u16, &str)]) -> Vec<u8> {
    let mut ifd0: Vec<(u16, &str)> = tags
        .iter()
        .copied()
        .filter(|(tag, _)| *tag == TAG_DATE_TIME)
        .collect();
    let mut exif: Vec<(u16, &str)> = tags
        .iter()
        .copied()
        .filter(|(tag, _)| *tag != TAG_DATE_TIME)
        .collect();
    ifd0.sort_by_key(|(tag, _)| *tag);
    exif.sort_by_key(|(tag, _)| *tag);

    let ifd0_entries = ifd0.len() + usize::from(!exif.is_empty());
    let ifd0_offset = 8;
    let exif_offset = ifd0_offset + 2 + 12 * ifd0_entries + 4;
    let exif_len = if exif.is_empty() {
        0
    } else {
        2 + 12 * exif.len() + 4
    };
    let data_offset = exif_offset + exif_len;

    let mut tiff = Vec::new();
    let mut data = Vec::new();
    tiff.extend_from_slice(b"MM");
    tiff.extend_from_slice(&0x2Au16.to_be_bytes());
    tiff.extend_from_slice(&(ifd0_offset as u32).to_be_bytes());

    let mut push_ascii = |tiff: &mut Vec<u8>, tag: u16, value: &str| {
        let mut bytes = value.as_bytes().to_vec();
        bytes.push(0);
        assert!(bytes.len() > 4, "inline values are not supported");
        tiff.extend_from_slice(&tag.to_be_bytes());
        tiff.extend_from_slice(&TYPE_ASCII.to_be_bytes());
        tiff.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
        tiff.extend_from_slice(&((data_offset + data.len()) as u32).to_be_bytes());
        data.extend_from_slice(&bytes);
    };

    tiff.extend_from_slice(&(ifd0_entries as u16).to_be_bytes());
    for (tag, value) in &ifd0 {
        push_ascii(&mut tiff, *tag, value);
    }
    if !exif.is_empty() {
        tiff.extend_from_slice(&TAG_EXIF_POINTER.to_be_bytes());
        tiff.extend_from_slice(&TYPE_LONG.to_be_bytes());
        tiff.extend_from_slice(&1u32.to_be_bytes());
        tiff.extend_from_slice(&(exif_offset as u32).to_be_bytes());
    }
    tiff.extend_from_slice(&0u32.to_be_bytes());

    if !exif.is_empty() {
        tiff.extend_from_slice(&(exif.len() as u16).to_be_bytes());
        for (tag, value) in &exif {
            push_ascii(&mut tiff, *tag, value);
        }
        tiff.extend_from_slice(&0u32.to_be_bytes());
    }
    tiff.extend_from_slice(&data);

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}
