//! # Date Module
//!
//! Works out the capture date that decides a file's destination folder.
//!
//! ## Sources, in order
//! 1. Embedded EXIF tags, for raster images
//! 2. Well-known filename conventions (`IMG_YYYYMMDD_HHMMSS`, ...)
//! 3. The file's last-modified time
//!
//! With the default [`DatePrecedence::FilenameOverrides`] a filename that
//! matches a convention wins over embedded metadata, which is how existing
//! libraries sorted by this tool were laid out.

mod embedded;
mod filename;

pub use embedded::{is_raster_image, parse_exif_date, read_capture_date};
pub use filename::date_from_name;

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Where a resolved date came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    Embedded,
    Filename,
    Modified,
}

impl std::fmt::Display for DateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateSource::Embedded => write!(f, "embedded metadata"),
            DateSource::Filename => write!(f, "file name"),
            DateSource::Modified => write!(f, "modified time"),
        }
    }
}

/// A capture date and its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDate {
    pub date: NaiveDate,
    pub source: DateSource,
}

/// How embedded metadata and filename conventions rank against each other
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePrecedence {
    /// A matching filename replaces an embedded date
    #[default]
    FilenameOverrides,
    /// Filenames are only consulted when no embedded date was found
    EmbeddedFirst,
}

/// Derives capture dates for files
#[derive(Debug, Clone, Copy, Default)]
pub struct DateResolver {
    precedence: DatePrecedence,
}

impl DateResolver {
    pub fn new(precedence: DatePrecedence) -> Self {
        Self { precedence }
    }

    /// Resolve the capture date of a file.
    ///
    /// Malformed embedded or filename dates are skipped silently; the only
    /// error is failing to read the file's modified time.
    pub fn resolve(&self, path: &Path) -> io::Result<ResolvedDate> {
        let mut resolved = ResolvedDate {
            date: modified_date(path)?,
            source: DateSource::Modified,
        };

        let embedded = if is_raster_image(path) {
            read_capture_date(path)
        } else {
            None
        };
        if let Some(date) = embedded {
            resolved = ResolvedDate {
                date,
                source: DateSource::Embedded,
            };
            if self.precedence == DatePrecedence::EmbeddedFirst {
                return Ok(resolved);
            }
        }

        if let Some(date) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(date_from_name)
        {
            resolved = ResolvedDate {
                date,
                source: DateSource::Filename,
            };
        }

        Ok(resolved)
    }
}

/// Last-modified date in the local time zone
fn modified_date(path: &Path) -> io::Result<NaiveDate> {
    let modified = fs::metadata(path)?.modified()?;
    let local: DateTime<Local> = modified.into();
    Ok(local.date_naive())
}
