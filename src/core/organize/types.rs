//! Types for the organize module.

use crate::error::{OrganizeError, PathRole, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Folder structure options for organization
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FolderStructure {
    /// Year/Month without padding (e.g., 2024/1/)
    #[default]
    YearMonth,
    /// Year/Month with a two digit month (e.g., 2024/01/)
    YearMonthPadded,
}

impl FolderStructure {
    /// Folder for a date, relative to the destination root
    pub fn folder_for(&self, date: NaiveDate) -> PathBuf {
        let year = date.year().to_string();
        let month = match self {
            FolderStructure::YearMonth => date.month().to_string(),
            FolderStructure::YearMonthPadded => format!("{:02}", date.month()),
        };
        Path::new(&year).join(month)
    }
}

/// What to do with a file once its destination is known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction {
    /// Copy to the planned destination
    Copy,
    /// An identical file already sits at the planned destination
    SkipDuplicate,
}

/// Where a file goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub destination: PathBuf,
    pub action: PlanAction,
}

impl Plan {
    pub fn copy(destination: PathBuf) -> Self {
        Self {
            destination,
            action: PlanAction::Copy,
        }
    }

    pub fn skip_duplicate(destination: PathBuf) -> Self {
        Self {
            destination,
            action: PlanAction::SkipDuplicate,
        }
    }
}

/// Parameters of one copy run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyRequest {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    /// Glob patterns, processed in order
    pub search_patterns: Vec<String>,
    /// Descend into subfolders of the source
    pub recursive: bool,
    /// Delete each source file after a successful copy
    pub delete_on_copy: bool,
}

impl CopyRequest {
    /// Create a request from a `;`-delimited pattern list
    pub fn new(
        source_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        search_patterns: &str,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            search_patterns: split_patterns(search_patterns),
            recursive: false,
            delete_on_copy: false,
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn delete_on_copy(mut self, delete: bool) -> Self {
        self.delete_on_copy = delete;
        self
    }

    /// Check the request before any file is touched
    pub fn validate(&self) -> Result<()> {
        let source_blank = is_blank(&self.source_dir);
        let dest_blank = is_blank(&self.dest_dir);

        match (source_blank, dest_blank) {
            (true, true) => {
                return Err(OrganizeError::InvalidArgument(
                    "You must tell me what to copy and where to copy it.".to_string(),
                ))
            }
            (true, false) => {
                return Err(OrganizeError::InvalidArgument(
                    "You must tell me what folder to search.".to_string(),
                ))
            }
            (false, true) => {
                return Err(OrganizeError::InvalidArgument(
                    "You must tell me where to place the pictures.".to_string(),
                ))
            }
            (false, false) => {}
        }

        if !self.source_dir.is_dir() {
            return Err(OrganizeError::NotFound {
                which: PathRole::Source,
                path: self.source_dir.clone(),
            });
        }
        if !self.dest_dir.is_dir() {
            return Err(OrganizeError::NotFound {
                which: PathRole::Destination,
                path: self.dest_dir.clone(),
            });
        }

        Ok(())
    }
}

fn is_blank(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().trim().is_empty()
}

/// Split a `;`-delimited pattern list, dropping blank entries.
///
/// Order and repeats are kept: a file matching two patterns is
/// processed once per pattern.
pub fn split_patterns(patterns: &str) -> Vec<String> {
    patterns
        .split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Result of a copy run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub files_copied: usize,
    pub duplicates_skipped: usize,
    /// Number of Error events emitted
    pub errors: usize,
    pub cancelled: bool,
    pub duration_ms: u64,
}
