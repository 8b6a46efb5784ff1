//! Destination planning for organization operations.

use super::types::{FolderStructure, Plan};
use crate::core::comparator::ContentComparator;
use crate::core::fs::FileSystem;
use crate::error::PlanError;
use chrono::NaiveDate;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Numbered variants tried before a collision is reported
pub const DEFAULT_MAX_PROBES: usize = 10_000;

/// Chooses destination paths and detects duplicates
pub struct DestinationPlanner {
    fs: Arc<dyn FileSystem>,
    comparator: ContentComparator,
    structure: FolderStructure,
    max_probes: usize,
}

impl DestinationPlanner {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            comparator: ContentComparator::new(fs.clone()),
            fs,
            structure: FolderStructure::default(),
            max_probes: DEFAULT_MAX_PROBES,
        }
    }

    pub fn with_structure(mut self, structure: FolderStructure) -> Self {
        self.structure = structure;
        self
    }

    pub fn with_max_probes(mut self, max_probes: usize) -> Self {
        self.max_probes = max_probes;
        self
    }

    /// Decide where `source` goes under `dest_root` and whether it still
    /// needs copying. Creates the date folder if it is missing.
    ///
    /// An existing file is never chosen as a copy target: an occupied name
    /// either holds the same bytes (skip) or pushes the copy to
    /// `name (1).ext`, `name (2).ext`, ...
    pub fn plan(
        &self,
        source: &Path,
        date: NaiveDate,
        dest_root: &Path,
    ) -> Result<Plan, PlanError> {
        let folder = dest_root.join(self.structure.folder_for(date));
        self.fs
            .create_dir_all(&folder)
            .map_err(|e| PlanError::CreateDirectory {
                path: folder.clone(),
                source: e,
            })?;

        let file_name = source.file_name().unwrap_or_else(|| source.as_os_str());
        let candidate = folder.join(file_name);

        if !self.fs.exists(&candidate) {
            return Ok(Plan::copy(candidate));
        }
        if self.same_content(source, &candidate)? {
            return Ok(Plan::skip_duplicate(candidate));
        }

        let name = Path::new(file_name);
        let stem = name.file_stem().unwrap_or(file_name);
        let extension = name.extension();

        for number in 1..=self.max_probes {
            let variant = folder.join(numbered_name(stem, extension, number));
            if !self.fs.exists(&variant) {
                return Ok(Plan::copy(variant));
            }
            if self.same_content(source, &variant)? {
                return Ok(Plan::skip_duplicate(variant));
            }
        }

        Err(PlanError::CollisionLimit {
            path: candidate,
            limit: self.max_probes,
        })
    }

    fn same_content(&self, source: &Path, existing: &Path) -> Result<bool, PlanError> {
        self.comparator
            .equal(source, existing)
            .map_err(|e| PlanError::Compare {
                path: source.to_path_buf(),
                existing: existing.to_path_buf(),
                source: e,
            })
    }
}

/// `photo (2).jpg` from `photo`, `jpg` and 2
fn numbered_name(stem: &OsStr, extension: Option<&OsStr>, number: usize) -> PathBuf {
    let mut name = OsString::from(stem);
    name.push(format!(" ({})", number));
    if let Some(extension) = extension {
        name.push(".");
        name.push(extension);
    }
    PathBuf::from(name)
}
