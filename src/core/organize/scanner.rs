//! Enumerates the files matched by one search pattern.

use crate::error::ScanError;
use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Finds files under a source folder whose names match a glob
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternScanner {
    follow_symlinks: bool,
}

impl PatternScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow symbolic links to directories while walking
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Compile a search pattern; matching ignores case
    pub fn matcher(pattern: &str) -> Result<GlobMatcher, ScanError> {
        GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .map(|glob| glob.compile_matcher())
            .map_err(|e| ScanError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.kind().to_string(),
            })
    }

    /// List files directly under `root` (or at any depth when `recursive`)
    /// whose file name matches `pattern`, in walk order.
    ///
    /// The first unreadable entry stops the scan.
    pub fn scan(
        &self,
        root: &Path,
        pattern: &str,
        recursive: bool,
    ) -> Result<Vec<PathBuf>, ScanError> {
        let matcher = Self::matcher(pattern)?;

        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(self.follow_symlinks);
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                ScanError::ReadDirectory {
                    path,
                    source: e.into(),
                }
            })?;

            if !entry.path().is_file() {
                continue;
            }
            if matcher.is_match(entry.file_name()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn matches_by_extension_ignoring_case() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a.jpg"));
        touch(&temp.path().join("b.JPG"));
        touch(&temp.path().join("c.png"));

        let files = PatternScanner::new()
            .scan(temp.path(), "*.jpg", false)
            .unwrap();

        assert_eq!(names(&files), vec!["a.jpg", "b.JPG"]);
    }

    #[test]
    fn top_level_only_without_recursion() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("top.jpg"));
        touch(&temp.path().join("nested").join("deep.jpg"));

        let files = PatternScanner::new()
            .scan(temp.path(), "*.jpg", false)
            .unwrap();

        assert_eq!(names(&files), vec!["top.jpg"]);
    }

    #[test]
    fn all_depths_with_recursion() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("top.jpg"));
        touch(&temp.path().join("nested").join("deep.jpg"));
        touch(&temp.path().join("nested").join("more").join("deeper.jpg"));

        let files = PatternScanner::new()
            .scan(temp.path(), "*.jpg", true)
            .unwrap();

        assert_eq!(names(&files), vec!["deep.jpg", "deeper.jpg", "top.jpg"]);
    }

    #[test]
    fn directories_are_not_matched() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("album.jpg")).unwrap();

        let files = PatternScanner::new()
            .scan(temp.path(), "*.jpg", true)
            .unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn hidden_files_are_included() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join(".hidden.jpg"));

        let files = PatternScanner::new()
            .scan(temp.path(), "*.jpg", false)
            .unwrap();

        assert_eq!(files.len(), 1);
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let temp = TempDir::new().unwrap();
        let error = PatternScanner::new()
            .scan(temp.path(), "[.jpg", false)
            .unwrap_err();

        assert!(matches!(error, ScanError::InvalidPattern { .. }));
    }

    #[test]
    fn missing_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = PatternScanner::new().scan(&temp.path().join("missing"), "*.jpg", false);

        assert!(matches!(result, Err(ScanError::ReadDirectory { .. })));
    }
}
