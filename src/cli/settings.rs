//! Remembered source and destination folders.

use photo_date_organizer::error::{OrganizeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "photo-date-organizer";
const FILE_NAME: &str = "settings.json";

/// Folders used by the last successful copy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub last_source: Option<PathBuf>,
    #[serde(default)]
    pub last_destination: Option<PathBuf>,
}

impl Settings {
    /// Default location under the user's config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    /// Load settings, treating a missing file as empty
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(OrganizeError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        serde_json::from_str(&contents).map_err(|e| {
            OrganizeError::Config(format!("Invalid settings file {}: {}", path.display(), e))
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| OrganizeError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| OrganizeError::Config(e.to_string()))?;
        fs::write(path, json).map_err(|e| OrganizeError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load(&temp.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("settings.json");
        let settings = Settings {
            last_source: Some(PathBuf::from("/camera")),
            last_destination: Some(PathBuf::from("/pictures")),
        };

        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn garbage_is_a_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            Settings::load(&path),
            Err(OrganizeError::Config(_))
        ));
    }
}
