//! # Error Module
//!
//! Error types for the photo date organizer.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, patterns, what went wrong
//! - **Only validation is fatal** - everything that happens mid-run is
//!   reported as a progress event and the run carries on

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum OrganizeError {
    /// A required argument was blank
    #[error("{0}")]
    InvalidArgument(String),

    /// The source or destination directory does not exist
    #[error("The {which} that you indicated does not exist: {path}")]
    NotFound { which: PathRole, path: PathBuf },

    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Planning error: {0}")]
    Plan(#[from] PlanError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Which side of a copy request a path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    Source,
    Destination,
}

impl std::fmt::Display for PathRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathRole::Source => write!(f, "Source"),
            PathRole::Destination => write!(f, "Destination"),
        }
    }
}

/// Errors that occur while enumerating a search pattern
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid search pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while choosing a destination path
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Gave up finding a free name for {path} after {limit} numbered variants")]
    CollisionLimit { path: PathBuf, limit: usize },

    #[error("Failed to create folder {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to compare {path} with {existing}: {source}")]
    Compare {
        path: PathBuf,
        existing: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, OrganizeError>;
