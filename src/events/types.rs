//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};

/// What a progress event is telling the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    /// A search pattern batch is starting; count is the batch size
    Initialize,
    /// A file was processed; count is the size of the current batch
    FileCopy,
    /// The run finished; count is the grand total copied
    Complete,
    /// Something went wrong but the run continues; count is zero
    Error,
}

/// A single progress event emitted by the copy engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStatus {
    pub code: StatusCode,
    /// Human-readable message
    pub status: String,
    pub file_count: usize,
}

impl ProgressStatus {
    pub fn initialize(status: impl Into<String>, total: usize) -> Self {
        Self {
            code: StatusCode::Initialize,
            status: status.into(),
            file_count: total,
        }
    }

    pub fn file_copy(status: impl Into<String>, batch_total: usize) -> Self {
        Self {
            code: StatusCode::FileCopy,
            status: status.into(),
            file_count: batch_total,
        }
    }

    pub fn complete(status: impl Into<String>, copied: usize) -> Self {
        Self {
            code: StatusCode::Complete,
            status: status.into(),
            file_count: copied,
        }
    }

    pub fn error(status: impl Into<String>) -> Self {
        Self {
            code: StatusCode::Error,
            status: status.into(),
            file_count: 0,
        }
    }

    pub fn is_error(&self) -> bool {
        self.code == StatusCode::Error
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusCode::Initialize => write!(f, "Initialize"),
            StatusCode::FileCopy => write!(f, "FileCopy"),
            StatusCode::Complete => write!(f, "Complete"),
            StatusCode::Error => write!(f, "Error"),
        }
    }
}
