//! # Core Module
//!
//! The UI-agnostic organizing engine.
//!
//! ## Modules
//! - `date` - Resolves the capture date of a file
//! - `comparator` - Byte-for-byte content equality
//! - `fs` - File system seam used by the engine
//! - `organize` - Plans destinations and runs copies

pub mod comparator;
pub mod date;
pub mod fs;
pub mod organize;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use comparator::ContentComparator;
pub use date::{DatePrecedence, DateResolver, DateSource, ResolvedDate};
pub use fs::{FileSystem, LocalFileSystem};
pub use organize::{CopyEngine, CopyRequest, FolderStructure, RunSummary};
