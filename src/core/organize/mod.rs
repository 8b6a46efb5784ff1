//! Photo organization module.
//!
//! Copies media into `<destination>/<year>/<month>/` folders, skipping files
//! that already exist there with identical content.

mod cancel;
mod executor;
mod planner;
mod scanner;
mod types;

pub use cancel::CancellationToken;
pub use executor::{
    CopyEngine, CopyEngineBuilder, RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY,
};
pub use planner::{DestinationPlanner, DEFAULT_MAX_PROBES};
pub use scanner::PatternScanner;
pub use types::*;

use crate::error::Result;
use crate::events::ProgressSink;
use std::path::Path;

/// Copy every file under `source` matching the `;`-delimited
/// `search_patterns` into date folders under `destination`.
///
/// Returns the number of files actually copied.
pub fn copy<S: ProgressSink + ?Sized>(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    search_patterns: &str,
    recursive: bool,
    delete_on_copy: bool,
    progress: &S,
) -> Result<usize> {
    let request = CopyRequest::new(
        source.as_ref(),
        destination.as_ref(),
        search_patterns,
    )
    .recursive(recursive)
    .delete_on_copy(delete_on_copy);

    let summary = CopyEngine::builder().build().run(&request, progress)?;
    Ok(summary.files_copied)
}
