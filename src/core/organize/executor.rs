//! The copy engine.

use super::cancel::CancellationToken;
use super::planner::{DestinationPlanner, DEFAULT_MAX_PROBES};
use super::scanner::PatternScanner;
use super::types::*;
use crate::core::date::{DatePrecedence, DateResolver};
use crate::core::fs::{is_transient, FileSystem, LocalFileSystem};
use crate::error::{OrganizeError, PlanError, Result};
use crate::events::{ProgressSink, ProgressStatus};
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How often a locked file is tried before it is skipped
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Pause between attempts on a locked file
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Bounded retry for files held by another process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Builder for engine configuration
pub struct CopyEngineBuilder {
    fs: Option<Arc<dyn FileSystem>>,
    structure: FolderStructure,
    precedence: DatePrecedence,
    retry: RetryPolicy,
    max_probes: usize,
    follow_symlinks: bool,
    cancel: CancellationToken,
}

impl CopyEngineBuilder {
    pub fn new() -> Self {
        Self {
            fs: None,
            structure: FolderStructure::default(),
            precedence: DatePrecedence::default(),
            retry: RetryPolicy::default(),
            max_probes: DEFAULT_MAX_PROBES,
            follow_symlinks: false,
            cancel: CancellationToken::new(),
        }
    }

    /// Set the file system backend
    pub fn file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = Some(fs);
        self
    }

    pub fn structure(mut self, structure: FolderStructure) -> Self {
        self.structure = structure;
        self
    }

    pub fn date_precedence(mut self, precedence: DatePrecedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// Attempts per locked file (at least one)
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.retry.max_attempts = attempts.max(1);
        self
    }

    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry.delay = delay;
        self
    }

    pub fn max_probes(mut self, max_probes: usize) -> Self {
        self.max_probes = max_probes;
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Let a host stop the run between files
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Build the engine
    pub fn build(self) -> CopyEngine {
        let fs = self.fs.unwrap_or_else(|| Arc::new(LocalFileSystem));
        CopyEngine {
            planner: DestinationPlanner::new(fs.clone())
                .with_structure(self.structure)
                .with_max_probes(self.max_probes),
            fs,
            resolver: DateResolver::new(self.precedence),
            scanner: PatternScanner::new().follow_symlinks(self.follow_symlinks),
            retry: self.retry,
            cancel: self.cancel,
        }
    }
}

impl Default for CopyEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// State of one run, threaded through the call chain
struct RunContext<'a> {
    request: &'a CopyRequest,
    files_copied: usize,
    duplicates_skipped: usize,
    errors: usize,
    cancelled: bool,
}

impl<'a> RunContext<'a> {
    fn new(request: &'a CopyRequest) -> Self {
        Self {
            request,
            files_copied: 0,
            duplicates_skipped: 0,
            errors: 0,
            cancelled: false,
        }
    }

    fn error<S: ProgressSink + ?Sized>(&mut self, sink: &S, message: String) {
        warn!("{}", message);
        self.errors += 1;
        sink.report(ProgressStatus::error(message));
    }
}

/// Outcome of copying one file
enum Transfer {
    Copied,
    GaveUp { attempts: u32, error: io::Error },
    Cancelled,
}

/// Copies media into a date-organized destination tree
pub struct CopyEngine {
    fs: Arc<dyn FileSystem>,
    resolver: DateResolver,
    planner: DestinationPlanner,
    scanner: PatternScanner,
    retry: RetryPolicy,
    cancel: CancellationToken,
}

impl CopyEngine {
    /// Create a new engine builder
    pub fn builder() -> CopyEngineBuilder {
        CopyEngineBuilder::new()
    }

    /// Run a copy request, reporting progress to `sink`.
    ///
    /// Only an invalid request fails the run. Problems with single files or
    /// patterns are reported as Error events and the run continues.
    pub fn run<S: ProgressSink + ?Sized>(
        &self,
        request: &CopyRequest,
        sink: &S,
    ) -> Result<RunSummary> {
        request.validate()?;

        let start = Instant::now();
        let mut run = RunContext::new(request);

        for pattern in &request.search_patterns {
            if self.cancel.is_cancelled() {
                run.cancelled = true;
            }
            if run.cancelled {
                break;
            }
            if let Err(e) = self.copy_pattern(&mut run, pattern, sink) {
                run.error(sink, e.to_string());
            }
        }

        let message = if run.cancelled {
            format!("Cancelled after copying {} {}.", run.files_copied, plural(run.files_copied))
        } else {
            format!("Copied {} {}.", run.files_copied, plural(run.files_copied))
        };
        info!(
            copied = run.files_copied,
            duplicates = run.duplicates_skipped,
            errors = run.errors,
            cancelled = run.cancelled,
            "copy run finished"
        );
        sink.report(ProgressStatus::complete(message, run.files_copied));

        Ok(RunSummary {
            files_copied: run.files_copied,
            duplicates_skipped: run.duplicates_skipped,
            errors: run.errors,
            cancelled: run.cancelled,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn copy_pattern<S: ProgressSink + ?Sized>(
        &self,
        run: &mut RunContext<'_>,
        pattern: &str,
        sink: &S,
    ) -> Result<()> {
        let files = self
            .scanner
            .scan(&run.request.source_dir, pattern, run.request.recursive)?;

        let total = files.len();
        info!(pattern, total, "copying pattern");
        sink.report(ProgressStatus::initialize(
            format!("Copying {} {} {}.", total, pattern, plural(total)),
            total,
        ));

        for file in &files {
            if self.cancel.is_cancelled() {
                run.cancelled = true;
                return Ok(());
            }
            self.copy_file(run, file, total, sink)?;
            if run.cancelled {
                return Ok(());
            }
        }

        Ok(())
    }

    fn copy_file<S: ProgressSink + ?Sized>(
        &self,
        run: &mut RunContext<'_>,
        file: &Path,
        batch_total: usize,
        sink: &S,
    ) -> Result<()> {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());

        let resolved = self.resolver.resolve(file).map_err(|e| OrganizeError::Io {
            path: file.to_path_buf(),
            source: e,
        })?;
        debug!(path = %file.display(), date = %resolved.date, source = %resolved.source, "resolved capture date");

        let plan = match self.planner.plan(file, resolved.date, &run.request.dest_dir) {
            Ok(plan) => plan,
            Err(e @ PlanError::CollisionLimit { .. }) => {
                run.error(sink, e.to_string());
                sink.report(ProgressStatus::file_copy(
                    format!("skipped {}", name),
                    batch_total,
                ));
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let message = match plan.action {
            PlanAction::SkipDuplicate => {
                run.duplicates_skipped += 1;
                debug!(path = %file.display(), existing = %plan.destination.display(), "duplicate, not copying");
                format!("{} already exists at {}", name, plan.destination.display())
            }
            PlanAction::Copy => match self.transfer(file, &plan.destination)? {
                Transfer::Copied => {
                    run.files_copied += 1;
                    if run.request.delete_on_copy {
                        self.delete_source(run, file, sink);
                    }
                    format!("copy {} to {}", name, plan.destination.display())
                }
                Transfer::GaveUp { attempts, error } => {
                    run.error(
                        sink,
                        format!(
                            "Could not copy {} after {} attempts: {}",
                            file.display(),
                            attempts,
                            error
                        ),
                    );
                    format!("skipped {}", name)
                }
                Transfer::Cancelled => {
                    run.cancelled = true;
                    return Ok(());
                }
            },
        };

        sink.report(ProgressStatus::file_copy(message, batch_total));
        Ok(())
    }

    /// Copy with bounded retry while the file is locked
    fn transfer(&self, from: &Path, to: &Path) -> Result<Transfer> {
        let mut attempt = 1;
        loop {
            match self.fs.copy_new(from, to) {
                Ok(bytes) => {
                    debug!(from = %from.display(), to = %to.display(), bytes, "copied");
                    return Ok(Transfer::Copied);
                }
                Err(e) if is_transient(&e) => {
                    if attempt >= self.retry.max_attempts {
                        return Ok(Transfer::GaveUp { attempts: attempt, error: e });
                    }
                    warn!(path = %from.display(), attempt, error = %e, "file is locked, retrying");
                    if self.cancel.wait(self.retry.delay) {
                        return Ok(Transfer::Cancelled);
                    }
                    attempt += 1;
                }
                Err(e) => {
                    return Err(OrganizeError::Io {
                        path: from.to_path_buf(),
                        source: e,
                    })
                }
            }
        }
    }

    fn delete_source<S: ProgressSink + ?Sized>(
        &self,
        run: &mut RunContext<'_>,
        file: &Path,
        sink: &S,
    ) {
        match self.fs.is_read_only(file) {
            Ok(true) => run.error(
                sink,
                format!("Cannot delete because it is read only: {}", file.display()),
            ),
            Ok(false) => {
                if let Err(e) = self.fs.remove_file(file) {
                    run.error(sink, format!("Cannot delete {}: {}", file.display(), e));
                }
            }
            Err(e) => run.error(sink, format!("Cannot delete {}: {}", file.display(), e)),
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "file"
    } else {
        "files"
    }
}
