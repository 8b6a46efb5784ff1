//! # CLI Module
//!
//! Command-line interface for the photo date organizer.
//!
//! ## Usage
//! ```bash
//! # Copy everything from a camera card into ~/Pictures/<year>/<month>/
//! photo-organize copy /media/card ~/Pictures --recursive
//!
//! # Reuse the folders from the last run
//! photo-organize copy
//!
//! # Only videos, moving instead of copying
//! photo-organize copy /media/card ~/Videos --patterns "*.mp4;*.mov" --delete
//!
//! # Show which date a file would be filed under
//! photo-organize resolve IMG_20210304_153000.jpg
//! ```

mod settings;

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_date_organizer::core::date::{DatePrecedence, DateResolver};
use photo_date_organizer::core::organize::{CopyEngine, CopyRequest, FolderStructure, RunSummary};
use photo_date_organizer::error::Result;
use photo_date_organizer::events::{EventChannel, StatusCode};
use settings::Settings;
use std::path::PathBuf;
use std::thread;

/// Patterns used when none are given
const DEFAULT_PATTERNS: &str = "*.jpg;*.jpeg;*.png;*.bmp;*.heic;*.mp4;*.mov";

const EVENT_QUEUE_CAPACITY: usize = 256;

/// Photo Date Organizer - File pictures by the day they were taken
#[derive(Parser, Debug)]
#[command(name = "photo-organize")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy media into year/month folders
    Copy {
        /// Folder to search (defaults to the last one used)
        source: Option<PathBuf>,

        /// Folder to place the pictures in (defaults to the last one used)
        destination: Option<PathBuf>,

        /// Search patterns, separated by ';'
        #[arg(short, long, default_value = DEFAULT_PATTERNS)]
        patterns: String,

        /// Search subfolders too
        #[arg(short, long)]
        recursive: bool,

        /// Delete each source file once it has been copied
        #[arg(long)]
        delete: bool,

        /// Name month folders 01..12 instead of 1..12
        #[arg(long)]
        padded_months: bool,

        /// Prefer embedded EXIF dates over dates in file names
        #[arg(long)]
        embedded_first: bool,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the date each file would be filed under
    Resolve {
        /// Files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Prefer embedded EXIF dates over dates in file names
        #[arg(long)]
        embedded_first: bool,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

struct CopyOptions {
    source: Option<PathBuf>,
    destination: Option<PathBuf>,
    patterns: String,
    recursive: bool,
    delete: bool,
    structure: FolderStructure,
    precedence: DatePrecedence,
    output: OutputFormat,
    verbose: bool,
}

fn precedence(embedded_first: bool) -> DatePrecedence {
    if embedded_first {
        DatePrecedence::EmbeddedFirst
    } else {
        DatePrecedence::FilenameOverrides
    }
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Copy {
            source,
            destination,
            patterns,
            recursive,
            delete,
            padded_months,
            embedded_first,
            output,
            verbose,
        } => {
            photo_date_organizer::init_tracing(if verbose { "debug" } else { "warn" });
            run_copy(CopyOptions {
                source,
                destination,
                patterns,
                recursive,
                delete,
                structure: if padded_months {
                    FolderStructure::YearMonthPadded
                } else {
                    FolderStructure::YearMonth
                },
                precedence: precedence(embedded_first),
                output,
                verbose,
            })
        }
        Commands::Resolve {
            files,
            embedded_first,
            output,
        } => {
            photo_date_organizer::init_tracing("warn");
            run_resolve(files, precedence(embedded_first), output)
        }
    }
}

fn run_copy(options: CopyOptions) -> Result<()> {
    let term = Term::stderr();

    let settings_path = Settings::default_path();
    let remembered = match &settings_path {
        Some(path) => Settings::load(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring unreadable settings");
            Settings::default()
        }),
        None => Settings::default(),
    };

    let source = options
        .source
        .or(remembered.last_source)
        .unwrap_or_default();
    let destination = options
        .destination
        .or(remembered.last_destination)
        .unwrap_or_default();

    let request = CopyRequest::new(&source, &destination, &options.patterns)
        .recursive(options.recursive)
        .delete_on_copy(options.delete);

    if matches!(options.output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Photo Date Organizer").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line(&format!(
            "  {} {} {}",
            style(source.display()).dim(),
            style("→").dim(),
            style(destination.display()).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let engine = CopyEngine::builder()
        .structure(options.structure)
        .date_precedence(options.precedence)
        .build();

    // Set up event handling; a full queue holds the engine back until the
    // progress bar catches up
    let (sender, receiver) = EventChannel::bounded(EVENT_QUEUE_CAPACITY);

    // Progress bar for pretty output
    let progress = if matches!(options.output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let verbose = options.verbose;

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        let mut errors = Vec::new();
        for event in receiver.iter() {
            match event.code {
                StatusCode::Initialize => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_length(event.file_count as u64);
                        pb.set_position(0);
                        pb.set_message(event.status.clone());
                    }
                }
                StatusCode::FileCopy => {
                    if let Some(ref pb) = progress_clone {
                        pb.inc(1);
                        if verbose {
                            pb.set_message(event.status.clone());
                        }
                    }
                }
                StatusCode::Error => {
                    if let Some(ref pb) = progress_clone {
                        pb.println(format!("{} {}", style("✗").red().bold(), event.status));
                    }
                    errors.push(event.status);
                }
                StatusCode::Complete => {
                    if let Some(ref pb) = progress_clone {
                        pb.finish_and_clear();
                    }
                }
            }
        }
        errors
    });

    let result = engine.run(&request, &sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    let errors = event_thread.join().unwrap_or_default();
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let summary = result?;

    if !summary.cancelled {
        if let Some(path) = &settings_path {
            let settings = Settings {
                last_source: Some(source),
                last_destination: Some(destination),
            };
            if let Err(e) = settings.save(path) {
                tracing::warn!(error = %e, "could not remember folders");
            }
        }
    }

    match options.output {
        OutputFormat::Pretty => print_pretty_summary(&term, &summary),
        OutputFormat::Json => print_json_summary(&summary, &errors)?,
    }

    Ok(())
}

fn print_pretty_summary(term: &Term, summary: &RunSummary) {
    let (marker, headline) = if summary.cancelled {
        (style("!").yellow().bold(), "Copy Cancelled")
    } else {
        (style("✓").green().bold(), "Copy Complete")
    };
    term.write_line(&format!("{} {}", marker, headline)).ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} files copied in {:.1}s",
        style(summary.files_copied).cyan(),
        summary.duration_ms as f64 / 1000.0
    ))
    .ok();
    term.write_line(&format!(
        "  {} duplicates already in place",
        style(summary.duplicates_skipped).cyan()
    ))
    .ok();
    if summary.errors > 0 {
        term.write_line(&format!(
            "  {} problems reported above",
            style(summary.errors).red()
        ))
        .ok();
    }
}

fn print_json_summary(summary: &RunSummary, errors: &[String]) -> Result<()> {
    let output = serde_json::json!({
        "files_copied": summary.files_copied,
        "duplicates_skipped": summary.duplicates_skipped,
        "errors": errors,
        "cancelled": summary.cancelled,
        "duration_ms": summary.duration_ms,
    });
    print_json(&output)
}

fn run_resolve(files: Vec<PathBuf>, precedence: DatePrecedence, output: OutputFormat) -> Result<()> {
    let term = Term::stdout();
    let resolver = DateResolver::new(precedence);
    let mut rows = Vec::new();

    for file in files {
        match resolver.resolve(&file) {
            Ok(resolved) => {
                match output {
                    OutputFormat::Pretty => {
                        term.write_line(&format!(
                            "{}  {}  {}",
                            style(resolved.date).cyan(),
                            file.display(),
                            style(format!("({})", resolved.source)).dim()
                        ))
                        .ok();
                    }
                    OutputFormat::Json => rows.push(serde_json::json!({
                        "path": file,
                        "date": resolved.date,
                        "source": resolved.source,
                    })),
                }
            }
            Err(e) => match output {
                OutputFormat::Pretty => {
                    Term::stderr()
                        .write_line(&format!(
                            "{} {}: {}",
                            style("✗").red().bold(),
                            file.display(),
                            e
                        ))
                        .ok();
                }
                OutputFormat::Json => rows.push(serde_json::json!({
                    "path": file,
                    "error": e.to_string(),
                })),
            },
        }
    }

    if matches!(output, OutputFormat::Json) {
        print_json(&serde_json::Value::Array(rows))?;
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| photo_date_organizer::OrganizeError::Config(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
