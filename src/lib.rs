//! # Photo Date Organizer
//!
//! Copies photos and videos into a `year/month` folder tree, dated by the
//! time the picture was taken.
//!
//! ## Core Philosophy
//! - **Never overwrite** - Name collisions get a numbered copy
//! - **Never duplicate** - Files already present byte-for-byte are skipped
//! - **Keep going** - A bad file or pattern is reported, not fatal
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation layers:
//! - `core` - Date resolution, planning and the copy engine
//! - `events` - Event-driven progress reporting
//! - `error` - User-friendly error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use crate::core::organize::copy;
pub use error::{OrganizeError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
/// `default_directive` applies when `RUST_LOG` is unset. Calling it twice
/// leaves the first subscriber in place.
pub fn init_tracing(default_directive: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
