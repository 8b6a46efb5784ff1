//! # Events Module
//!
//! Progress reporting for the copy engine.
//!
//! ## Design
//! The engine reports every step to an injected [`ProgressSink`]. A sink can
//! be a plain closure or an [`EventSender`], which forwards events over a
//! channel so any UI (CLI, GUI) can render them on its own thread.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         println!("{}: {} ({})", event.code, event.status, event.file_count);
//!     }
//! });
//!
//! engine.run(&request, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{EventChannel, EventReceiver, EventSender};
pub use types::*;

/// Receives progress events synchronously from the engine's thread.
pub trait ProgressSink {
    fn report(&self, status: ProgressStatus);
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressStatus),
{
    fn report(&self, status: ProgressStatus) {
        self(status)
    }
}
