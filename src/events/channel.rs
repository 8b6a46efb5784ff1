//! Event channel implementation using crossbeam-channel.
//!
//! Provides a thread-safe way to send progress events from the engine
//! to any UI layer.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use super::{ProgressSink, ProgressStatus};

/// Sends progress events from the engine.
///
/// This is a thin wrapper around crossbeam's Sender that can be
/// cloned and sent across threads.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<ProgressStatus>,
}

impl EventSender {
    /// Create a new EventSender from a raw crossbeam sender.
    pub fn new(sender: Sender<ProgressStatus>) -> Self {
        Self { inner: sender }
    }

    /// Send an event. Non-blocking if the channel isn't full.
    ///
    /// If the receiver is dropped, the event is silently discarded.
    pub fn send(&self, event: ProgressStatus) {
        let _ = self.inner.send(event);
    }
}

impl ProgressSink for EventSender {
    fn report(&self, status: ProgressStatus) {
        self.send(status);
    }
}

/// Receives progress events from the engine.
pub struct EventReceiver {
    inner: Receiver<ProgressStatus>,
}

impl EventReceiver {
    /// Returns an iterator over received events
    pub fn iter(&self) -> impl Iterator<Item = ProgressStatus> + '_ {
        self.inner.iter()
    }

    /// Collect everything queued so far without blocking
    pub fn drain(&self) -> Vec<ProgressStatus> {
        self.inner.try_iter().collect()
    }
}

/// A channel connecting the engine to a UI layer.
pub struct EventChannel;

impl EventChannel {
    /// Create a new unbounded event channel.
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }

    /// Create a bounded event channel with the specified capacity.
    ///
    /// The engine blocks on a full channel, so a slow UI applies
    /// backpressure to the copy loop.
    pub fn bounded(capacity: usize) -> (EventSender, EventReceiver) {
        let (sender, receiver) = bounded(capacity);
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        EventChannel
    }
}
