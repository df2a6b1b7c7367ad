//! Testing utilities for Tidings.
//!
//! This module provides sinks that make testing filters and pipelines easier.
//!
//! # Features
//!
//! - [`RecordingEvents`]: A sink that records every event it receives
//! - [`CountingEvents`]: A sink that only counts invocations
//! - [`FailingEvents`]: A sink that always fails

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use thiserror::Error;
use tidings_core::{EmitResult, EventRef, Events};

// ============================================================================
// Recording Sink
// ============================================================================

/// A sink that records all events it receives.
///
/// Clones share the same record, so keep one handle for assertions and move
/// the other into the pipeline.
///
/// # Example
///
/// ```rust
/// use tidings_core::Events;
/// use tidings_std::testing::RecordingEvents;
///
/// let recorder = RecordingEvents::new();
/// let sink = recorder.clone();
///
/// sink.emit_event("started").unwrap();
///
/// assert_eq!(recorder.count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RecordingEvents {
    events: Arc<Mutex<Vec<EventRef>>>,
}

impl RecordingEvents {
    /// Create a new recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the recorded events.
    pub fn events(&self) -> Vec<EventRef> {
        self.events.lock().unwrap().clone()
    }

    /// The most recent event.
    pub fn last(&self) -> Option<EventRef> {
        self.events.lock().unwrap().last().cloned()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Events for RecordingEvents {
    fn emit(&self, event: &EventRef) -> EmitResult {
        self.events.lock().unwrap().push(Arc::clone(event));
        Ok(())
    }
}

// ============================================================================
// Counting Sink
// ============================================================================

/// A sink that counts invocations.
#[derive(Clone, Default)]
pub struct CountingEvents {
    count: Arc<AtomicUsize>,
}

impl CountingEvents {
    /// Create a new counting sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Events for CountingEvents {
    fn emit(&self, _event: &EventRef) -> EmitResult {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Failing Sink
// ============================================================================

/// The error returned by [`FailingEvents`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("sink failed: {0}")]
pub struct SinkFailure(pub String);

/// A sink that fails on every event.
#[derive(Clone, Debug)]
pub struct FailingEvents {
    reason: String,
}

impl FailingEvents {
    /// Create a sink failing with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Events for FailingEvents {
    fn emit(&self, _event: &EventRef) -> EmitResult {
        Err(Box::new(SinkFailure(self.reason.clone())))
    }
}

// ============================================================================
// Log Capture
// ============================================================================

#[cfg(test)]
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a plain-text `fmt` subscriber and returns what it wrote.
#[cfg(test)]
pub(crate) fn capture_logs(f: impl FnOnce()) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(tracing::Level::TRACE)
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = logs.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}
