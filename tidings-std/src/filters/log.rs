//! Logging filter - observability for event pipelines.

use crate::sinks::TracingEvents;
use tidings_core::{EventFilter, Events, SharedEvents};
use tracing::Level;

/// A filter that logs every event with `tracing`, then forwards it.
///
/// Place it outermost to see events as producers emitted them, or just before
/// the terminal sink to see them fully enriched.
///
/// # Example
///
/// ```rust
/// use tidings_core::EventFilter;
/// use tidings_std::{Level, filters::{AddEventName, LogEvents}, sinks::NoOp};
///
/// let events = LogEvents::named("checkout")
///     .level(Level::DEBUG)
///     .then(AddEventName::new())
///     .then_sink(NoOp);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LogEvents {
    sink: TracingEvents,
}

impl LogEvents {
    /// Create a new `LogEvents` filter with a default name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new `LogEvents` filter with a custom name.
    ///
    /// The name is used in log records to identify the pipeline stage.
    pub fn named(name: &'static str) -> Self {
        Self {
            sink: TracingEvents::named(name),
        }
    }

    /// Set the level for events outside the error category.
    pub fn level(self, level: Level) -> Self {
        Self {
            sink: self.sink.level(level),
        }
    }
}

impl EventFilter for LogEvents {
    fn apply(&self, next: SharedEvents) -> SharedEvents {
        self.sink.clone().then(next).shared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingEvents, RecordingEvents, capture_logs};
    use tidings_core::{ErrorEvent, EventExt};

    #[test]
    fn test_log_events_logs_then_forwards() {
        let recorder = RecordingEvents::new();
        let events = LogEvents::named("checkout").then_sink(recorder.clone());

        let logs = capture_logs(|| {
            events.emit_event(ErrorEvent::new("boom")).unwrap();
            events.emit_event("started".with_metadata("retry", 3)).unwrap();
        });

        assert_eq!(recorder.count(), 2);
        let lines: Vec<_> = logs.lines().collect();
        assert_eq!(lines.len(), 2, "{logs}");
        assert!(lines[0].contains("ERROR") && lines[0].contains("category=error"));
        assert!(lines[1].contains("INFO") && lines[1].contains("metadata={retry=3}"));
        assert!(lines.iter().all(|line| line.contains("name=checkout")));
    }

    #[test]
    fn test_log_events_propagates_failure() {
        let events = LogEvents::new().then_sink(FailingEvents::new("exporter offline"));

        let mut result = Ok(());
        let logs = capture_logs(|| result = events.emit_event("started"));

        assert_eq!(result.unwrap_err().to_string(), "sink failed: exporter offline");
        assert!(logs.contains(r#"event="started""#), "{logs}");
    }
}
