//! Tracing sink - writes events to `tracing`.

use tidings_core::{EmitResult, Event, EventCategory, EventRef, Events};
use tracing::{Level, field::display};

/// Emit a `tracing` event at a level only known at runtime.
macro_rules! event_at {
    ($level:expr, $($args:tt)+) => {{
        let level = $level;
        if level == Level::ERROR {
            tracing::error!($($args)+)
        } else if level == Level::WARN {
            tracing::warn!($($args)+)
        } else if level == Level::INFO {
            tracing::info!($($args)+)
        } else if level == Level::DEBUG {
            tracing::debug!($($args)+)
        } else {
            tracing::trace!($($args)+)
        }
    }};
}

/// A terminal sink that writes every event to `tracing`.
///
/// Events in the [`EventCategory::ERROR`] category are always written at
/// `ERROR`; everything else uses the configured level (`INFO` by default).
/// Attached metadata is rendered as a single `metadata` field.
///
/// # Example
///
/// ```rust
/// use tidings_std::{Level, sinks::TracingEvents};
///
/// let sink = TracingEvents::named("billing").level(Level::DEBUG);
/// ```
#[derive(Clone, Debug)]
pub struct TracingEvents {
    name: &'static str,
    level: Level,
}

impl TracingEvents {
    /// Create a `TracingEvents` sink with a default name.
    pub fn new() -> Self {
        Self::named("events")
    }

    /// Create a `TracingEvents` sink with a custom name.
    ///
    /// The name is recorded with every event to identify the pipeline.
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            level: Level::INFO,
        }
    }

    /// Set the level for events outside the error category.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// The level `event` will be written at.
    pub fn level_for(&self, event: &dyn Event) -> Level {
        match event.category() {
            Some(category) if category == EventCategory::ERROR => Level::ERROR,
            _ => self.level,
        }
    }
}

impl Default for TracingEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl Events for TracingEvents {
    fn emit(&self, event: &EventRef) -> EmitResult {
        let level = self.level_for(event.as_ref());
        let category = event.category();
        let category = category.as_ref().map(display);
        let metadata = event.metadata().map(display);
        let underlying = event.underlying();

        event_at!(
            level,
            name = %self.name,
            event = ?underlying,
            category,
            metadata,
            "event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::capture_logs;
    use tidings_core::{ErrorEvent, EventExt};

    #[test]
    fn test_errors_are_logged_at_error_level() {
        let sink = TracingEvents::named("test").level(Level::DEBUG);

        let error = ErrorEvent::new("boom").with_metadata("k", "v").into_ref();
        assert_eq!(sink.level_for(error.as_ref()), Level::ERROR);

        let plain = "started".into_ref();
        assert_eq!(sink.level_for(plain.as_ref()), Level::DEBUG);
    }

    #[test]
    fn test_error_record_carries_fields() {
        let sink = TracingEvents::named("billing").level(Level::DEBUG);

        let logs = capture_logs(|| {
            let event = ErrorEvent::new("boom").with_metadata("k", "v");
            assert!(sink.emit_event(event).is_ok());
        });

        assert!(logs.contains("ERROR"), "{logs}");
        assert!(logs.contains("name=billing"), "{logs}");
        assert!(logs.contains(r#"message: "boom""#), "{logs}");
        assert!(logs.contains("category=error"), "{logs}");
        assert!(logs.contains("metadata={k=v}"), "{logs}");
    }

    #[test]
    fn test_plain_record_uses_configured_level() {
        let sink = TracingEvents::new().level(Level::DEBUG);

        let logs = capture_logs(|| {
            assert!(sink.emit_event("started").is_ok());
        });

        assert!(logs.contains("DEBUG"), "{logs}");
        assert!(logs.contains("name=events"), "{logs}");
        assert!(logs.contains(r#"event="started""#), "{logs}");
        assert!(!logs.contains("category="), "{logs}");
        assert!(!logs.contains("metadata="), "{logs}");
    }
}
