//! Predicate filter - forwards matching events and drops the rest.

use std::{fmt, sync::Arc};
use tidings_core::{Event, EventCategory, EventFilter, Events, SharedEvents, sink_fn};

type Predicate = Arc<dyn Fn(&dyn Event) -> bool + Send + Sync>;

/// A filter that only lets matching events reach the next sink.
///
/// Dropped events are silently discarded; the emitter still sees success.
///
/// # Example
///
/// ```rust
/// use tidings_core::EventFilter;
/// use tidings_std::{filters::Only, sinks::TracingEvents};
///
/// let errors_only = Only::category("error").then_sink(TracingEvents::new());
/// ```
#[derive(Clone)]
pub struct Only {
    predicate: Predicate,
}

impl Only {
    /// Keep events for which `predicate` returns `true`.
    pub fn new<P>(predicate: P) -> Self
    where
        P: Fn(&dyn Event) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Keep events classified under `category`.
    pub fn category(category: impl Into<EventCategory>) -> Self {
        let category = category.into();
        Self::new(move |event| event.category().as_ref() == Some(&category))
    }

    /// Keep events whose underlying type is `E`, decorated or not.
    pub fn of<E: Event>() -> Self {
        Self::new(|event| event.underlying().is::<E>())
    }
}

impl fmt::Debug for Only {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Only").finish_non_exhaustive()
    }
}

impl EventFilter for Only {
    fn apply(&self, next: SharedEvents) -> SharedEvents {
        let predicate = Arc::clone(&self.predicate);
        sink_fn(move |event| {
            if predicate(event.as_ref()) {
                next.emit(event)
            } else {
                Ok(())
            }
        })
        .shared()
    }
}
