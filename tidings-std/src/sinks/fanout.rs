//! Fan-out and no-op sinks.

use tidings_core::{EmitResult, EventRef, Events, SharedEvents};

/// A sink that emits every event to a list of sinks, in order.
///
/// Semantics match a chain of [`Events::then`]: the first failing sink stops
/// the fan-out and its error is returned.
///
/// # Example
///
/// ```rust
/// use tidings_std::sinks::{Fanout, NoOp, TracingEvents};
///
/// let sink = Fanout::new().with(TracingEvents::new()).with(NoOp);
/// assert_eq!(sink.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct Fanout {
    sinks: Vec<SharedEvents>,
}

impl Fanout {
    /// Create an empty fan-out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink after the existing ones.
    pub fn with(mut self, sink: impl Events) -> Self {
        self.sinks.push(sink.shared());
        self
    }

    /// Number of sinks.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Returns `true` if there are no sinks.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl FromIterator<SharedEvents> for Fanout {
    fn from_iter<I: IntoIterator<Item = SharedEvents>>(iter: I) -> Self {
        Self {
            sinks: iter.into_iter().collect(),
        }
    }
}

impl Events for Fanout {
    fn emit(&self, event: &EventRef) -> EmitResult {
        self.sinks.iter().try_for_each(|sink| sink.emit(event))
    }
}

/// A sink that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOp;

impl Events for NoOp {
    fn emit(&self, _event: &EventRef) -> EmitResult {
        Ok(())
    }
}
