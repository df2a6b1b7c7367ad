//! # Sinks (Events)
//!
//! A sink is a single-argument procedure invoked for its side effect:
//! recording, logging or counting the event it receives.
//!
//! Sinks are synchronous. A failing sink returns an error (or panics) and that
//! failure reaches the emitter exactly as it was raised; nothing in the
//! pipeline catches, logs or suppresses it.

use crate::{
    error::BoxError,
    event::{Event, EventRef},
};
use std::sync::Arc;

/// The outcome of emitting an event to a sink.
pub type EmitResult = Result<(), BoxError>;

/// A type-erased, shareable sink.
pub type SharedEvents = Arc<dyn Events>;

/// A sink of events.
///
/// # Example
///
/// ```rust
/// use tidings_core::{Events, sink_fn};
///
/// let console = sink_fn(|event| {
///     println!("{event:?}");
///     Ok(())
/// });
/// let audit = sink_fn(|_event| Ok(()));
///
/// let events = console.then(audit);
/// events.emit_event(String::from("started")).unwrap();
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an event sink",
    label = "missing `Events` implementation",
    note = "Wrap closures with `sink_fn` to turn them into sinks."
)]
pub trait Events: Send + Sync + 'static {
    /// Observe an event.
    fn emit(&self, event: &EventRef) -> EmitResult;

    /// Share `event` and emit it.
    fn emit_event<E: Event>(&self, event: E) -> EmitResult
    where
        Self: Sized,
    {
        let event: EventRef = Arc::new(event);
        self.emit(&event)
    }

    /// Emit to this sink, then to `next`, with the same event.
    ///
    /// If this sink fails, `next` is not invoked and the failure is returned.
    fn then<Next>(self, next: Next) -> Then<Self, Next>
    where
        Self: Sized,
        Next: Events,
    {
        Then {
            first: self,
            second: next,
        }
    }

    /// Erase the type of this sink.
    fn shared(self) -> SharedEvents
    where
        Self: Sized,
    {
        Arc::new(self)
    }
}

impl Events for Arc<dyn Events> {
    fn emit(&self, event: &EventRef) -> EmitResult {
        (**self).emit(event)
    }
}

impl Events for Box<dyn Events> {
    fn emit(&self, event: &EventRef) -> EmitResult {
        (**self).emit(event)
    }
}

/// Two sinks invoked in sequence. See [`Events::then`].
#[derive(Clone, Debug)]
pub struct Then<A, B> {
    first: A,
    second: B,
}

impl<A: Events, B: Events> Events for Then<A, B> {
    fn emit(&self, event: &EventRef) -> EmitResult {
        self.first.emit(event)?;
        self.second.emit(event)
    }
}

/// A sink backed by a closure. See [`sink_fn`].
#[derive(Clone, Copy)]
pub struct SinkFn<F> {
    f: F,
}

impl<F> Events for SinkFn<F>
where
    F: Fn(&EventRef) -> EmitResult + Send + Sync + 'static,
{
    fn emit(&self, event: &EventRef) -> EmitResult {
        (self.f)(event)
    }
}

/// Build a sink from a closure.
pub fn sink_fn<F>(f: F) -> SinkFn<F>
where
    F: Fn(&EventRef) -> EmitResult + Send + Sync + 'static,
{
    SinkFn { f }
}
