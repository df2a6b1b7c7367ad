//! # Event Filters
//!
//! An [`EventFilter`] turns the next sink in a pipeline into a new sink. The
//! returned sink can act before and after delegating to `next`: enrich the
//! event, drop it, measure how long the rest of the chain takes, or fan it out.
//!
//! # Composition
//!
//! - `a.then(b)` is the filter whose `apply(next)` is `a.apply(b.apply(next))`.
//!   `a` is the outermost stage, so its pre-logic runs first and its
//!   post-logic runs last.
//! - `a.then_sink(sink)` terminates a chain with a concrete sink.
//!
//! Composition is associative: `a.then(b).then(c)` and `a.then(b.then(c))`
//! produce the same nesting order around the terminal sink.
//!
//! # Example
//!
//! ```rust
//! use tidings_core::{EventExt, EventFilter, Events, attach, filter_fn, sink_fn};
//!
//! let tag_service = filter_fn(|next| {
//!     sink_fn(move |event| next.emit(&attach(event, "service", "billing").into_ref())).shared()
//! });
//!
//! let events = tag_service.then_sink(sink_fn(|event| {
//!     assert!(event.metadata().is_some());
//!     Ok(())
//! }));
//! events.emit_event("invoice.paid").unwrap();
//! ```

use crate::events::{Events, SharedEvents};
use std::sync::Arc;

/// A transformer from the next sink to a wrapped sink.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `EventFilter`",
    label = "missing `EventFilter` implementation",
    note = "Wrap closures with `filter_fn` to turn them into filters."
)]
pub trait EventFilter: Send + Sync + 'static {
    /// Wrap `next`, returning the sink that runs this stage.
    fn apply(&self, next: SharedEvents) -> SharedEvents;

    /// Compose with `next`, which runs inside this filter.
    fn then<Next>(self, next: Next) -> Chain<Self, Next>
    where
        Self: Sized,
        Next: EventFilter,
    {
        Chain {
            outer: self,
            inner: next,
        }
    }

    /// Terminate this filter with a concrete sink.
    fn then_sink<S>(self, sink: S) -> SharedEvents
    where
        Self: Sized,
        S: Events,
    {
        self.apply(Arc::new(sink))
    }

    /// Erase the type of this filter.
    fn boxed(self) -> BoxFilter
    where
        Self: Sized,
    {
        Box::new(self)
    }
}

/// A type-erased filter.
pub type BoxFilter = Box<dyn EventFilter>;

impl EventFilter for Box<dyn EventFilter> {
    fn apply(&self, next: SharedEvents) -> SharedEvents {
        (**self).apply(next)
    }
}

impl EventFilter for Arc<dyn EventFilter> {
    fn apply(&self, next: SharedEvents) -> SharedEvents {
        (**self).apply(next)
    }
}

/// Two filters nested outer-to-inner. See [`EventFilter::then`].
#[derive(Clone, Debug)]
pub struct Chain<A, B> {
    outer: A,
    inner: B,
}

impl<A: EventFilter, B: EventFilter> EventFilter for Chain<A, B> {
    fn apply(&self, next: SharedEvents) -> SharedEvents {
        self.outer.apply(self.inner.apply(next))
    }
}

/// A filter backed by a closure. See [`filter_fn`].
#[derive(Clone, Copy)]
pub struct FilterFn<F> {
    f: F,
}

impl<F> EventFilter for FilterFn<F>
where
    F: Fn(SharedEvents) -> SharedEvents + Send + Sync + 'static,
{
    fn apply(&self, next: SharedEvents) -> SharedEvents {
        (self.f)(next)
    }
}

/// Build a filter from a closure.
pub fn filter_fn<F>(f: F) -> FilterFn<F>
where
    F: Fn(SharedEvents) -> SharedEvents + Send + Sync + 'static,
{
    FilterFn { f }
}

/// The filter that passes events straight to the next sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl EventFilter for Identity {
    fn apply(&self, next: SharedEvents) -> SharedEvents {
        next
    }
}

/// The filter that passes events straight to the next sink.
pub fn identity() -> Identity {
    Identity
}
