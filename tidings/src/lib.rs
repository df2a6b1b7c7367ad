//! # tidings - Event Notification Pipeline
//!
//! `tidings` lets an application report internal happenings (errors, metrics,
//! audit facts) to one or more sinks without coupling producers to consumers.
//!
//! ## Quick Start
//!
//! ```rust
//! use tidings::prelude::*;
//! use tidings::{filters::{AddEventName, LogEvents}, testing::RecordingEvents};
//!
//! let recorder = RecordingEvents::new();
//!
//! // Filters compose outer to inner and terminate with a sink.
//! let events = LogEvents::named("app")
//!     .then(AddEventName::new())
//!     .then_sink(recorder.clone());
//!
//! let event = ErrorEvent::new("disk full").with_metadata("requestId", "abc123");
//! events.emit_event(event).unwrap();
//!
//! assert_eq!(recorder.count(), 1);
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use tidings_core::{
    // Event
    AsAny,
    // Error types
    BoxError,
    // Filters
    BoxFilter,
    Chain,
    DynEq,
    DynHash,
    // Sinks
    EmitResult,
    ErrorEvent,
    Event,
    EventCategory,
    // Metadata
    EventExt,
    EventFilter,
    EventRef,
    Events,
    FilterFn,
    Identity,
    Metadata,
    MetadataEvent,
    MetadataValue,
    SharedError,
    SharedEvents,
    SinkFn,
    Then,
    attach,
    filter_fn,
    identity,
    sink_fn,
};

pub use tidings_std::{Level, keys};

/// Standard filter implementations.
pub mod filters {
    pub use tidings_std::filters::{
        AddEventName, AddServiceName, AddTimestamp, LogEvents, Only, enrich::short_name,
    };
}

/// Standard sink implementations.
pub mod sinks {
    pub use tidings_std::sinks::{Fanout, NoOp, TracingEvents};
}

/// Testing utilities.
pub mod testing {
    pub use tidings_std::testing::{CountingEvents, FailingEvents, RecordingEvents, SinkFailure};
}

/// Prelude module - common imports for Tidings.
///
/// # Usage
///
/// ```rust
/// use tidings::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, ErrorEvent, Event, EventCategory, EventExt, EventFilter, EventRef, Events,
        MetadataEvent, MetadataValue, SharedEvents, attach, filter_fn, sink_fn,
    };
}
