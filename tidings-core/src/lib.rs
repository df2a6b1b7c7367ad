//! # tidings-core
//!
//! Core traits for the Tidings event notification pipeline.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! producers and plugins that don't need the standard filters and sinks of
//! `tidings-std`.
//!
//! # Building Blocks
//!
//! ## [`Event`]
//!
//! A marker for meaningful happenings. Producers define their own event
//! types; [`ErrorEvent`] is the one built-in variant and is always classified
//! under the `"error"` [`EventCategory`].
//!
//! ## [`MetadataEvent`]
//!
//! Decorates an event with an ordered key/value mapping. [`attach`] (also
//! spelled `+` and [`EventExt::with_metadata`]) never mutates its input and
//! collapses repeated attachment into a single layer.
//!
//! ## [`Events`]
//!
//! A sink: a synchronous procedure that observes an event. Sinks chain with
//! [`Events::then`], first to last, stopping at the first failure.
//!
//! ## [`EventFilter`]
//!
//! A transformer from the next sink to a wrapped sink. Filters compose with
//! [`EventFilter::then`] (outer to inner) and terminate with
//! [`EventFilter::then_sink`].
//!
//! # Error Types
//!
//! - [`ErrorEvent`] - producer-domain errors, reported as events
//! - [`BoxError`] - sink failures, returned to the emitter unchanged

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod event;
mod events;
mod filter;
mod metadata;

// Re-exports
pub use error::{BoxError, ErrorEvent, SharedError};
pub use event::{AsAny, DynEq, DynHash, Event, EventCategory, EventRef};
pub use events::{EmitResult, Events, SharedEvents, SinkFn, Then, sink_fn};
pub use filter::{BoxFilter, Chain, EventFilter, FilterFn, Identity, filter_fn, identity};
pub use metadata::{EventExt, Metadata, MetadataEvent, MetadataValue, attach};
