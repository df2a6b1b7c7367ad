//! # tidings-std
//!
//! Standard implementations for the Tidings event notification pipeline.
//!
//! This crate provides:
//! - **Enrichment filters**: [`AddTimestamp`], [`AddEventName`], [`AddServiceName`]
//! - **Gatekeeping**: [`Only`]
//! - **Observability**: [`LogEvents`] filter and [`TracingEvents`] sink
//! - **Sinks**: [`Fanout`], [`NoOp`]
//! - **Testing utilities**: [`testing`]
//!
//! [`AddTimestamp`]: filters::AddTimestamp
//! [`AddEventName`]: filters::AddEventName
//! [`AddServiceName`]: filters::AddServiceName
//! [`Only`]: filters::Only
//! [`LogEvents`]: filters::LogEvents
//! [`TracingEvents`]: sinks::TracingEvents
//! [`Fanout`]: sinks::Fanout
//! [`NoOp`]: sinks::NoOp

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use tidings_core;

pub use tracing::Level;

// Modules
pub mod filters;
pub mod keys;
pub mod sinks;
pub mod testing;
