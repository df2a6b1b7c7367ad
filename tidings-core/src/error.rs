//! Error types for Tidings.
//!
//! Errors show up in two places:
//!
//! - [`ErrorEvent`] - a producer-domain error reported *as data* through the
//!   normal sink path
//! - [`BoxError`] - the failure a sink returns when it cannot handle an event,
//!   propagated to the emitter unchanged

use crate::event::{Event, EventCategory};
use std::{
    hash::{Hash, Hasher},
    sync::Arc,
};
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A cause shared between clones of an [`ErrorEvent`].
pub type SharedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// The built-in error event.
///
/// Always classified under [`EventCategory::ERROR`]. The optional cause is
/// shared by clones of the event and compared by identity: two events built
/// from separate causes are never equal, even when the causes are zero-sized.
///
/// # Example
///
/// ```rust
/// use tidings_core::{ErrorEvent, Event, EventCategory};
///
/// let event = ErrorEvent::new("disk full");
/// assert_eq!(event.category(), Some(EventCategory::error()));
/// ```
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ErrorEvent {
    message: String,
    #[source]
    cause: Option<SharedError>,
}

impl ErrorEvent {
    /// Create an error event without an underlying cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Create an error event caused by `cause`.
    pub fn with_cause(message: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        let cause: BoxError = cause.into();
        Self {
            message: message.into(),
            cause: Some(Arc::from(cause)),
        }
    }

    /// Report an existing error, using its display text as the message.
    pub fn from_error<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: err.to_string(),
            cause: Some(Arc::new(err)),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The underlying failure, if any.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    fn cause_addr(&self) -> Option<*const ()> {
        self.cause.as_ref().map(|cause| Arc::as_ptr(cause).cast::<()>())
    }
}

impl PartialEq for ErrorEvent {
    fn eq(&self, other: &Self) -> bool {
        let same_cause = match (&self.cause, &other.cause) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.message == other.message && same_cause
    }
}

impl Eq for ErrorEvent {}

impl Hash for ErrorEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.message.hash(state);
        self.cause_addr().hash(state);
    }
}

impl Event for ErrorEvent {
    fn category(&self) -> Option<EventCategory> {
        Some(EventCategory::ERROR)
    }
}
