//! Event marker trait and classification.
//!
//! An [`Event`] is any value that represents a meaningful happening. The trait
//! carries no required methods; producers define their own shapes and opt in
//! with an empty `impl`.
//!
//! Events travel through the pipeline as [`EventRef`], a shared handle, so
//! filters can decorate them (see [`MetadataEvent`]) without copying or
//! mutating the original value.
//!
//! [`MetadataEvent`]: crate::MetadataEvent

use crate::metadata::{Metadata, MetadataEvent};
use std::{
    any::Any,
    borrow::Cow,
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
    sync::Arc,
};

/// A shared handle to an event of any type.
pub type EventRef = Arc<dyn Event>;

/// A marker trait for meaningful happenings within an application.
///
/// Events must be thread-safe, `'static`, debuggable and comparable so that
/// they can be shared across sinks and used inside [`MetadataEvent`]'s
/// equality and hashing.
///
/// # Example
///
/// ```rust
/// use tidings_core::Event;
///
/// #[derive(Debug, PartialEq, Eq, Hash)]
/// struct UserSignedUp {
///     id: u64,
/// }
///
/// impl Event for UserSignedUp {}
/// ```
///
/// [`MetadataEvent`]: crate::MetadataEvent
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Event",
    label = "missing `Event` implementation",
    note = "Events must be `Debug + Eq + Hash + Send + Sync + 'static` and opt in with an empty `impl Event`."
)]
pub trait Event: AsAny + DynEq + DynHash + Debug + Send + Sync + 'static {
    /// The category this event is classified under, if any.
    fn category(&self) -> Option<EventCategory> {
        None
    }
}

/// Object-safe access to the concrete type behind a `dyn Event`.
///
/// Plumbing for `dyn Event`; use `as_any` and `type_name` on the trait object.
/// The blanket impl also covers [`EventRef`] itself, so these methods would
/// describe the `Arc` when called through the handle.
pub trait AsAny {
    #[doc(hidden)]
    fn __as_any(&self) -> &dyn Any;

    #[doc(hidden)]
    fn __type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn __as_any(&self) -> &dyn Any {
        self
    }

    fn __type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Object-safe equality between events of possibly different types.
pub trait DynEq {
    #[doc(hidden)]
    fn __dyn_eq(&self, other: &dyn Event) -> bool;
}

impl<T: Eq + Any> DynEq for T {
    fn __dyn_eq(&self, other: &dyn Event) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// Object-safe hashing for events.
pub trait DynHash {
    #[doc(hidden)]
    fn __dyn_hash(&self, state: &mut dyn Hasher);
}

impl<T: Hash + Any> DynHash for T {
    fn __dyn_hash(&self, mut state: &mut dyn Hasher) {
        std::any::TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }
}

impl dyn Event {
    /// Returns the concrete event as [`Any`].
    pub fn as_any(&self) -> &dyn Any {
        self.__as_any()
    }

    /// The fully qualified type name of the concrete event.
    pub fn type_name(&self) -> &'static str {
        self.__type_name()
    }

    /// Returns `true` if the concrete event is of type `T`.
    pub fn is<T: Event>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcasts to the concrete event type `T`.
    ///
    /// A [`MetadataEvent`] is its own type: to reach the event it decorates,
    /// go through [`underlying`](Self::underlying) first.
    pub fn downcast_ref<T: Event>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// The event without any metadata decoration.
    pub fn underlying(&self) -> &dyn Event {
        match self.downcast_ref::<MetadataEvent>() {
            Some(decorated) => decorated.event().as_ref(),
            None => self,
        }
    }

    /// The metadata attached to this event, if it is decorated.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.downcast_ref::<MetadataEvent>()
            .map(MetadataEvent::metadata)
    }
}

impl PartialEq for dyn Event {
    fn eq(&self, other: &Self) -> bool {
        self.__dyn_eq(other)
    }
}

impl Eq for dyn Event {}

impl Hash for dyn Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.__dyn_hash(state);
    }
}

impl Event for String {}
impl Event for &'static str {}

/// An opaque classification label for events.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventCategory(Cow<'static, str>);

impl EventCategory {
    /// The category carried by [`ErrorEvent`](crate::ErrorEvent).
    pub const ERROR: EventCategory = EventCategory::from_static("error");

    /// Create a category from any string label.
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self(label.into())
    }

    /// Create a category from a static label, usable in `const` contexts.
    pub const fn from_static(label: &'static str) -> Self {
        Self(Cow::Borrowed(label))
    }

    /// The `"error"` category.
    pub fn error() -> Self {
        Self::ERROR
    }

    /// The label of this category.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for EventCategory {
    fn from(label: &'static str) -> Self {
        Self::from_static(label)
    }
}

impl From<String> for EventCategory {
    fn from(label: String) -> Self {
        Self(Cow::Owned(label))
    }
}
