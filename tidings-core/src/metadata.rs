//! Non-destructive metadata attachment.
//!
//! A [`MetadataEvent`] decorates an event with an ordered key/value mapping.
//! Attaching metadata never mutates anything: it always builds a new
//! `MetadataEvent`. Attaching to an event that is already decorated collapses
//! into a single layer over the same inner event instead of nesting wrappers.
//!
//! # Example
//!
//! ```rust
//! use tidings_core::{ErrorEvent, EventExt};
//!
//! let event = ErrorEvent::new("disk full")
//!     .with_metadata("requestId", "abc123")
//!     .with("retry", 3);
//!
//! assert_eq!(event.metadata().len(), 2);
//! assert!(event.event().is::<ErrorEvent>());
//! ```

use crate::event::{Event, EventCategory, EventRef};
use indexmap::IndexMap;
use serde_json::Value;
use std::{
    fmt::{self, Display},
    hash::{DefaultHasher, Hash, Hasher},
    ops::Add,
    sync::Arc,
};

/// A single metadata value.
#[derive(Clone, Debug)]
pub enum MetadataValue {
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating point number. Compared and hashed by bit pattern.
    Float(f64),
    /// A string.
    String(String),
    /// Any structured value: null, list or nested map.
    Json(Value),
}

impl MetadataValue {
    /// Returns the string if this is a [`MetadataValue::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            MetadataValue::Int(v) => Some(v),
            MetadataValue::UInt(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Returns the structured value if this is a [`MetadataValue::Json`].
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            MetadataValue::Json(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialEq for MetadataValue {
    fn eq(&self, other: &Self) -> bool {
        use MetadataValue::{Bool, Float, Int, Json, String, UInt};
        match (self, other) {
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (UInt(a), UInt(b)) => a == b,
            (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (String(a), String(b)) => a == b,
            (Json(a), Json(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for MetadataValue {}

impl Hash for MetadataValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            MetadataValue::Bool(v) => v.hash(state),
            MetadataValue::Int(v) => v.hash(state),
            MetadataValue::UInt(v) => v.hash(state),
            MetadataValue::Float(v) => v.to_bits().hash(state),
            MetadataValue::String(v) => v.hash(state),
            MetadataValue::Json(v) => hash_json(v, state),
        }
    }
}

// `serde_json::Value` is not `Hash`. Objects hash order-independently to agree
// with its map equality.
fn hash_json<H: Hasher>(value: &Value, state: &mut H) {
    std::mem::discriminant(value).hash(state);
    match value {
        Value::Null => {}
        Value::Bool(v) => v.hash(state),
        Value::Number(n) => n.to_string().hash(state),
        Value::String(v) => v.hash(state),
        Value::Array(items) => {
            state.write_usize(items.len());
            for item in items {
                hash_json(item, state);
            }
        }
        Value::Object(entries) => {
            let combined = entries.iter().fold(0u64, |acc, (key, value)| {
                let mut hasher = DefaultHasher::new();
                key.hash(&mut hasher);
                hash_json(value, &mut hasher);
                acc.wrapping_add(hasher.finish())
            });
            state.write_usize(entries.len());
            state.write_u64(combined);
        }
    }
}

impl Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Bool(v) => Display::fmt(v, f),
            MetadataValue::Int(v) => Display::fmt(v, f),
            MetadataValue::UInt(v) => Display::fmt(v, f),
            MetadataValue::Float(v) => Display::fmt(v, f),
            MetadataValue::String(v) => f.write_str(v),
            MetadataValue::Json(v) => Display::fmt(v, f),
        }
    }
}

macro_rules! impl_from_value {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for MetadataValue {
                fn from(value: $source) -> Self {
                    MetadataValue::$variant(value as $target)
                }
            }
        )+
    };
}

impl_from_value!(Int as i64: i8, i16, i32, i64, isize);
impl_from_value!(UInt as u64: u8, u16, u32, u64, usize);
impl_from_value!(Float as f64: f32, f64);

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::String(value.to_owned())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::String(value)
    }
}

impl From<&String> for MetadataValue {
    fn from(value: &String) -> Self {
        MetadataValue::String(value.clone())
    }
}

impl From<Value> for MetadataValue {
    fn from(value: Value) -> Self {
        MetadataValue::Json(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for MetadataValue {
    fn from(values: Vec<T>) -> Self {
        MetadataValue::Json(Value::Array(values.into_iter().map(Into::into).collect()))
    }
}

/// `None` becomes JSON `null`.
impl<T: Into<MetadataValue>> From<Option<T>> for MetadataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(MetadataValue::Json(Value::Null), Into::into)
    }
}

/// An insertion-ordered mapping from keys to [`MetadataValue`]s.
///
/// Equality ignores ordering, and so does hashing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata(IndexMap<String, MetadataValue>);

impl Metadata {
    /// An empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.0.get(key)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns a copy of this mapping with `key` set to `value`.
    ///
    /// An existing key keeps its position and takes the new value.
    pub fn with(&self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        let mut entries = self.0.clone();
        entries.insert(key.into(), value.into());
        Self(entries)
    }
}

impl Hash for Metadata {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent so that maps equal under `PartialEq` hash alike.
        let combined = self.0.iter().fold(0u64, |acc, entry| {
            let mut hasher = DefaultHasher::new();
            entry.hash(&mut hasher);
            acc.wrapping_add(hasher.finish())
        });
        state.write_usize(self.0.len());
        state.write_u64(combined);
    }
}

impl Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<MetadataValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// An event decorated with metadata.
///
/// Equality and hashing consider both the inner event and the metadata.
/// [`Event::category`] is forwarded to the inner event.
#[derive(Clone, Debug)]
pub struct MetadataEvent {
    event: EventRef,
    metadata: Metadata,
}

impl MetadataEvent {
    /// Wrap `event` with the given metadata.
    ///
    /// This does not collapse layers; use [`attach`] for that.
    pub fn new(event: EventRef, metadata: Metadata) -> Self {
        Self { event, metadata }
    }

    /// The decorated event.
    pub fn event(&self) -> &EventRef {
        &self.event
    }

    /// The attached metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Shorthand for `self.metadata().get(key)`.
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.metadata.get(key)
    }

    /// Returns a new event over the same inner event with `key` set to `value`.
    pub fn with(&self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self {
            event: Arc::clone(&self.event),
            metadata: self.metadata.with(key, value),
        }
    }
}

impl PartialEq for MetadataEvent {
    fn eq(&self, other: &Self) -> bool {
        *self.event == *other.event && self.metadata == other.metadata
    }
}

impl Eq for MetadataEvent {}

impl Hash for MetadataEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.event.as_ref().hash(state);
        self.metadata.hash(state);
    }
}

impl Display for MetadataEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MetadataEvent(event={:?}, metadata={})",
            self.event, self.metadata
        )
    }
}

impl Event for MetadataEvent {
    fn category(&self) -> Option<EventCategory> {
        self.event.category()
    }
}

impl<K, V> Add<(K, V)> for MetadataEvent
where
    K: Into<String>,
    V: Into<MetadataValue>,
{
    type Output = MetadataEvent;

    fn add(self, (key, value): (K, V)) -> Self::Output {
        let Self {
            event,
            mut metadata,
        } = self;
        metadata.0.insert(key.into(), value.into());
        Self { event, metadata }
    }
}

/// Attach a key/value pair to `event`.
///
/// If `event` is already a [`MetadataEvent`], the result wraps the same inner
/// event with the merged mapping (last write wins). Otherwise the result wraps
/// `event` with a mapping holding exactly this pair.
pub fn attach(
    event: &EventRef,
    key: impl Into<String>,
    value: impl Into<MetadataValue>,
) -> MetadataEvent {
    match event.downcast_ref::<MetadataEvent>() {
        Some(decorated) => decorated.with(key, value),
        None => MetadataEvent::new(Arc::clone(event), Metadata::new().with(key, value)),
    }
}

/// Metadata attachment for owned events.
pub trait EventExt: Event + Sized {
    /// Attach a key/value pair to this event. See [`attach`].
    fn with_metadata(
        self,
        key: impl Into<String>,
        value: impl Into<MetadataValue>,
    ) -> MetadataEvent {
        let event: EventRef = Arc::new(self);
        attach(&event, key, value)
    }

    /// Move this event into a shared [`EventRef`].
    fn into_ref(self) -> EventRef {
        Arc::new(self)
    }
}

impl<T: Event> EventExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorEvent;
    use serde_json::json;

    #[derive(Debug, PartialEq, Eq, Hash)]
    struct Deployed {
        version: &'static str,
    }

    impl Event for Deployed {}

    fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_attach_to_plain_event_wraps_once() {
        let event = Deployed { version: "1.2" }.into_ref();
        let decorated = attach(&event, "region", "eu-west-1");

        assert!(Arc::ptr_eq(decorated.event(), &event));
        assert_eq!(decorated.metadata().len(), 1);
        assert_eq!(decorated.get("region").and_then(MetadataValue::as_str), Some("eu-west-1"));
    }

    #[test]
    fn test_attach_same_key_last_write_wins_without_nesting() {
        let event = Deployed { version: "1.2" }.into_ref();
        let first: EventRef = Arc::new(attach(&event, "attempt", 1));
        let second = attach(&first, "attempt", 2);

        assert!(Arc::ptr_eq(second.event(), &event));
        assert!(!second.event().is::<MetadataEvent>());
        assert_eq!(second.metadata().len(), 1);
        assert_eq!(second.get("attempt"), Some(&MetadataValue::Int(2)));
    }

    #[test]
    fn test_attach_distinct_keys_accumulate_in_order() {
        let event = Deployed { version: "2.0" }
            .with_metadata("a", 1)
            .with_metadata("b", true);

        let keys: Vec<_> = event.metadata().iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert!(event.event().is::<Deployed>());
    }

    #[test]
    fn test_attach_does_not_mutate_original() {
        let original = Deployed { version: "3.0" }.with_metadata("a", 1);
        let snapshot = original.clone();

        let extended = original.clone() + ("b", 2);

        assert_eq!(original, snapshot);
        assert_eq!(original.metadata().len(), 1);
        assert_ne!(original, extended);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let event = Deployed { version: "1.0" }
            .with_metadata("first", 1)
            .with("second", 2)
            .with("first", 10);

        let entries: Vec<_> = event.metadata().iter().collect();
        assert_eq!(entries[0], ("first", &MetadataValue::Int(10)));
        assert_eq!(entries[1], ("second", &MetadataValue::Int(2)));
    }

    #[test]
    fn test_equality_and_hash() {
        let a = Deployed { version: "1.0" }.with_metadata("k", "v") + ("n", 1);
        let b = Deployed { version: "1.0" }.with_metadata("n", 1) + ("k", "v");

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let other_inner = Deployed { version: "1.1" }.with_metadata("k", "v") + ("n", 1);
        assert_ne!(a, other_inner);

        let other_value = a.with("n", 2);
        assert_ne!(a, other_value);
    }

    #[test]
    fn test_category_is_forwarded() {
        let decorated = ErrorEvent::new("boom").with_metadata("k", "v");
        assert_eq!(decorated.category(), Some(EventCategory::error()));

        let plain = Deployed { version: "1.0" }.with_metadata("k", "v");
        assert_eq!(plain.category(), None);
    }

    #[test]
    fn test_display_names_the_decorator() {
        let decorated = "started".with_metadata("retry", 3);
        assert_eq!(
            decorated.to_string(),
            r#"MetadataEvent(event="started", metadata={retry=3})"#
        );
    }

    #[test]
    fn test_float_values_compare_by_bits() {
        assert_eq!(MetadataValue::from(1.5), MetadataValue::Float(1.5));
        assert_eq!(MetadataValue::from(f64::NAN), MetadataValue::from(f64::NAN));
        assert_ne!(MetadataValue::from(1), MetadataValue::from(1u32));
    }

    #[test]
    fn test_structured_values() {
        let trace = json!({"mw": "auth", "us": 12, "tags": ["edge", null]});
        let event = Deployed { version: "1.0" }
            .with_metadata("trace", trace.clone())
            .with("hops", vec!["lb", "api"])
            .with("parent", None::<&str>);

        assert_eq!(event.get("trace").and_then(MetadataValue::as_json), Some(&trace));
        assert_eq!(event.get("hops"), Some(&MetadataValue::Json(json!(["lb", "api"]))));
        assert_eq!(event.get("parent"), Some(&MetadataValue::Json(Value::Null)));
        assert_eq!(
            event.metadata().to_string(),
            r#"{trace={"mw":"auth","tags":["edge",null],"us":12}, hops=["lb","api"], parent=null}"#
        );

        let same = Deployed { version: "1.0" }
            .with_metadata("parent", None::<&str>)
            .with("hops", vec!["lb", "api"])
            .with("trace", json!({"us": 12, "tags": ["edge", null], "mw": "auth"}));
        assert_eq!(event, same);
        assert_eq!(hash_of(&event), hash_of(&same));

        let nested_change = event.with(
            "trace",
            json!({"mw": "auth", "us": 13, "tags": ["edge", null]}),
        );
        assert_ne!(event, nested_change);
    }

    #[test]
    fn test_add_overwrites_in_place() {
        let event = Deployed { version: "1.0" }.with_metadata("a", 1) + ("b", 2);
        let before = event.clone();

        let event = event + ("a", "one");

        let entries: Vec<_> = event.metadata().iter().collect();
        assert_eq!(
            entries,
            [("a", &MetadataValue::from("one")), ("b", &MetadataValue::Int(2))]
        );
        assert_eq!(before.get("a"), Some(&MetadataValue::Int(1)));
    }
}
