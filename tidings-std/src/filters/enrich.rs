//! Enrichment filters - attach metadata to every event passing through.

use crate::keys;
use chrono::{DateTime, SecondsFormat, Utc};
use std::{borrow::Cow, fmt, sync::Arc};
use tidings_core::{
    Event, EventExt, EventFilter, EventRef, Events, MetadataValue, SharedEvents, attach, sink_fn,
};

/// Wrap `next` so every event gets `key` set to `value(event)` first.
fn enrich<F>(next: SharedEvents, key: &'static str, value: F) -> SharedEvents
where
    F: Fn(&EventRef) -> MetadataValue + Send + Sync + 'static,
{
    sink_fn(move |event| next.emit(&attach(event, key, value(event)).into_ref())).shared()
}

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Attaches the time the event passed through, under [`keys::TIMESTAMP`].
///
/// The value is an RFC 3339 string in UTC with millisecond precision.
#[derive(Clone)]
pub struct AddTimestamp {
    clock: Clock,
}

impl AddTimestamp {
    /// Timestamp events with the system clock.
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Timestamp events with a custom clock.
    pub fn with_clock<C>(clock: C) -> Self
    where
        C: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            clock: Arc::new(clock),
        }
    }
}

impl Default for AddTimestamp {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AddTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddTimestamp").finish_non_exhaustive()
    }
}

impl EventFilter for AddTimestamp {
    fn apply(&self, next: SharedEvents) -> SharedEvents {
        let clock = Arc::clone(&self.clock);
        enrich(next, keys::TIMESTAMP, move |_| {
            clock().to_rfc3339_opts(SecondsFormat::Millis, true).into()
        })
    }
}

/// Attaches the short type name of the underlying event, under [`keys::NAME`].
///
/// `my_app::events::UserSignedUp` is recorded as `UserSignedUp`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AddEventName;

impl AddEventName {
    /// Create the filter.
    pub fn new() -> Self {
        Self
    }
}

/// The last path segment of the event's type name, without generics.
pub fn short_name(event: &dyn Event) -> &'static str {
    let full = event.underlying().type_name();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

impl EventFilter for AddEventName {
    fn apply(&self, next: SharedEvents) -> SharedEvents {
        enrich(next, keys::NAME, |event| short_name(event.as_ref()).into())
    }
}

/// Attaches a fixed service name, under [`keys::SERVICE`].
#[derive(Clone, Debug)]
pub struct AddServiceName {
    name: Cow<'static, str>,
}

impl AddServiceName {
    /// Create the filter for `name`.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }
}

impl EventFilter for AddServiceName {
    fn apply(&self, next: SharedEvents) -> SharedEvents {
        let name = self.name.clone();
        enrich(next, keys::SERVICE, move |_| name.as_ref().into())
    }
}
