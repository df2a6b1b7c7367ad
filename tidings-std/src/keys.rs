//! Metadata keys attached by the standard filters.

/// When the event passed through [`AddTimestamp`](crate::filters::AddTimestamp),
/// as an RFC 3339 UTC string.
pub const TIMESTAMP: &str = "timestamp";

/// Short type name of the underlying event, set by
/// [`AddEventName`](crate::filters::AddEventName).
pub const NAME: &str = "name";

/// Service that emitted the event, set by
/// [`AddServiceName`](crate::filters::AddServiceName).
pub const SERVICE: &str = "service";
