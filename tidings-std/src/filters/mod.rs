//! Standard filter implementations.

pub mod enrich;
pub mod log;
pub mod only;

pub use enrich::{AddEventName, AddServiceName, AddTimestamp};
pub use log::LogEvents;
pub use only::Only;
