//! Standard sink implementations.

pub mod fanout;
pub mod trace;

pub use fanout::{Fanout, NoOp};
pub use trace::TracingEvents;
