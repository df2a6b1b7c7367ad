#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tidings::{EventFilter, EventRef, Events, SharedEvents, filter_fn, sink_fn};

// ============================================================================
// Test Event Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestCompleted {
    pub path: String,
    pub status: u16,
}

impl tidings::Event for RequestCompleted {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheMiss {
    pub key: String,
}

impl tidings::Event for CacheMiss {
    fn category(&self) -> Option<tidings::EventCategory> {
        Some(tidings::EventCategory::from_static("metric"))
    }
}

// ============================================================================
// Order Recording
// ============================================================================

/// Shared, ordered record of what each stage did.
#[derive(Clone, Default)]
pub struct Trail(Arc<Mutex<Vec<String>>>);

impl Trail {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

/// A filter that records `<name>-before` and `<name>-after` around `next`.
pub fn marker(name: &'static str, trail: &Trail) -> impl EventFilter + use<> {
    let trail = trail.clone();
    filter_fn(move |next: SharedEvents| {
        let trail = trail.clone();
        sink_fn(move |event: &EventRef| {
            trail.push(format!("{name}-before"));
            next.emit(event)?;
            trail.push(format!("{name}-after"));
            Ok(())
        })
        .shared()
    })
}

/// A sink that records `name` when invoked.
pub fn stage(name: &'static str, trail: &Trail) -> impl Events + use<> {
    let trail = trail.clone();
    sink_fn(move |_| {
        trail.push(name);
        Ok(())
    })
}
