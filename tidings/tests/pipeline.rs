use std::{sync::Arc, thread};
use tidings::{
    filters::{AddEventName, AddServiceName, AddTimestamp, LogEvents, Only},
    keys,
    prelude::*,
    sinks::{Fanout, TracingEvents},
    testing::{CountingEvents, FailingEvents, RecordingEvents},
};

mod common;
use common::{CacheMiss, RequestCompleted};

fn init_tracing() -> tracing::subscriber::DefaultGuard {
    tracing::subscriber::set_default(
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
            .with_test_writer()
            .finish(),
    )
}

#[test]
fn test_application_pipeline() {
    let _guard = init_tracing();
    let all = RecordingEvents::new();
    let errors = RecordingEvents::new();

    let terminal = Fanout::new()
        .with(TracingEvents::named("app"))
        .with(all.clone())
        .with(Only::category(EventCategory::ERROR).then_sink(errors.clone()));

    let events = LogEvents::named("app")
        .then(AddServiceName::new("checkout"))
        .then(AddEventName::new())
        .then(AddTimestamp::new())
        .then_sink(terminal);

    events
        .emit_event(RequestCompleted {
            path: "/cart".into(),
            status: 200,
        })
        .unwrap();
    events
        .emit_event(CacheMiss {
            key: "cart:42".into(),
        })
        .unwrap();
    events
        .emit_event(ErrorEvent::new("payment declined").with_metadata("requestId", "r-9"))
        .unwrap();

    assert_eq!(all.count(), 3);
    assert_eq!(errors.count(), 1);

    let error = errors.last().unwrap();
    let metadata = error.metadata().unwrap();
    assert_eq!(metadata.len(), 4);
    assert_eq!(metadata.get(keys::NAME).and_then(MetadataValue::as_str), Some("ErrorEvent"));
    assert_eq!(metadata.get(keys::SERVICE).and_then(MetadataValue::as_str), Some("checkout"));
    assert_eq!(metadata.get("requestId").and_then(MetadataValue::as_str), Some("r-9"));
    assert!(metadata.contains_key(keys::TIMESTAMP));
    assert!(error.underlying().is::<ErrorEvent>());
}

#[test]
fn test_failing_sink_reaches_the_emitter() {
    let before = CountingEvents::new();
    let after = CountingEvents::new();
    let events = AddEventName::new().then_sink(
        before
            .clone()
            .then(FailingEvents::new("metrics endpoint down"))
            .then(after.clone()),
    );

    let err = events.emit_event(ErrorEvent::new("boom")).unwrap_err();

    assert_eq!(err.to_string(), "sink failed: metrics endpoint down");
    assert_eq!(before.count(), 1);
    assert_eq!(after.count(), 0);
}

#[test]
fn test_composed_sink_is_shared_across_threads() {
    let counter = CountingEvents::new();
    let events: SharedEvents = AddServiceName::new("worker")
        .then(AddEventName::new())
        .then_sink(counter.clone());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let events = Arc::clone(&events);
            thread::spawn(move || {
                for attempt in 0..25 {
                    let event = ErrorEvent::new(format!("worker {i} failed"))
                        .with_metadata("attempt", attempt);
                    events.emit_event(event).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(counter.count(), 100);
}
