//! Session and store properties
//!
//! Cross-cutting guarantees the pipeline promises regardless of which
//! page's schema is in play.

use std::sync::Arc;

use playground_core::FieldValue;
use playground_forms::{
    Ack, FormSession, Latency, RecordStore, SessionStatus, SimulatedGateway, SubmitError,
    SubmitOutcome, SubmitStart,
};
use playground_pages::{product_schema, product_store};

fn add_product(store: &Arc<RecordStore>, name: &str) {
    let mut session = FormSession::new(product_schema()).with_store(store.clone());
    session.set_field("name", name).unwrap();
    session.set_field("quantity", "1").unwrap();
    session.set_field("color", "green").unwrap();

    let SubmitStart::Pending(record) = session.begin_submit() else {
        panic!("expected pending submission for {}", name);
    };
    let ack = Ack {
        record_id: record.id().to_string(),
    };
    session.complete_submit(record, Ok(ack));
}

#[test]
fn filter_narrows_monotonically() {
    let store = product_store();
    for name in ["Widget", "Widgetron", "Gadget", "wide gadget"] {
        add_product(&store, name);
    }

    // A longer term can only ever shrink the visible set.
    let mut previous: Option<Vec<String>> = None;
    for term in ["", "w", "wi", "wid", "widge", "widgetron"] {
        store.set_filter_term(term);
        let visible: Vec<String> = store
            .visible_records()
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        if let Some(prev) = &previous {
            assert!(
                visible.iter().all(|id| prev.contains(id)),
                "term {:?} surfaced records its prefix did not",
                term
            );
        }
        previous = Some(visible);
    }
}

#[test]
fn accepted_record_appears_exactly_once_unfiltered() {
    let store = product_store();
    add_product(&store, "Widget");

    store.set_filter_term("");
    let visible = store.visible_records();
    assert_eq!(visible.len(), 1);
    assert_eq!(
        visible[0].get("name"),
        Some(&FieldValue::Text("Widget".to_string()))
    );
}

#[test]
fn at_most_one_submission_in_flight() {
    let mut session = FormSession::new(product_schema());
    session.set_field("name", "Widget").unwrap();
    session.set_field("quantity", "2").unwrap();
    session.set_field("color", "red").unwrap();

    let SubmitStart::Pending(record) = session.begin_submit() else {
        panic!("expected pending submission");
    };

    // Repeated submit intents while the gateway call is outstanding are
    // ignored without touching any state.
    for _ in 0..3 {
        assert_eq!(session.begin_submit(), SubmitStart::InFlight);
        assert_eq!(session.status(), SessionStatus::Submitting);
    }

    let ack = Ack {
        record_id: record.id().to_string(),
    };
    assert!(matches!(
        session.complete_submit(record, Ok(ack)),
        SubmitOutcome::Accepted { .. }
    ));
}

#[test]
fn abandoned_submission_discards_the_pending_result() {
    // Navigating away mid-submission: the session is dropped with the
    // gateway call outstanding, and the store never sees the record.
    let store = product_store();
    let mut session = FormSession::new(product_schema()).with_store(store.clone());
    session.set_field("name", "Widget").unwrap();
    session.set_field("quantity", "2").unwrap();
    session.set_field("color", "red").unwrap();

    let SubmitStart::Pending(_record) = session.begin_submit() else {
        panic!("expected pending submission");
    };
    drop(session);

    assert!(store.is_empty());
}

#[tokio::test]
async fn failed_submission_requires_explicit_resubmission() {
    let store = product_store();
    let mut session = FormSession::new(product_schema()).with_store(store.clone());
    session.set_field("name", "Widget").unwrap();
    session.set_field("quantity", "2").unwrap();
    session.set_field("color", "red").unwrap();

    let failing = SimulatedGateway::new(Latency::None).with_fail_rate(1.0);
    let outcome = session.submit(&failing).await;
    assert!(matches!(outcome, SubmitOutcome::Failed(SubmitError::Server(_))));
    assert!(store.is_empty());

    // No retry happened behind the caller's back; an explicit second
    // submit against a healthy gateway goes through.
    let healthy = SimulatedGateway::new(Latency::None);
    let outcome = session.submit(&healthy).await;
    assert!(matches!(outcome, SubmitOutcome::Accepted { .. }));
    assert_eq!(store.len(), 1);
}
