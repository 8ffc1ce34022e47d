use marketplace_payments::domain::event::{categorize, EventCategory, ProcessorEvent};
use marketplace_payments::domain::transaction::{status_for_charge_event, TransactionStatus};
use serde_json::json;

fn event(payload: serde_json::Value) -> ProcessorEvent {
    ProcessorEvent::from_payload(&payload).expect("payload parses")
}

#[test]
fn account_updated_carries_capability_booleans() {
    let ev = event(json!({
        "id": "evt_1",
        "type": "account.updated",
        "created": 1754000000,
        "data": {"object": {
            "id": "acct_123",
            "charges_enabled": true,
            "payouts_enabled": false,
            "details_submitted": true
        }}
    }));

    match categorize(&ev) {
        EventCategory::AccountCapability { account_id, update } => {
            assert_eq!(account_id, "acct_123");
            assert!(update.charges_enabled);
            assert!(!update.payouts_enabled);
            assert!(update.details_submitted);
        }
        other => panic!("unexpected category: {other:?}"),
    }
}

#[test]
fn missing_capability_fields_default_to_disabled() {
    let ev = event(json!({
        "id": "evt_2",
        "type": "account.updated",
        "created": 1754000000,
        "data": {"object": {"id": "acct_123"}}
    }));

    match categorize(&ev) {
        EventCategory::AccountCapability { update, .. } => {
            assert!(!update.charges_enabled);
            assert!(!update.payouts_enabled);
            assert!(!update.details_submitted);
        }
        other => panic!("unexpected category: {other:?}"),
    }
}

#[test]
fn charge_events_map_to_transaction_statuses() {
    for (event_type, expected) in [
        ("charge.succeeded", TransactionStatus::Succeeded),
        ("charge.failed", TransactionStatus::Failed),
        ("charge.refunded", TransactionStatus::Refunded),
    ] {
        let ev = event(json!({
            "id": "evt_3",
            "type": event_type,
            "created": 1754000000,
            "data": {"object": {"id": "ch_123"}}
        }));

        match categorize(&ev) {
            EventCategory::Charge { charge_id, status } => {
                assert_eq!(charge_id, "ch_123");
                assert_eq!(status, expected);
            }
            other => panic!("unexpected category for {event_type}: {other:?}"),
        }
    }
}

#[test]
fn unknown_event_types_are_unhandled() {
    let ev = event(json!({
        "id": "evt_4",
        "type": "payout.paid",
        "created": 1754000000,
        "data": {"object": {"id": "po_123"}}
    }));

    assert_eq!(categorize(&ev), EventCategory::Unhandled);
    assert_eq!(status_for_charge_event("payout.paid"), None);
}

#[test]
fn payload_missing_required_fields_does_not_parse() {
    assert!(ProcessorEvent::from_payload(&json!({"type": "account.updated"})).is_none());
    assert!(ProcessorEvent::from_payload(&json!({"id": "evt_5", "created": 1})).is_none());
    assert!(ProcessorEvent::from_payload(&json!({
        "id": "evt_6",
        "type": "charge.succeeded",
        "created": 1754000000
    }))
    .is_none());
}

#[test]
fn event_created_parses_from_unix_seconds() {
    let ev = event(json!({
        "id": "evt_7",
        "type": "charge.succeeded",
        "created": 1754000000,
        "data": {"object": {"id": "ch_9"}}
    }));
    assert_eq!(ev.created.timestamp(), 1754000000);
}
