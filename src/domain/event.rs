use crate::domain::account::CapabilityUpdate;
use crate::domain::transaction::{status_for_charge_event, TransactionStatus};
use chrono::{DateTime, Utc};

/// One webhook delivery from the processor, already parsed from JSON.
#[derive(Debug, Clone)]
pub struct ProcessorEvent {
    pub event_id: String,
    pub event_type: String,
    pub created: DateTime<Utc>,
    pub object: serde_json::Value,
}

impl ProcessorEvent {
    pub fn from_payload(payload: &serde_json::Value) -> Option<Self> {
        let event_id = payload.get("id")?.as_str()?.to_string();
        let event_type = payload.get("type")?.as_str()?.to_string();
        let created = DateTime::from_timestamp(payload.get("created")?.as_i64()?, 0)?;
        let object = payload.get("data")?.get("object")?.clone();

        Some(Self {
            event_id,
            event_type,
            created,
            object,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventCategory {
    AccountCapability {
        account_id: String,
        update: CapabilityUpdate,
    },
    Charge {
        charge_id: String,
        status: TransactionStatus,
    },
    Unhandled,
}

/// Transitions are derived from the capability booleans in the payload, not
/// the event type name; a single type can report varying combinations.
pub fn categorize(event: &ProcessorEvent) -> EventCategory {
    if event.event_type == "account.updated" {
        let Some(account_id) = event.object.get("id").and_then(|v| v.as_str()) else {
            return EventCategory::Unhandled;
        };
        let flag = |key: &str| event.object.get(key).and_then(|v| v.as_bool()).unwrap_or(false);

        return EventCategory::AccountCapability {
            account_id: account_id.to_string(),
            update: CapabilityUpdate {
                charges_enabled: flag("charges_enabled"),
                payouts_enabled: flag("payouts_enabled"),
                details_submitted: flag("details_submitted"),
            },
        };
    }

    if let Some(status) = status_for_charge_event(&event.event_type) {
        if let Some(charge_id) = event.object.get("id").and_then(|v| v.as_str()) {
            return EventCategory::Charge {
                charge_id: charge_id.to_string(),
                status,
            };
        }
    }

    EventCategory::Unhandled
}
