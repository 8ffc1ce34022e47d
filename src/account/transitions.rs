use crate::domain::account::{CapabilityUpdate, OnboardingStatus};
use chrono::{DateTime, Utc};

/// Status derived from the processor-reported capability booleans. A
/// restricted account returns to Complete when the processor re-enables it.
pub fn next_status(update: &CapabilityUpdate) -> OnboardingStatus {
    if update.details_submitted {
        if update.charges_enabled && update.payouts_enabled {
            OnboardingStatus::Complete
        } else {
            OnboardingStatus::Restricted
        }
    } else {
        OnboardingStatus::InProgress
    }
}

/// Events must be strictly newer than the last applied sync; an out-of-order
/// delivery is discarded rather than applied. A never-synced account accepts
/// any event.
pub fn should_apply(last_synced_at: Option<DateTime<Utc>>, event_ts: DateTime<Utc>) -> bool {
    match last_synced_at {
        None => true,
        Some(last) => event_ts > last,
    }
}
