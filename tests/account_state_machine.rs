use chrono::{Duration, Utc};
use marketplace_payments::account::transitions::{next_status, should_apply};
use marketplace_payments::domain::account::{CapabilityUpdate, OnboardingStatus};

fn caps(charges: bool, payouts: bool, details: bool) -> CapabilityUpdate {
    CapabilityUpdate {
        charges_enabled: charges,
        payouts_enabled: payouts,
        details_submitted: details,
    }
}

#[test]
fn details_not_submitted_means_in_progress() {
    assert_eq!(next_status(&caps(false, false, false)), OnboardingStatus::InProgress);
    assert_eq!(next_status(&caps(true, false, false)), OnboardingStatus::InProgress);
}

#[test]
fn fully_enabled_account_is_complete() {
    assert_eq!(next_status(&caps(true, true, true)), OnboardingStatus::Complete);
}

#[test]
fn disabled_capability_restricts_submitted_account() {
    assert_eq!(next_status(&caps(false, true, true)), OnboardingStatus::Restricted);
    assert_eq!(next_status(&caps(true, false, true)), OnboardingStatus::Restricted);
    assert_eq!(next_status(&caps(false, false, true)), OnboardingStatus::Restricted);
}

#[test]
fn reenable_event_returns_restricted_account_to_complete() {
    let restricted = caps(false, true, true);
    assert_eq!(next_status(&restricted), OnboardingStatus::Restricted);

    let reenabled = caps(true, true, true);
    assert_eq!(next_status(&reenabled), OnboardingStatus::Complete);
}

#[test]
fn never_synced_account_accepts_any_event() {
    assert!(should_apply(None, Utc::now() - Duration::days(30)));
}

#[test]
fn newer_event_applies() {
    let last = Utc::now();
    assert!(should_apply(Some(last), last + Duration::seconds(1)));
}

#[test]
fn stale_event_is_discarded() {
    let last = Utc::now();
    assert!(!should_apply(Some(last), last - Duration::seconds(1)));
}

#[test]
fn replayed_event_with_same_timestamp_is_discarded() {
    // second delivery of the same sync point must not reapply
    let ts = Utc::now();
    assert!(should_apply(None, ts));
    assert!(!should_apply(Some(ts), ts));
}

#[test]
fn onboarding_status_round_trips_through_storage_form() {
    for status in [
        OnboardingStatus::NotStarted,
        OnboardingStatus::LinkIssued,
        OnboardingStatus::InProgress,
        OnboardingStatus::Complete,
        OnboardingStatus::Restricted,
    ] {
        assert_eq!(OnboardingStatus::parse(status.as_str()), status);
    }
}
