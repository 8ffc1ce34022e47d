use chrono::Utc;
use marketplace_payments::account::eligibility::{checkout_eligibility, EligibilityDecision};
use marketplace_payments::domain::account::{ConnectedAccount, OnboardingStatus};
use uuid::Uuid;

fn account(charges: bool, payouts: bool, status: OnboardingStatus) -> ConnectedAccount {
    ConnectedAccount {
        account_id: "acct_test".to_string(),
        provider_id: Uuid::new_v4(),
        charges_enabled: charges,
        payouts_enabled: payouts,
        details_submitted: true,
        onboarding_status: status,
        last_synced_at: Some(Utc::now()),
    }
}

#[test]
fn fully_enabled_account_may_checkout() {
    let decision = checkout_eligibility(&account(true, true, OnboardingStatus::Complete));
    assert_eq!(decision, EligibilityDecision::Allow);
}

#[test]
fn charges_disabled_blocks_checkout() {
    let decision = checkout_eligibility(&account(false, true, OnboardingStatus::Restricted));
    assert!(matches!(decision, EligibilityDecision::Reject(_)));
}

#[test]
fn payouts_disabled_blocks_checkout() {
    let decision = checkout_eligibility(&account(true, false, OnboardingStatus::Restricted));
    assert!(matches!(decision, EligibilityDecision::Reject(_)));
}

#[test]
fn in_progress_account_with_no_capabilities_is_blocked() {
    let decision = checkout_eligibility(&account(false, false, OnboardingStatus::InProgress));
    assert!(matches!(decision, EligibilityDecision::Reject(_)));
}
