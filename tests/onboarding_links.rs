use chrono::{Duration, Utc};
use marketplace_payments::domain::account::OnboardingLink;
use marketplace_payments::domain::error::PaymentError;
use marketplace_payments::domain::listing::ProviderProfile;
use marketplace_payments::processor::mock::MockProcessor;
use marketplace_payments::processor::ProcessorClient;
use marketplace_payments::service::feature_gate::flag_on;
use uuid::Uuid;

fn link(expires_in: Duration) -> OnboardingLink {
    OnboardingLink {
        account_id: "acct_test".to_string(),
        url: "https://connect.example/setup/xyz".to_string(),
        expires_at: Utc::now() + expires_in,
    }
}

#[test]
fn unexpired_link_is_reusable() {
    assert!(!link(Duration::minutes(10)).is_expired(Utc::now()));
}

#[test]
fn expired_link_is_not_reissued() {
    assert!(link(Duration::minutes(-1)).is_expired(Utc::now()));
}

#[test]
fn link_expiring_now_counts_as_expired() {
    let now = Utc::now();
    let l = OnboardingLink {
        account_id: "acct_test".to_string(),
        url: "https://connect.example/setup/xyz".to_string(),
        expires_at: now,
    };
    assert!(l.is_expired(now));
}

#[tokio::test]
async fn mock_processor_issues_time_boxed_links() {
    let processor = MockProcessor {
        behavior: "ALWAYS_SUCCESS".to_string(),
    };

    let l = processor
        .create_onboarding_link("acct_1", "https://return", "https://refresh")
        .await
        .expect("link issued");

    assert_eq!(l.account_id, "acct_1");
    assert!(!l.is_expired(Utc::now()));
}

#[tokio::test]
async fn mock_processor_surfaces_unavailability() {
    let processor = MockProcessor {
        behavior: "PROCESSOR_DOWN".to_string(),
    };
    let profile = ProviderProfile {
        provider_id: Uuid::new_v4(),
        display_name: "Test Pro".to_string(),
        email: "pro@example.com".to_string(),
        country: "US".to_string(),
    };

    let err = processor.create_account(&profile).await.unwrap_err();
    assert!(matches!(err, PaymentError::ProcessorUnavailable));
    assert!(err.retryable());
}

#[test]
fn feature_flag_reads_fail_closed_on_unknown_values() {
    assert!(flag_on("1"));
    assert!(flag_on("true"));
    assert!(flag_on(" ON "));
    assert!(!flag_on("0"));
    assert!(!flag_on("off"));
    assert!(!flag_on("garbage"));
    assert!(!flag_on(""));
}
