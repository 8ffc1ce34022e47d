use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnboardingStatus {
    NotStarted,
    LinkIssued,
    InProgress,
    Complete,
    Restricted,
}

impl OnboardingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnboardingStatus::NotStarted => "NOT_STARTED",
            OnboardingStatus::LinkIssued => "LINK_ISSUED",
            OnboardingStatus::InProgress => "IN_PROGRESS",
            OnboardingStatus::Complete => "COMPLETE",
            OnboardingStatus::Restricted => "RESTRICTED",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "LINK_ISSUED" => OnboardingStatus::LinkIssued,
            "IN_PROGRESS" => OnboardingStatus::InProgress,
            "COMPLETE" => OnboardingStatus::Complete,
            "RESTRICTED" => OnboardingStatus::Restricted,
            _ => OnboardingStatus::NotStarted,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectedAccount {
    pub account_id: String,
    pub provider_id: Uuid,
    pub charges_enabled: bool,
    pub payouts_enabled: bool,
    pub details_submitted: bool,
    pub onboarding_status: OnboardingStatus,
    pub last_synced_at: Option<DateTime<Utc>>,
}

/// Capability booleans as reported by the processor; the authoritative
/// source for `charges_enabled`/`payouts_enabled` on our side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityUpdate {
    pub charges_enabled: bool,
    pub payouts_enabled: bool,
    pub details_submitted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingLink {
    pub account_id: String,
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

impl OnboardingLink {
    // single-use by processor convention; an expired link is never reissued to the caller
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
