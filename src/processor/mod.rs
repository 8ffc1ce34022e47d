use crate::config::AppConfig;
use crate::domain::account::{CapabilityUpdate, OnboardingLink};
use crate::domain::error::PaymentError;
use crate::domain::listing::ProviderProfile;
use std::sync::Arc;

pub mod mock;
pub mod stripe;

#[derive(Debug, Clone)]
pub struct DestinationChargeRequest {
    pub amount_minor: i64,
    pub currency: String,
    pub payment_method_token: String,
    pub destination_account_id: String,
    pub application_fee_minor: i64,
    pub idempotency_key: String,
}

/// Boundary adapter over the processor's account, onboarding-link and charge
/// APIs. Mutating calls carry a caller-supplied idempotency key so a retry
/// after a timeout repeats the original effect exactly once. No local state
/// is mutated here.
#[async_trait::async_trait]
pub trait ProcessorClient: Send + Sync {
    fn name(&self) -> &'static str;

    async fn create_account(&self, profile: &ProviderProfile) -> Result<String, PaymentError>;

    async fn create_onboarding_link(
        &self,
        account_id: &str,
        return_url: &str,
        refresh_url: &str,
    ) -> Result<OnboardingLink, PaymentError>;

    async fn create_destination_charge(
        &self,
        request: DestinationChargeRequest,
    ) -> Result<String, PaymentError>;

    async fn retrieve_account(&self, account_id: &str) -> Result<CapabilityUpdate, PaymentError>;
}

pub fn build_from_config(cfg: &AppConfig) -> Arc<dyn ProcessorClient> {
    if cfg.processor_adapter.eq_ignore_ascii_case("MOCK") {
        Arc::new(mock::MockProcessor {
            behavior: "ALWAYS_SUCCESS".to_string(),
        })
    } else {
        Arc::new(stripe::StripeProcessor {
            base_url: cfg.processor_base_url.clone(),
            secret_key: cfg.processor_secret_key.clone(),
            timeout_ms: cfg.processor_timeout_ms,
            client: reqwest::Client::new(),
        })
    }
}
