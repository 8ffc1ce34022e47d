use crate::domain::account::{CapabilityUpdate, OnboardingLink};
use crate::domain::error::PaymentError;
use crate::domain::listing::ProviderProfile;
use crate::processor::{DestinationChargeRequest, ProcessorClient};
use chrono::Utc;

pub struct MockProcessor {
    pub behavior: String,
}

#[async_trait::async_trait]
impl ProcessorClient for MockProcessor {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn create_account(&self, _profile: &ProviderProfile) -> Result<String, PaymentError> {
        match self.behavior.as_str() {
            "PROCESSOR_DOWN" => Err(PaymentError::ProcessorUnavailable),
            "REJECT_PROFILE" => Err(PaymentError::InvalidProfile),
            _ => Ok(format!("acct_mock_{}", uuid::Uuid::new_v4().simple())),
        }
    }

    async fn create_onboarding_link(
        &self,
        account_id: &str,
        return_url: &str,
        _refresh_url: &str,
    ) -> Result<OnboardingLink, PaymentError> {
        match self.behavior.as_str() {
            "PROCESSOR_DOWN" => Err(PaymentError::ProcessorUnavailable),
            _ => Ok(OnboardingLink {
                account_id: account_id.to_string(),
                url: format!(
                    "{}#mock-onboarding-{}",
                    return_url,
                    uuid::Uuid::new_v4().simple()
                ),
                expires_at: Utc::now() + chrono::Duration::minutes(30),
            }),
        }
    }

    async fn create_destination_charge(
        &self,
        _request: DestinationChargeRequest,
    ) -> Result<String, PaymentError> {
        match self.behavior.as_str() {
            "PROCESSOR_DOWN" => Err(PaymentError::ProcessorUnavailable),
            "ALWAYS_DECLINE" => Err(PaymentError::CardDeclined),
            "DESTINATION_INELIGIBLE" => Err(PaymentError::AccountIneligible),
            _ => Ok(format!("ch_mock_{}", uuid::Uuid::new_v4().simple())),
        }
    }

    async fn retrieve_account(&self, _account_id: &str) -> Result<CapabilityUpdate, PaymentError> {
        match self.behavior.as_str() {
            "PROCESSOR_DOWN" => Err(PaymentError::ProcessorUnavailable),
            _ => Ok(CapabilityUpdate {
                charges_enabled: true,
                payouts_enabled: true,
                details_submitted: true,
            }),
        }
    }
}
