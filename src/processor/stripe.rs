use crate::domain::account::{CapabilityUpdate, OnboardingLink};
use crate::domain::error::PaymentError;
use crate::domain::listing::ProviderProfile;
use crate::processor::{DestinationChargeRequest, ProcessorClient};
use chrono::DateTime;

pub struct StripeProcessor {
    pub base_url: String,
    pub secret_key: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

impl StripeProcessor {
    fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }

    async fn read_error(&self, resp: reqwest::Response) -> PaymentError {
        let status = resp.status().as_u16();
        let body: serde_json::Value = resp.json().await.unwrap_or_default();
        let error_type = body
            .get("error")
            .and_then(|e| e.get("type"))
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let error_code = body
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let message = body
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|v| v.as_str())
            .unwrap_or("processor rejected the request")
            .to_string();

        classify_api_error(status, error_type.as_deref(), error_code.as_deref(), message)
    }
}

/// Processor errors are translated into the internal taxonomy, never passed
/// through raw.
pub fn classify_api_error(
    status: u16,
    error_type: Option<&str>,
    error_code: Option<&str>,
    message: String,
) -> PaymentError {
    if status >= 500 || status == 408 || status == 429 {
        return PaymentError::ProcessorUnavailable;
    }
    if status == 404 {
        return PaymentError::AccountNotFound;
    }
    if status == 402 || error_type == Some("card_error") || error_code == Some("card_declined") {
        return PaymentError::CardDeclined;
    }
    if matches!(
        error_code,
        Some("account_invalid") | Some("charges_disabled") | Some("payouts_disabled")
    ) {
        return PaymentError::AccountIneligible;
    }
    PaymentError::Validation(message)
}

pub fn classify_transport_error(e: &reqwest::Error) -> PaymentError {
    if e.is_timeout() || e.is_connect() {
        PaymentError::ProcessorUnavailable
    } else {
        PaymentError::Internal(anyhow::anyhow!("processor transport failure: {e}"))
    }
}

#[async_trait::async_trait]
impl ProcessorClient for StripeProcessor {
    fn name(&self) -> &'static str {
        "stripe"
    }

    async fn create_account(&self, profile: &ProviderProfile) -> Result<String, PaymentError> {
        let params = [
            ("type", "express".to_string()),
            ("email", profile.email.clone()),
            ("country", profile.country.clone()),
            ("business_profile[name]", profile.display_name.clone()),
        ];

        let resp = self
            .client
            .post(format!("{}/v1/accounts", self.base_url))
            .bearer_auth(&self.secret_key)
            .header("Idempotency-Key", format!("acct-{}", profile.provider_id))
            .form(&params)
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        if !resp.status().is_success() {
            return Err(match self.read_error(resp).await {
                PaymentError::Validation(_) => PaymentError::InvalidProfile,
                other => other,
            });
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| PaymentError::Internal(anyhow::anyhow!("account response parse: {e}")))?;
        body.get("id")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| PaymentError::Internal(anyhow::anyhow!("account response missing id")))
    }

    async fn create_onboarding_link(
        &self,
        account_id: &str,
        return_url: &str,
        refresh_url: &str,
    ) -> Result<OnboardingLink, PaymentError> {
        let params = [
            ("account", account_id),
            ("return_url", return_url),
            ("refresh_url", refresh_url),
            ("type", "account_onboarding"),
        ];

        let resp = self
            .client
            .post(format!("{}/v1/account_links", self.base_url))
            .bearer_auth(&self.secret_key)
            .header(
                "Idempotency-Key",
                format!("link-{}", uuid::Uuid::new_v4().simple()),
            )
            .form(&params)
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        if !resp.status().is_success() {
            return Err(self.read_error(resp).await);
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| PaymentError::Internal(anyhow::anyhow!("link response parse: {e}")))?;
        let url = body
            .get("url")
            .and_then(|v| v.as_str())
            .ok_or_else(|| PaymentError::Internal(anyhow::anyhow!("link response missing url")))?;
        let expires_at = body
            .get("expires_at")
            .and_then(|v| v.as_i64())
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(|| PaymentError::Internal(anyhow::anyhow!("link response missing expiry")))?;

        Ok(OnboardingLink {
            account_id: account_id.to_string(),
            url: url.to_string(),
            expires_at,
        })
    }

    async fn create_destination_charge(
        &self,
        request: DestinationChargeRequest,
    ) -> Result<String, PaymentError> {
        let params = [
            ("amount", request.amount_minor.to_string()),
            ("currency", request.currency.clone()),
            ("source", request.payment_method_token.clone()),
            ("application_fee_amount", request.application_fee_minor.to_string()),
            ("transfer_data[destination]", request.destination_account_id.clone()),
        ];

        let resp = self
            .client
            .post(format!("{}/v1/charges", self.base_url))
            .bearer_auth(&self.secret_key)
            .header("Idempotency-Key", request.idempotency_key.clone())
            .form(&params)
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        if !resp.status().is_success() {
            return Err(self.read_error(resp).await);
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| PaymentError::Internal(anyhow::anyhow!("charge response parse: {e}")))?;
        body.get("id")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| PaymentError::Internal(anyhow::anyhow!("charge response missing id")))
    }

    async fn retrieve_account(&self, account_id: &str) -> Result<CapabilityUpdate, PaymentError> {
        let resp = self
            .client
            .get(format!("{}/v1/accounts/{}", self.base_url, account_id))
            .bearer_auth(&self.secret_key)
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        if !resp.status().is_success() {
            return Err(self.read_error(resp).await);
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| PaymentError::Internal(anyhow::anyhow!("account response parse: {e}")))?;
        let flag = |key: &str| body.get(key).and_then(|v| v.as_bool()).unwrap_or(false);

        Ok(CapabilityUpdate {
            charges_enabled: flag("charges_enabled"),
            payouts_enabled: flag("payouts_enabled"),
            details_submitted: flag("details_submitted"),
        })
    }
}
