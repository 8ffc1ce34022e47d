use axum::http::StatusCode;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("payment processor unavailable, try again shortly")]
    ProcessorUnavailable,
    #[error("provider profile was rejected by the payment processor")]
    InvalidProfile,
    #[error("card was declined")]
    CardDeclined,
    #[error("destination account cannot currently accept charges")]
    AccountIneligible,
    #[error("no payment account exists for this provider")]
    AccountNotFound,
    #[error("provider has not completed payment onboarding")]
    ProviderNotEligible,
    #[error("booking already has an active payment")]
    AlreadyPaid,
    #[error("webhook signature rejected")]
    SignatureInvalid,
    #[error("checkout is not currently available")]
    CheckoutDisabled,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PaymentError {
    pub fn code(&self) -> &'static str {
        match self {
            PaymentError::ProcessorUnavailable => "PROCESSOR_UNAVAILABLE",
            PaymentError::InvalidProfile => "INVALID_PROFILE",
            PaymentError::CardDeclined => "CARD_DECLINED",
            PaymentError::AccountIneligible => "ACCOUNT_INELIGIBLE",
            PaymentError::AccountNotFound => "ACCOUNT_NOT_FOUND",
            PaymentError::ProviderNotEligible => "PROVIDER_NOT_ELIGIBLE",
            PaymentError::AlreadyPaid => "ALREADY_PAID",
            PaymentError::SignatureInvalid => "SIGNATURE_INVALID",
            PaymentError::CheckoutDisabled => "CHECKOUT_DISABLED",
            PaymentError::Validation(_) => "VALIDATION_FAILED",
            PaymentError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            PaymentError::ProcessorUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            PaymentError::InvalidProfile => StatusCode::BAD_REQUEST,
            PaymentError::CardDeclined => StatusCode::PAYMENT_REQUIRED,
            PaymentError::AccountIneligible => StatusCode::CONFLICT,
            PaymentError::AccountNotFound => StatusCode::NOT_FOUND,
            PaymentError::ProviderNotEligible => StatusCode::CONFLICT,
            PaymentError::AlreadyPaid => StatusCode::CONFLICT,
            PaymentError::SignatureInvalid => StatusCode::BAD_REQUEST,
            PaymentError::CheckoutDisabled => StatusCode::SERVICE_UNAVAILABLE,
            PaymentError::Validation(_) => StatusCode::BAD_REQUEST,
            PaymentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Transient failures the caller may retry with backoff.
    pub fn retryable(&self) -> bool {
        matches!(self, PaymentError::ProcessorUnavailable | PaymentError::Internal(_))
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: ErrorPayload {
                code: self.code().to_string(),
                message: self.to_string(),
                details: None,
            },
        }
    }
}

impl From<sqlx::Error> for PaymentError {
    fn from(e: sqlx::Error) -> Self {
        PaymentError::Internal(e.into())
    }
}
