use crate::domain::fee::FeeModel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Succeeded,
    Failed,
    Refunded,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Succeeded => "SUCCEEDED",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Refunded => "REFUNDED",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "SUCCEEDED" => TransactionStatus::Succeeded,
            "FAILED" => TransactionStatus::Failed,
            "REFUNDED" => TransactionStatus::Refunded,
            _ => TransactionStatus::Pending,
        }
    }
}

pub fn status_for_charge_event(event_type: &str) -> Option<TransactionStatus> {
    match event_type {
        "charge.succeeded" => Some(TransactionStatus::Succeeded),
        "charge.failed" => Some(TransactionStatus::Failed),
        "charge.refunded" => Some(TransactionStatus::Refunded),
        _ => None,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub booking_id: Uuid,
    pub customer_id: Uuid,
    pub provider_id: Uuid,
    pub gross_amount_minor: i64,
    pub currency: String,
    pub payment_method_token: String,
    pub fee_model: Option<FeeModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub transaction_id: Uuid,
    pub booking_id: Uuid,
    pub status: TransactionStatus,
    pub processor_charge_id: Option<String>,
    pub gross_amount_minor: i64,
    pub platform_fee_minor: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionView {
    pub transaction_id: Uuid,
    pub booking_id: Uuid,
    pub customer_id: Uuid,
    pub provider_id: Uuid,
    pub account_id: String,
    pub gross_amount_minor: i64,
    pub platform_fee_minor: i64,
    pub currency: String,
    pub processor_charge_id: Option<String>,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub finalized_at: Option<DateTime<Utc>>,
}
