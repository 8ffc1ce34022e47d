use crate::domain::account::{ConnectedAccount, OnboardingStatus};
use crate::domain::error::PaymentError;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct AccountView {
    pub account_id: String,
    pub provider_id: Uuid,
    pub onboarding_status: OnboardingStatus,
    pub charges_enabled: bool,
    pub payouts_enabled: bool,
    pub details_submitted: bool,
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl From<ConnectedAccount> for AccountView {
    fn from(account: ConnectedAccount) -> Self {
        Self {
            account_id: account.account_id,
            provider_id: account.provider_id,
            onboarding_status: account.onboarding_status,
            charges_enabled: account.charges_enabled,
            payouts_enabled: account.payouts_enabled,
            details_submitted: account.details_submitted,
            last_synced_at: account.last_synced_at,
        }
    }
}

pub async fn get_payment_account(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.accounts_repo.get_by_provider(provider_id).await {
        Ok(Some(account)) => {
            (axum::http::StatusCode::OK, Json(AccountView::from(account))).into_response()
        }
        Ok(None) => {
            let e = PaymentError::AccountNotFound;
            (e.status(), Json(e.envelope())).into_response()
        }
        Err(e) => {
            let e = PaymentError::Internal(e);
            (e.status(), Json(e.envelope())).into_response()
        }
    }
}

pub async fn refresh_account(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.onboarding_service.refresh_account(provider_id).await {
        Ok(account) => {
            (axum::http::StatusCode::OK, Json(AccountView::from(account))).into_response()
        }
        Err(e) => (e.status(), Json(e.envelope())).into_response(),
    }
}
