use crate::domain::error::PaymentError;
use crate::domain::transaction::{CheckoutRequest, TransactionView};
use crate::repo::transactions_repo::StoredTransaction;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

pub async fn create_checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> impl IntoResponse {
    match state.checkout_service.checkout(req).await {
        Ok(resp) => (axum::http::StatusCode::OK, Json(resp)).into_response(),
        Err(e) => (e.status(), Json(e.envelope())).into_response(),
    }
}

pub async fn get_booking_transaction(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.transactions_repo.latest_by_booking(booking_id).await {
        Ok(Some(stored)) => (axum::http::StatusCode::OK, Json(to_view(stored))).into_response(),
        Ok(None) => (
            axum::http::StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": {"code": "TRANSACTION_NOT_FOUND", "message": "no transaction for booking"}
            })),
        )
            .into_response(),
        Err(e) => {
            let e = PaymentError::Internal(e);
            (e.status(), Json(e.envelope())).into_response()
        }
    }
}

fn to_view(stored: StoredTransaction) -> TransactionView {
    TransactionView {
        transaction_id: stored.transaction_id,
        booking_id: stored.booking_id,
        customer_id: stored.customer_id,
        provider_id: stored.provider_id,
        account_id: stored.account_id,
        gross_amount_minor: stored.gross_amount_minor,
        platform_fee_minor: stored.platform_fee_minor,
        currency: stored.currency,
        processor_charge_id: stored.processor_charge_id,
        status: stored.status,
        created_at: stored.created_at,
        finalized_at: stored.finalized_at,
    }
}
