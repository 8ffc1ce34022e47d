use crate::domain::error::PaymentError;
use crate::domain::event::ProcessorEvent;
use crate::webhook::signature::{verify_signature, SIGNATURE_HEADER};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

/// 2xx is returned only after the event is durably recorded; the processor
/// retries on anything else, which is the expected recovery path. A bad
/// signature is logged and dropped, never retried by us.
pub async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    if !verify_signature(&body, signature, &state.webhook_secret, Utc::now()) {
        tracing::warn!("webhook signature rejected");
        let e = PaymentError::SignatureInvalid;
        return (e.status(), Json(e.envelope())).into_response();
    }

    let payload: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(_) => {
            let e = PaymentError::Validation("malformed event payload".to_string());
            return (e.status(), Json(e.envelope())).into_response();
        }
    };
    let Some(event) = ProcessorEvent::from_payload(&payload) else {
        let e = PaymentError::Validation("event missing id, type or created".to_string());
        return (e.status(), Json(e.envelope())).into_response();
    };

    match state.webhook_processor.process(&event).await {
        Ok(outcome) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({"received": true, "outcome": outcome.as_str()})),
        )
            .into_response(),
        Err(e) => (e.status(), Json(e.envelope())).into_response(),
    }
}
