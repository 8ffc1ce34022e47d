use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct OnboardingLinkView {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

pub async fn start_onboarding(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.onboarding_service.start_onboarding(provider_id).await {
        Ok(link) => (
            axum::http::StatusCode::OK,
            Json(OnboardingLinkView {
                url: link.url,
                expires_at: link.expires_at,
            }),
        )
            .into_response(),
        Err(e) => (e.status(), Json(e.envelope())).into_response(),
    }
}
