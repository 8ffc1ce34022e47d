use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn list_active(State(state): State<AppState>) -> impl IntoResponse {
    match state.listings_repo.list_active().await {
        Ok(items) => (axum::http::StatusCode::OK, Json(items)).into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
