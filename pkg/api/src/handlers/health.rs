use axum::{Json, response::IntoResponse};

/// GET /health — liveness probe, no auth required.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({"status": "healthy"}))
}
