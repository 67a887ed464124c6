/*
 * Responsibility
 * - GET /health (liveness; not behind auth)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> crate::error::AppError {
    crate::error::AppError::not_found("route")
}
