//! Health check endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;

use super::{run_blocking, AppState};
use crate::types::HealthResponse;

/// `GET /health` — 200 when the store answers a connectivity probe,
/// 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let service = state.service.clone();
    match run_blocking(move || service.ping()).await {
        Ok(()) => Json(HealthResponse {
            status: "healthy".to_string(),
            database: "connected".to_string(),
            timestamp: Utc::now(),
        })
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    database: "disconnected".to_string(),
                    timestamp: Utc::now(),
                }),
            )
                .into_response()
        }
    }
}
