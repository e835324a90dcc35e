//! Edge handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::{run_blocking, AppState};
use crate::error::Result;
use crate::types::{Edge, EdgeCreate};

/// `POST /edges` — create a directed edge. 201 on success, 404 naming the
/// missing endpoint, 422 on an oversized label.
pub async fn create_edge(
    State(state): State<AppState>,
    Json(req): Json<EdgeCreate>,
) -> Result<(StatusCode, Json<Edge>)> {
    let service = state.service.clone();
    let edge = run_blocking(move || service.create_edge(&req)).await?;
    Ok((StatusCode::CREATED, Json(edge)))
}
