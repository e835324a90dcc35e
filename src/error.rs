//! Error taxonomy for graphnav.
//!
//! Every layer below the HTTP surface returns [`GraphError`]; the
//! [`IntoResponse`] impl maps the taxonomy onto status codes in one place
//! so handlers can use `?` throughout.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Malformed input (empty name, oversized label, bad page params).
    #[error("{0}")]
    Validation(String),

    /// Missing node or edge endpoint. The message names what is missing.
    #[error("{0}")]
    NotFound(String),

    /// Storage-layer failure. Detail is logged server-side, never sent to
    /// the client.
    #[error("database error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Failures outside the domain taxonomy (e.g. a blocking task that
    /// never completed).
    #[error("{0}")]
    Unexpected(String),
}

/// JSON error body shared by every failure response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for GraphError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            GraphError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            GraphError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            GraphError::Store(err) => {
                tracing::error!(error = %err, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
            GraphError::Unexpected(msg) => {
                tracing::error!(error = %msg, "unexpected failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
