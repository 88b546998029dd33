//! Proxy-boundary error responses.
//!
//! Per-call upstream failures are not errors here; they are absorbed into
//! the aggregate. Only the two conditions that fail the whole inbound
//! request have a variant.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Request-level failure of the aggregation endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// No (or blank) Authorization header; rejected before any upstream
    /// call is attempted.
    #[error("Missing Authorization header")]
    MissingCredential,

    /// Fault in the orchestration itself (e.g. a panicked call task).
    #[error("Internal error calling remote APIs: {0}")]
    Internal(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::MissingCredential => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Missing Authorization header" })),
            )
                .into_response(),
            ProxyError::Internal(message) => {
                tracing::error!(error = %message, "Aggregation request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Internal error calling remote APIs",
                        "message": message,
                    })),
                )
                    .into_response()
            }
        }
    }
}
