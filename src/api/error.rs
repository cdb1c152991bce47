//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::chat::ChatError;
use crate::report::ReportError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Model credential is not configured")]
    ModelUnconfigured,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Upstream model call failed: {0}")]
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::ModelUnconfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "MODEL_UNCONFIGURED",
                "Model credential is not configured".to_string(),
            ),
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            // The upstream message is attached verbatim for diagnostics:
            // callers get exactly one generic failure, never a partial report.
            ApiError::Upstream(detail) => {
                tracing::error!(detail, "upstream model call failed");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_FAILED", detail.clone())
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::EmptyHistory => ApiError::BadRequest(err.to_string()),
            ChatError::Upstream(_) => ApiError::Upstream(err.to_string()),
        }
    }
}
