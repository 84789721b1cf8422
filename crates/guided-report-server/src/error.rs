//! Error types for the analysis service.
//!
//! [`ApiError`] implements [`axum::response::IntoResponse`] so handlers can
//! return `Result<…, ApiError>` directly. Client-facing messages are fixed;
//! the underlying cause only goes to the log.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use guided_report_models::ErrorBody;

use crate::llm::LlmError;

/// Errors returned by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The body was not JSON, lacked `concern`, or `concern` was blank.
    #[error("concern field is required")]
    MissingConcern(String),

    /// The model call failed.
    #[error("failed to analyze concern")]
    AnalysisFailed(#[from] LlmError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingConcern(detail) => {
                tracing::warn!(detail = %detail, "rejected analyze request");
                StatusCode::BAD_REQUEST
            }
            Self::AnalysisFailed(cause) => {
                tracing::error!(error = %cause, "analysis failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
