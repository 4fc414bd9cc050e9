use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::FallbackError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant maps to HTTP 400 with the body `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    BackendExhausted(#[from] FallbackError),

    #[error("{0}")]
    EmptyGeneration(String),

    #[error("Failed to parse AI response: {0}")]
    MalformedStructuredResponse(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BackendExhausted(_) => "BACKEND_EXHAUSTED",
            AppError::EmptyGeneration(_) => "EMPTY_GENERATION",
            AppError::MalformedStructuredResponse(_) => "MALFORMED_ROADMAP_RESPONSE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal(e) => tracing::error!(code = self.code(), "Internal error: {e:?}"),
            AppError::BackendExhausted(e) => tracing::error!(
                code = self.code(),
                last_model = ?e.last().map(|f| f.model.as_str()),
                attempts = ?e.attempts,
                "{e}"
            ),
            _ => tracing::warn!(code = self.code(), "{self}"),
        }

        let body = Json(json!({ "error": self.to_string() }));

        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
