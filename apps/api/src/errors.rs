use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Every variant renders as a single human-readable message; none is fatal.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Please add your OpenAI API key in Settings.")]
    MissingCredential,

    #[error("Please enter both resume and job description.")]
    EmptyInput,

    #[error("A cover letter is already being generated.")]
    GenerationInProgress,

    #[error("{0}")]
    Transport(String),

    #[error("Could not read the model response: {0}")]
    Decode(String),

    #[error("No content generated.")]
    NoContent,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Http(e) => AppError::Transport(format!("Network error: {e}")),
            api @ LlmError::Api { .. } => AppError::Transport(api.to_string()),
            LlmError::Decode(e) => AppError::Decode(e.to_string()),
            LlmError::EmptyContent => AppError::NoContent,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, code) = match &self {
            AppError::MissingCredential => (StatusCode::PRECONDITION_FAILED, "MISSING_CREDENTIAL"),
            AppError::EmptyInput => (StatusCode::BAD_REQUEST, "EMPTY_INPUT"),
            AppError::GenerationInProgress => (StatusCode::CONFLICT, "GENERATION_IN_PROGRESS"),
            AppError::Transport(msg) => {
                tracing::warn!("Provider transport error: {msg}");
                (StatusCode::BAD_GATEWAY, "TRANSPORT_ERROR")
            }
            AppError::Decode(msg) => {
                tracing::warn!("Provider decode error: {msg}");
                (StatusCode::BAD_GATEWAY, "DECODE_ERROR")
            }
            AppError::NoContent => (StatusCode::BAD_GATEWAY, "NO_CONTENT"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                return error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                );
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                return error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A local storage error occurred".to_string(),
                );
            }
        };

        error_body(status, code, message)
    }
}

fn error_body(status: StatusCode, code: &str, message: String) -> Response {
    let body = Json(json!({
        "error": {
            "code": code,
            "message": message
        }
    }));

    (status, body).into_response()
}
