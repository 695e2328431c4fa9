use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid section specified")]
    InvalidSection,

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub const RETRY_MESSAGE: &str = "Failed to improve CV content. Please try again.";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidSection => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::MalformedBody(msg) => {
                tracing::error!("Malformed request body: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, RETRY_MESSAGE.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, RETRY_MESSAGE.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
