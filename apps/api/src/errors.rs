use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::session::SessionError;
use crate::setup::store::StoreError;

/// The one message the client shows for any failed generation or refinement.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Yanıt üretilirken bir hata oluştu. Lütfen tekrar deneyin.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid state: {0}")]
    Session(#[from] SessionError),

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    /// Carries the internal cause for logging; clients only ever see
    /// `GENERATION_FAILED_MESSAGE`.
    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Session(e) => (StatusCode::CONFLICT, "INVALID_STATE", e.to_string()),
            AppError::ConfirmationRequired(msg) => (
                StatusCode::PRECONDITION_REQUIRED,
                "CONFIRMATION_REQUIRED",
                msg.clone(),
            ),
            AppError::Generation(cause) => {
                tracing::error!("Generation error: {cause}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_FAILED",
                    GENERATION_FAILED_MESSAGE.to_string(),
                )
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_hides_cause() {
        let response = AppError::Generation("upstream 500: quota".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_session_error_maps_to_conflict() {
        let response = AppError::Session(SessionError::Busy).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_confirmation_required_status() {
        let response =
            AppError::ConfirmationRequired("confirm the clear".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::PRECONDITION_REQUIRED);
    }
}
