use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use notifier_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for rejected documents and adds the request-level
/// failures of the ingestion webhook.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The envelope named a path or carried a document we cannot route.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body was not a usable change-event envelope.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded `MAX_EVENT_BODY_BYTES`.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }
            AppError::Core(CoreError::UnsupportedPath(path)) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_PATH",
                format!("No handler for document path '{path}'"),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg)
            }
        };

        tracing::debug!(status = %status, code, error = %message, "Rejected request");

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
