//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("User not found")]
    UserNotFound,

    #[error("Book not found")]
    BookNotFound,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            ApiError::BookNotFound => (StatusCode::NOT_FOUND, "Book not found".to_string()),
            ApiError::UsernameTaken => {
                (StatusCode::BAD_REQUEST, "Username already exists".to_string())
            }
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Upstream { status, message } => {
                tracing::warn!(status, "Upstream request failed: {}", message);
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, message)
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                // 500 bodies carry the raw message, no structured code
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
