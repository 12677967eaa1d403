//! API Error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use checkin_core::CheckinError;
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Core(#[from] CheckinError),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Core(err) => match err {
                CheckinError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                // Expected user-facing outcome, distinct from a fault.
                CheckinError::CapExceeded(_) => (StatusCode::TOO_MANY_REQUESTS, "CAP_EXCEEDED"),
                CheckinError::AlreadyFlipped(_) => (StatusCode::CONFLICT, "ALREADY_FLIPPED"),
                CheckinError::NoFlipsAvailable => (StatusCode::CONFLICT, "NO_FLIPS_AVAILABLE"),
                CheckinError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                CheckinError::Unauthorized(_) => (StatusCode::FORBIDDEN, "UNAUTHORIZED"),
                CheckinError::Unavailable(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
                }
            },
        };

        let message = match &self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => msg.clone(),
            ApiError::Core(err) => err.to_string(),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;
