// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::gateway::GatewayError;
use crate::models::session::SessionError;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 502 Bad Gateway (model service failed, retry is allowed)
    BadGateway(String),

    // 504 Gateway Timeout (model service did not answer in time)
    GatewayTimeout(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
/// Gateway failures are flagged `retryable` so the page can offer a manual retry.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, retryable) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    false,
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, false),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, false),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg, true),
            AppError::GatewayTimeout(msg) => (StatusCode::GATEWAY_TIMEOUT, msg, true),
        };
        let body = Json(json!({
            "error": error_message,
            "retryable": retryable,
        }));

        (status, body).into_response()
    }
}

/// Converts a model gateway failure into a user-visible, non-fatal error.
impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        tracing::error!("Model gateway failure: {}", err);
        match err {
            GatewayError::Timeout => AppError::GatewayTimeout(
                "The language model did not answer in time. Please try again.".to_string(),
            ),
            other => AppError::BadGateway(format!(
                "The language model request failed: {}. Please try again.",
                other
            )),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
