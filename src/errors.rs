use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;

use crate::models::ErrorResponse;

/// Application-specific error types.
///
/// Every variant is rendered as `{ "error": "<message>" }`; only the status
/// code differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Missing or empty product description, or an unreadable request body.
    BadRequest(String),
    /// The upstream credential is not configured.
    ConfigError(String),
    /// Network failure, timeout, non-success status or malformed envelope
    /// from the text-generation API.
    ExternalApiError(String),
    /// The model replied, but its text was not a valid classification object.
    ParseError(String),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ExternalApiError(_) | AppError::ParseError(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::ExternalApiError(msg) => write!(f, "External API error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Failed to parse classification: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Logs at a level matching who is at fault: caller mistakes at `warn`,
    /// everything else at `error`.
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::BadRequest(msg) => tracing::warn!("Rejected request: {}", msg),
            AppError::ConfigError(msg) => tracing::error!("Configuration error: {}", msg),
            AppError::ExternalApiError(msg) => tracing::error!("External API error: {}", msg),
            AppError::ParseError(msg) => tracing::error!("Unparseable model reply: {}", msg),
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::ExternalApiError(format!("request timed out: {}", err))
        } else {
            AppError::ExternalApiError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    /// Converts a `serde_json::Error` into an `AppError`.
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}
