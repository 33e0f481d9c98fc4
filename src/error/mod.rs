// Error types for Gemini Vision Pro
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Please enter a query first")]
    MissingPrompt,

    #[error("Please upload an image to analyze")]
    MissingImage,

    #[error("Unsupported file type: {0}. Please upload a JPEG or PNG image")]
    UnsupportedImage(String),

    #[error("File too large: uploads are limited to {0}MB")]
    UploadTooLarge(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API key not configured: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Gemini API error: {0}")]
    GeminiApi(String),

    #[error("Rate limit exceeded: {0}")]
    TooManyRequests(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for input problems caught before any remote call is made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::MissingPrompt
                | AppError::MissingImage
                | AppError::UnsupportedImage(_)
                | AppError::UploadTooLarge(_)
        )
    }
}

// Convert AppError to HTTP responses for Axum
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            AppError::MissingPrompt
            | AppError::MissingImage
            | AppError::UnsupportedImage(_)
            | AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request_error"),
            AppError::UploadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "request_too_large"),
            AppError::MissingApiKey(_) | AppError::Authentication(_) => {
                (StatusCode::UNAUTHORIZED, "authentication_error")
            }
            AppError::TooManyRequests(_) => (StatusCode::TOO_MANY_REQUESTS, "rate_limit_error"),
            AppError::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "overloaded_error"),
            AppError::GeminiApi(_) | AppError::EmptyResponse(_) | AppError::Http(_) => {
                (StatusCode::BAD_GATEWAY, "api_error")
            }
            AppError::Config(_) | AppError::ConfigParsing(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "api_error"),
        };

        let body = json!({
            "type": "error",
            "error": {
                "type": error_type,
                "message": self.to_string(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
