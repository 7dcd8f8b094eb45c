//! Error handling module.
//!
//! This module provides unified error handling with proper HTTP status code mapping
//! and standardized API error responses.

pub mod codes;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub use codes::{ErrorCategory, ErrorCode};

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Destination number missing or blank.
    #[error("No phone number provided")]
    MissingDestination,

    /// Destination number present but unusable.
    #[error("Invalid phone number: {0}")]
    InvalidDestination(String),

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Telephony provider rejected or failed the request.
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// Access token signing failed.
    #[error("Failed to generate token")]
    Token(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for this error.
    ///
    /// Provider errors carry the provider's own code when it supplied one.
    #[must_use]
    pub const fn error_code(&self) -> i64 {
        match self {
            Self::MissingDestination => ErrorCode::MISSING_DESTINATION.as_i64(),
            Self::InvalidDestination(_) => ErrorCode::INVALID_DESTINATION.as_i64(),
            Self::BadRequest(_) => ErrorCode::BAD_REQUEST.as_i64(),
            Self::Provider(err) => err.code(),
            Self::Token(_) => ErrorCode::TOKEN_ERROR.as_i64(),
            Self::Internal(_) => ErrorCode::INTERNAL_ERROR.as_i64(),
        }
    }

    /// Broad class of this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingDestination | Self::InvalidDestination(_) | Self::BadRequest(_) => {
                ErrorCategory::Validation
            }
            Self::Provider(_) => ErrorCategory::Provider,
            Self::Token(_) | Self::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingDestination | Self::InvalidDestination(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Provider(_) | Self::Token(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether the error was caused by the caller's input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingDestination | Self::InvalidDestination(_) | Self::BadRequest(_)
        )
    }

    /// Notice spoken to the caller when this error ends a voice-path request.
    #[must_use]
    pub const fn voice_notice(&self) -> &'static str {
        if self.is_validation() {
            "No phone number provided."
        } else {
            "An error occurred."
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let category = self.category();
        let message = self.to_string();

        if let Self::Token(cause) | Self::Internal(cause) = &self {
            tracing::error!(
                error_code = code,
                category = %category,
                cause = %cause,
                "Request failed"
            );
        } else {
            tracing::error!(
                error_code = code,
                category = %category,
                status = %status,
                message = %message,
                "Request failed"
            );
        }

        let body = Json(json!({
            "success": false,
            "error": message,
            "code": code
        }));

        (status, body).into_response()
    }
}

/// Telephony provider error type.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Provider answered with an error document.
    #[error("{message}")]
    Api {
        /// HTTP status the provider answered with.
        status: u16,
        /// Provider error code, if supplied.
        code: Option<i64>,
        /// Provider error message.
        message: String,
    },

    /// Request never produced a response (connect failure, timeout).
    #[error("Provider request failed: {0}")]
    Transport(String),

    /// Response could not be decoded.
    #[error("Unexpected provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Code reported to API callers.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::Api {
                code: Some(code), ..
            } => *code,
            Self::Api { code: None, .. } => ErrorCode::PROVIDER_REJECTED.as_i64(),
            Self::Transport(_) => ErrorCode::PROVIDER_UNAVAILABLE.as_i64(),
            Self::Decode(_) => ErrorCode::PROVIDER_BAD_RESPONSE.as_i64(),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias using `ProviderError`.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
