//! Error types for the HTTP surface and for startup.
//!
//! Request-scoped failures become [`ApiError`] responses and never stop the
//! process. [`ServerError`] covers startup, where failing fast is the point.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use webhook_relay_core::RelayError;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable code, e.g. `INVALID_PAYLOAD`
    pub code: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not a JSON object (400)
    #[error("Invalid payload: {message}")]
    InvalidPayload { message: String },

    /// Broker rejected or failed the publish (502)
    #[error("Publish failed: {message}")]
    PublishFailed { message: String },

    /// Resource not found (404)
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Internal error (500)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload { .. } => StatusCode::BAD_REQUEST,
            ApiError::PublishFailed { .. } => StatusCode::BAD_GATEWAY,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidPayload { .. } => "INVALID_PAYLOAD",
            ApiError::PublishFailed { .. } => "PUBLISH_FAILED",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", self);
        } else {
            warn!(status = status.as_u16(), "{}", self);
        }

        let code = self.code().to_string();
        let message = match self {
            ApiError::InvalidPayload { message }
            | ApiError::PublishFailed { message }
            | ApiError::NotFound { message }
            | ApiError::Internal { message } => message,
        };

        (
            status,
            Json(ApiErrorResponse {
                error: ApiErrorBody { code, message },
            }),
        )
            .into_response()
    }
}

impl From<RelayError> for ApiError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::Decode(message) => ApiError::InvalidPayload { message },
            RelayError::Serialization(message) => ApiError::Internal { message },
            RelayError::Publish(message) | RelayError::Connection(message) => {
                ApiError::PublishFailed { message }
            }
        }
    }
}

/// Configuration problems found before anything is started.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {key}")]
    Missing { key: &'static str },

    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Broker error: {0}")]
    Broker(#[from] RelayError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
