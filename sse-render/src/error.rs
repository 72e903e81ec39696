//! Error types and HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while encoding or delivering an event
///
/// Any error means the event was not fully delivered. Bytes written to the
/// sink before the failure stay written.
#[derive(Debug, Error)]
pub enum Error {
    /// The output sink refused or failed a write
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A structured payload could not be converted to JSON
    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// A configured value cannot be used as an HTTP header value
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

impl Error {
    /// Whether the sink failed the write
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Whether the payload failed to serialize
    #[must_use]
    pub fn is_serialization(&self) -> bool {
        matches!(self, Error::Serialization(_))
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Optional error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// HTTP status code
    pub status: u16,
}

impl ErrorResponse {
    /// Create error response with a code
    pub fn with_code(
        status: StatusCode,
        code: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            error: error.into(),
            code: Some(code.into()),
            status: status.as_u16(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let error_response = match self {
            Error::Io(e) => {
                tracing::error!("I/O error: {}", e);
                ErrorResponse::with_code(status, "IO_ERROR", "I/O operation failed")
            }

            Error::Serialization(e) => {
                tracing::error!("Serialization error: {}", e);
                ErrorResponse::with_code(
                    status,
                    "SERIALIZATION_ERROR",
                    "Event payload could not be serialized",
                )
            }

            Error::Config(e) => {
                ErrorResponse::with_code(status, "CONFIG_ERROR", e.to_string())
            }

            Error::InvalidHeader(msg) => {
                tracing::error!("Invalid header value: {}", msg);
                ErrorResponse::with_code(status, "INVALID_HEADER", msg)
            }
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        // serde_json reports sink failures through its own error type
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::Serialization(err)
        }
    }
}
