//! Error types for the Loomport API client.

use thiserror::Error;

/// Errors raised by API operations and wait helpers.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ApiError {
    /// Raised when the high-level configuration is incomplete.
    #[error("configuration error: {0}")]
    Config(String),
    /// Raised when a request fails local validation before being sent.
    #[error("invalid request: {0}")]
    Validation(String),
    /// Raised when the HTTP request could not be executed.
    #[error("transport error: {message}")]
    Transport {
        /// Message reported by the HTTP layer.
        message: String,
    },
    /// Raised when the API rejects a request.
    #[error("API request failed with status {status}: {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },
    /// Raised when a response body cannot be decoded into the expected shape.
    #[error("failed to decode response from {path}: {message}")]
    Decode {
        /// Request path whose response failed to decode.
        path: String,
        /// Decoder error message.
        message: String,
    },
    /// Raised when credentials are rejected or a session token is invalid.
    #[error("authentication failed: {message}")]
    Auth {
        /// Message returned by the authentication endpoint.
        message: String,
    },
    /// Raised when a wait did not converge within its time budget.
    #[error("timeout waiting for {resource} {uid}")]
    WaitTimeout {
        /// Resource kind being waited on.
        resource: String,
        /// Product identifier being waited on.
        uid: String,
    },
    /// Raised when a wait was canceled by the caller.
    #[error("wait for {resource} {uid} was canceled")]
    WaitCanceled {
        /// Resource kind being waited on.
        resource: String,
        /// Product identifier being waited on.
        uid: String,
    },
}

impl From<crate::config::ConfigError> for ApiError {
    fn from(value: crate::config::ConfigError) -> Self {
        Self::Config(value.to_string())
    }
}
