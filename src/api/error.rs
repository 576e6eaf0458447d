//! Client Error Types
//!
//! Everything that can go wrong talking to the condominium backend.

use thiserror::Error;

/// Errors from the REST client
#[derive(Error, Debug)]
pub enum ClientError {
    /// No bearer token in the session; nothing was sent
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Signed in, but the endpoint is limited to administrators; nothing was sent
    #[error("Administrator role required")]
    AdminOnly,

    /// Backend answered 401/403
    #[error("Unauthorized ({0})")]
    Unauthorized(u16),

    /// Backend answered with any other non-2xx status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body did not match the expected record shape
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Registration password and its confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl ClientError {
    /// Classify a transport-level reqwest failure
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(err)
        }
    }

    /// Map a non-success status to an error
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ClientError::Unauthorized(status),
            _ => ClientError::Status { status, message },
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
