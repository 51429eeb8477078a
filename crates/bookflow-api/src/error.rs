//! API error taxonomy
//!
//! Only the "not found" application code (1004) is ever recovered from, and
//! only by the locator; every other failure aborts the invocation. Since at
//! most one mutating request is issued per invocation, an abort never leaves
//! a partial mutation behind.

use bookflow_core::{CoreError, ResourceKind};
use thiserror::Error;

/// Network-level failure surfaced by a [`Transport`](crate::Transport)
///
/// Carries only a message; the core does not differentiate refused
/// connections from timeouts and performs no retries.
#[derive(Error, Debug)]
#[error("transport failure: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-success response from the remote system: bad HTTP status or a
    /// non-zero application code. The remote-supplied message is surfaced
    /// verbatim when present.
    #[error("API request failed ({status}): {message}")]
    Remote {
        /// HTTP status of the response
        status: u16,
        /// Application-level error code from the body, 0 if absent
        code: i64,
        message: String,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response payload: {0}")]
    UnexpectedPayload(String),

    #[error("{kind} resources have no secondary key '{field}'")]
    UnsupportedKey { kind: ResourceKind, field: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    /// Build a remote error, substituting a generic status-coded message
    /// when the body carried none.
    pub fn remote(status: u16, code: i64, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("API request failed with status {status}"));
        ApiError::Remote {
            status,
            code,
            message,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
