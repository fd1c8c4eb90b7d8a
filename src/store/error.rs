//! Store Errors
//!
//! Error types for remote store calls. These carry no domain meaning: they
//! say the store could not be reached or answered badly, never that the
//! operation itself was invalid.

use std::time::Duration;

/// Errors that can occur while executing a statement against the store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Store could not be reached
    #[error("Store connection failed: {0}")]
    Connection(#[source] reqwest::Error),

    /// Request did not complete within the configured timeout
    #[error("Store request timed out after {0:?}")]
    Timeout(Duration),

    /// Store answered with a non-200 status or an undecodable body
    #[error("Store response error (status {status}): {message}")]
    Response { status: u16, message: String },

    /// HTTP client could not be built
    #[error("Store client setup failed: {0}")]
    Client(#[source] reqwest::Error),
}

impl StoreError {
    pub(crate) fn unexpected_status(status: u16) -> Self {
        Self::Response {
            status,
            message: format!("Store returned {}", status),
        }
    }

    pub(crate) fn malformed(status: u16) -> Self {
        Self::Response {
            status,
            message: "Malformed JSON response".to_string(),
        }
    }

    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection",
            Self::Timeout(_) => "timeout",
            Self::Response { .. } => "response",
            Self::Client(_) => "client",
        }
    }

    /// HTTP status reported by the store, if it answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            _ => None,
        }
    }
}
