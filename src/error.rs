//! Error types for upstream fetches
//!
//! Failures are returned as values, never cached, and always end up rendered
//! as an error card rather than surfaced to the HTTP caller.

use thiserror::Error;

// == Fetch Error Enum ==
/// Outcome of a failed upstream call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Upstream answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Connection, TLS or body read failure
    #[error("Failed to fetch data from GitHub")]
    Transport(String),

    /// Body was not valid JSON or lacked a required field
    #[error("Failed to decode GitHub response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Builds the error for a non-ok upstream status.
    pub fn from_status(status: u16) -> Self {
        FetchError::Status {
            status,
            message: format!("GitHub API Error: {}", status),
        }
    }

    // == Status ==
    /// HTTP status this failure maps to. Anything that is not an upstream
    /// status is reported as 500.
    pub fn status(&self) -> u16 {
        match self {
            FetchError::Status { status, .. } => *status,
            FetchError::Transport(_) | FetchError::Decode(_) => 500,
        }
    }

    /// True when the upstream reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == 404
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for upstream fetches.
pub type Result<T> = std::result::Result<T, FetchError>;
