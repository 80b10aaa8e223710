//! Error types for the HTTP fetch boundary.

use thiserror::Error;

/// Every way a single poll can fail to produce a color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("failed to read response body: {0}")]
    Body(String),
}

impl FetchError {
    pub(crate) fn from_request(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err.to_string())
        }
    }

    pub(crate) fn from_body(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Body(err.to_string())
        }
    }
}
