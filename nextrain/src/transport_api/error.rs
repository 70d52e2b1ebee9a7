//! Transport API client error types.

use super::convert::ConversionError;

/// Errors from the live departures client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Base URL or endpoint could not be parsed
    #[error("invalid URL {url:?}: {message}")]
    InvalidUrl { url: String, message: String },

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service refused the app ID or key
    #[error("unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// The service answered with any other non-success status
    #[error("API error {status}: {message}")]
    Rejected { status: u16, message: String },

    /// Body was not JSON or had the wrong shape
    #[error("JSON parse error: {message}")]
    Decode {
        message: String,
        body: Option<String>,
    },

    /// Body was valid JSON but a departure held an unparseable time
    #[error("JSON parse error: {0}")]
    Conversion(#[from] ConversionError),
}

impl ApiError {
    /// Whether the request timed out before a response arrived.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Transport(e) if e.is_timeout())
    }

    /// Whether the response arrived but could not be turned into a board.
    pub fn is_decode(&self) -> bool {
        matches!(self, ApiError::Decode { .. } | ApiError::Conversion(_))
    }
}
