//! Error taxonomy for backend calls and server error-message normalization.

use serde_json::Value;
use thiserror::Error;

use crate::session::SessionError;

/// Message used when the server supplied neither `error` nor `message`.
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be built locally; nothing was sent.
    #[error("Invalid request: {0}")]
    Request(String),
    /// No response was received.
    #[error("Network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    ///
    /// Displays as the normalized server message only.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The response body did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// HTTP status for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ApiError::Request(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Human-readable message from an error body.
///
/// Prefers a non-empty `error` string, then a non-empty `message` string,
/// then [`UNKNOWN_ERROR`]. Non-JSON bodies get the fallback.
pub fn extract_error_message(body: &[u8]) -> String {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return UNKNOWN_ERROR.to_string();
    };
    ["error", "message"]
        .iter()
        .find_map(|field| {
            value
                .get(field)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or(UNKNOWN_ERROR)
        .to_string()
}
