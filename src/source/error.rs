//! Error types for sample sources.

use thiserror::Error;

/// Errors that can occur when fetching a reading.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Could not reach the endpoint.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// Endpoint answered with a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Response body is not valid JSON of the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Response parsed but does not describe a usable reading.
    #[error("Malformed reading: {0}")]
    Malformed(String),

    /// Reading a replay file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else if err.is_connect() {
            SourceError::Connection(err.to_string())
        } else if err.is_decode() {
            SourceError::Parse(err.to_string())
        } else {
            SourceError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}
