//! Error types for adapters.
//!
//! The `Display` output of every variant is what ends up in the plugin's
//! UNKNOWN line, so the wording matters to operators.

use thiserror::Error;

/// Errors that can occur when collecting statistics from the resolver.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The control program could not be found.
    #[error("Control command '{0}' not found.")]
    CommandNotFound(String),

    /// The control program exited unsuccessfully; holds its combined output.
    #[error("{0}")]
    CommandFailed(String),

    /// The control program could not be started for another reason.
    #[error("Failed to run control command: {0}")]
    Io(String),

    /// The API rejected the key.
    #[error("Incorrect API Key!")]
    Auth,

    /// The API answered with something other than 200.
    #[error("API unexpected result code {0}")]
    UnexpectedStatus(u16),

    /// Connection failed.
    #[error("Error connecting to {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request to {0} timed out")]
    Timeout(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

#[cfg(feature = "api")]
impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();
        if err.is_timeout() {
            AdapterError::Timeout(url)
        } else if err.is_connect() {
            AdapterError::Connection(url)
        } else if err.is_decode() {
            AdapterError::Parse(err.to_string())
        } else {
            AdapterError::Http(err.to_string())
        }
    }
}
