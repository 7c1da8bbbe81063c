//! Error handling for the homeboard client

use std::fmt;
use thiserror::Error;

/// Unified error type for the homeboard client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing or invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors returned by the remote REST API
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code of the failed request
        status: u16,
        /// Response body, usually a PostgREST or GoTrue error document
        message: String,
    },

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Local file I/O errors, e.g. the persisted theme preference
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new API error from a status code and response body
    pub fn api<T: fmt::Display>(status: u16, message: T) -> Self {
        Error::Api {
            status,
            message: message.to_string(),
        }
    }
}
