//! Error types for the PhotoFindr client.
//!
//! This module defines the centralized error type [`PhotoFindrError`] and a type alias
//! [`Result`] used throughout the crate. Errors raised at the backend boundary are
//! classified by the workflow layer into user-facing outcomes and never reach the
//! page layer as raw values.

use thiserror::Error;

/// The main error type for PhotoFindr operations.
///
/// Most variants wrap underlying errors from external crates using `#[from]` for
/// automatic conversion. Backend failures keep the endpoint that produced them so
/// log lines can name the failing call.
///
/// # Examples
///
/// ```
/// use photofindr::PhotoFindrError;
///
/// let err = PhotoFindrError::Status { endpoint: "/api/caption".to_string(), status: 500 };
/// assert_eq!(err.to_string(), "Backend returned HTTP 500 for /api/caption");
/// assert!(!err.is_timeout());
/// ```
#[derive(Debug, Error)]
pub enum PhotoFindrError {
    /// Transport-level HTTP failure (connection refused, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status code.
    #[error("Backend returned HTTP {status} for {endpoint}")]
    Status {
        /// Path of the endpoint that was called.
        endpoint: String,
        /// HTTP status code of the response.
        status: u16,
    },

    /// The call did not complete within the configured timeout.
    #[error("Request to {endpoint} timed out")]
    TimedOut {
        /// Path of the endpoint that was called.
        endpoint: String,
    },

    /// The call was cancelled before it completed.
    #[error("Request cancelled")]
    Cancelled,

    /// A URL could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// User input was rejected before any network call.
    #[error("Invalid input: {0}")]
    Validation(String),
}

impl PhotoFindrError {
    /// Returns `true` if this error represents an elapsed timeout.
    ///
    /// Covers both the explicit [`PhotoFindrError::TimedOut`] variant and reqwest's
    /// own timeout errors.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::TimedOut { .. } => true,
            Self::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// A specialized `Result` type for PhotoFindr operations.
pub type Result<T> = std::result::Result<T, PhotoFindrError>;
