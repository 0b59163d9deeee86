//! Remote service error types.

use thiserror::Error;

/// Errors that can occur when talking to the metadata service or REDCap.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The service has no record for the requested identifier.
    #[error("{kind} '{id}' was not found in the metadata service")]
    NotFound { kind: &'static str, id: String },

    /// The metadata record exists but lacks a required key.
    #[error("metadata for '{id}' has no '{key}'")]
    MissingKey { key: &'static str, id: String },

    /// Failed to parse a service response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The service returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}
