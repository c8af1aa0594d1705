//! Error types for building the salon client

use thiserror::Error;

/// Errors that can occur while constructing a transport
///
/// Failures of individual requests are reported as
/// [`QueryError`](salon_core::error::QueryError) instead.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL could not be parsed
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The underlying HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}
