//! Error types for the API adapter.
//!
//! Every failure is handed to the immediate caller; nothing here retries.
//! [`ApiError::kind`] folds the variants into the two failure classes the
//! view layer cares about.

use thiserror::Error;

/// Coarse failure class of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request could not be sent, or no usable response arrived.
    Network,
    /// A response arrived but its body did not have the expected shape.
    Decode,
    /// The call was rejected before any request was issued.
    Usage,
}

/// Errors that can occur while talking to the letsmeet service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, reset, too many redirects...
    #[error("Request to '{url}' failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured total timeout
    #[error("Request to '{url}' timed out after {duration}s")]
    Timeout { url: String, duration: u64 },

    /// The service answered with a non-success status
    #[error("Request to '{url}' returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// Response body was not valid JSON
    #[error("Failed to decode JSON from '{url}': {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A line of a delimited points body did not parse
    #[error("Malformed map point on line {line}: {reason}")]
    MalformedPoint { line: usize, reason: String },

    /// The URL for an endpoint could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid call arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Network { .. } | ApiError::Timeout { .. } | ApiError::Status { .. } => {
                FailureKind::Network
            }
            ApiError::Json { .. } | ApiError::MalformedPoint { .. } => FailureKind::Decode,
            ApiError::InvalidUrl(_) | ApiError::InvalidArgument(_) => FailureKind::Usage,
        }
    }

    /// Get error type string for logs and CLI output
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Network { .. } => "network_error",
            ApiError::Timeout { .. } => "request_timeout",
            ApiError::Status { .. } => "status_error",
            ApiError::Json { .. } => "json_decode_error",
            ApiError::MalformedPoint { .. } => "malformed_point",
            ApiError::InvalidUrl(_) => "invalid_url",
            ApiError::InvalidArgument(_) => "invalid_argument",
        }
    }
}
