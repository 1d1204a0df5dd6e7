// TokenDeck - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every variant keeps the causal
// chain for diagnostic logging, and `Backend` carries the message the
// server put in its response envelope verbatim so it can be shown to
// the operator unchanged.

use std::fmt;

/// Errors produced by the backend API client.
///
/// Every variant that wraps an I/O or decode failure records the request
/// URL so a single log line identifies the failing endpoint.
#[derive(Debug)]
pub enum ApiError {
    /// The HTTP client itself could not be constructed.
    Build { source: reqwest::Error },

    /// The request failed at the transport level (connect, timeout, TLS).
    Http { url: String, source: reqwest::Error },

    /// The server answered with a non-success HTTP status.
    Status { url: String, status: u16 },

    /// The response body was not a valid envelope.
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// The envelope arrived intact but `success` was false; `message` is
    /// the backend-provided failure description.
    Backend { message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Build { source } => {
                write!(f, "Failed to build HTTP client: {source}")
            }
            Self::Http { url, source } => {
                write!(f, "Request to '{url}' failed: {source}")
            }
            Self::Status { url, status } => {
                write!(f, "'{url}' returned HTTP status {status}")
            }
            Self::Decode { url, source } => {
                write!(f, "Malformed response from '{url}': {source}")
            }
            Self::Backend { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Build { source } | Self::Http { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for API call results.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
