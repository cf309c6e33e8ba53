//! Error types used throughout the request facade

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for restline operations
///
/// Every failure a request can produce is normalized into one of these
/// variants. The variant is the error-kind tag; [`ClientError::status`] and
/// [`ClientError::response_body`] expose the HTTP diagnostics uniformly.
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum ClientError {
    /// Caller supplied conflicting or malformed per-call parameters.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The transport could not establish or complete the exchange
    /// (DNS failure, refused connection, timeout).
    #[error("Connection error: {0}")]
    Connection(String),

    /// The server completed the exchange with a non-success status.
    #[error("HTTP error {status}: {}", .body.as_deref().unwrap_or("<empty body>"))]
    Http {
        /// Status code returned by the server.
        status: u16,
        /// Response body, when the server sent one.
        body: Option<String>,
    },

    /// A typed decode of a response payload failed.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Operation attempted after the client released its transport.
    #[error("Client is closed")]
    Closed,

    /// Construction-time configuration failure.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body carried by this error, if any.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

/// Result type alias for restline operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_exposes_status_and_body() {
        let err = ClientError::Http { status: 404, body: Some("not found".to_string()) };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.response_body(), Some("not found"));
        assert_eq!(err.to_string(), "HTTP error 404: not found");
    }

    #[test]
    fn http_error_without_body() {
        let err = ClientError::Http { status: 502, body: None };
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.response_body(), None);
        assert_eq!(err.to_string(), "HTTP error 502: <empty body>");
    }

    #[test]
    fn non_http_errors_carry_no_status() {
        assert_eq!(ClientError::Closed.status(), None);
        assert_eq!(ClientError::Connection("refused".to_string()).status(), None);
        assert_eq!(ClientError::InvalidArgument("bad".to_string()).response_body(), None);
    }
}
