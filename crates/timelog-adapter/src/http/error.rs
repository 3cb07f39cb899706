/*
[INPUT]:  Error sources (HTTP transport, parser service responses, serialization, URLs)
[OUTPUT]: Structured error types split into remote rejections and transport failures
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Main error type for the parser adapter
#[derive(Error, Debug)]
pub enum ParserError {
    /// HTTP request failed (connection refused, timeout, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Parser service answered with a non-success status
    #[error("API error (status {status}): {detail}")]
    Api { status: u16, detail: String },

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// FastAPI-style error body: `{"detail": ...}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl ParserError {
    /// Server was reachable and rejected the request
    pub fn is_remote_rejection(&self) -> bool {
        matches!(self, ParserError::Api { .. })
    }

    /// Server unreachable, timed out, or answered with something unreadable
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            ParserError::Http(_) | ParserError::Serialization(_) | ParserError::InvalidResponse(_)
        )
    }

    /// Status code reported by the server, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ParserError::Api { status, .. } => Some(*status),
            ParserError::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Create an API error from status code and detail
    pub fn api_error(status: StatusCode, detail: impl Into<String>) -> Self {
        ParserError::Api {
            status: status.as_u16(),
            detail: detail.into(),
        }
    }

    /// Build an API error from a raw error response body.
    ///
    /// Uses `detail` when the body is JSON carrying it, otherwise the trimmed
    /// body text, otherwise the canonical reason phrase.
    pub fn from_error_body(status: StatusCode, body: &str) -> Self {
        let detail = match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                detail: serde_json::Value::String(detail),
            }) => detail,
            Ok(ErrorBody { detail }) => detail.to_string(),
            Err(_) if !body.trim().is_empty() => body.trim().to_string(),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        Self::api_error(status, detail)
    }
}

/// Result type alias for parser adapter operations
pub type Result<T> = std::result::Result<T, ParserError>;
