//! Error types for the Cuckoo API client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the Cuckoo API client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ============================================================================
    // Transport / HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the API key (HTTP 401)
    #[error("not authorized")]
    NotAuthorized,

    /// Any status code the calling endpoint does not handle itself.
    ///
    /// The rendered message is matched by the retry policy, keep the format stable.
    #[error("bad response code: {status}")]
    BadStatus { status: u16 },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // API Errors
    // ============================================================================
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("{message}")]
    Api { message: String },

    // ============================================================================
    // Enumeration Errors
    // ============================================================================
    #[error("max retries exceeded: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("operation cancelled")]
    Cancelled,

    #[error("task consumer closed the receiving end")]
    ConsumerClosed,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a bad status error
    pub fn bad_status(status: u16) -> Self {
        Self::BadStatus { status }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an API error
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BadStatus { status } => Some(*status),
            Error::NotAuthorized => Some(401),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            Error::RetriesExhausted { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Check if this error is a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Check if this is the "not authorized" error
    pub fn is_not_authorized(&self) -> bool {
        matches!(self, Error::NotAuthorized)
    }
}

/// Result type alias for the Cuckoo API client
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::bad_status(500);
        assert_eq!(err.to_string(), "bad response code: 500");

        let err = Error::not_found("task");
        assert_eq!(err.to_string(), "task not found");

        assert_eq!(Error::NotAuthorized.to_string(), "not authorized");
    }

    #[test]
    fn test_retries_exhausted_wraps_source() {
        let err = Error::RetriesExhausted {
            attempts: 4,
            source: Box::new(Error::bad_status(500)),
        };
        assert_eq!(
            err.to_string(),
            "max retries exceeded: bad response code: 500"
        );
        assert_eq!(err.status(), Some(500));

        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "bad response code: 500");
    }

    #[test]
    fn test_status() {
        assert_eq!(Error::bad_status(403).status(), Some(403));
        assert_eq!(Error::NotAuthorized.status(), Some(401));
        assert_eq!(Error::Cancelled.status(), None);
        assert_eq!(Error::decode("bad json").status(), None);
    }

    #[test]
    fn test_json_error_converts() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = source.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("JSON error: "));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_predicates() {
        assert!(Error::Cancelled.is_cancelled());
        assert!(!Error::bad_status(500).is_cancelled());
        assert!(Error::NotAuthorized.is_not_authorized());
        assert!(!Error::ConsumerClosed.is_not_authorized());
    }
}
