//! Error types for bookcheck-core

use thiserror::Error;

use crate::assertions::ValidationFailure;

/// Core error type for harness operations
#[derive(Debug, Error)]
pub enum Error {
    /// One or more checks failed for a single invocation
    #[error("{0}")]
    Validation(ValidationFailure),

    /// An expected field was absent or malformed in a response body
    #[error("Response parse error: {detail} (status {status}): {body}")]
    ResponseParse {
        /// What was missing or malformed
        detail: String,
        /// HTTP status of the offending response
        status: u16,
        /// Raw body, possibly truncated
        body: String,
    },

    /// Network or connection failure reported by the transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// The record generator could not produce a complete batch
    #[error("Generator error: {0}")]
    Generator(String),

    /// Invalid configuration value
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Build a parse error, truncating large bodies so log lines stay readable
    #[must_use]
    pub fn response_parse(detail: impl Into<String>, status: u16, body: &str) -> Self {
        const MAX_BODY: usize = 256;
        let body = if body.chars().count() > MAX_BODY {
            let head: String = body.chars().take(MAX_BODY).collect();
            format!("{head}…")
        } else {
            body.to_string()
        };
        Self::ResponseParse {
            detail: detail.into(),
            status,
            body,
        }
    }

    /// Whether this error came from the aggregated assertion path
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<ValidationFailure> for Error {
    fn from(failure: ValidationFailure) -> Self {
        Self::Validation(failure)
    }
}

/// Result type alias for bookcheck operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parse_truncates_long_bodies() {
        let body = "x".repeat(1000);
        let err = Error::response_parse("missing field `ID`", 500, &body);
        let rendered = err.to_string();
        assert!(rendered.starts_with("Response parse error: missing field `ID` (status 500)"));
        assert!(rendered.ends_with('…'));
        assert!(rendered.len() < 400);
    }

    #[test]
    fn test_short_body_kept_verbatim() {
        let err = Error::response_parse("body is not JSON", 502, "<html>bad gateway</html>");
        assert!(err.to_string().ends_with("<html>bad gateway</html>"));
        assert!(!err.is_validation());
    }
}
