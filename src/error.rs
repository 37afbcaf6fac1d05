//! Error types for the ambient shell around the digest pipeline.
//!
//! The parsing, classification and filtering core never fails: malformed
//! dates, bad URLs, absent digests and failed retrievals are all recovered
//! where they happen. [`NewsError`] covers what is left over: reading
//! configuration, talking to a content store, persisting marks and
//! interpreting command-line input.

use thiserror::Error;

/// Errors surfaced by stores, configuration and CLI input handling.
#[derive(Error, Debug)]
pub enum NewsError {
    /// Filesystem errors from digest directories or the marks file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport errors from the HTTP content store.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A content store answered with a status that is neither success nor "not found".
    #[error("Unexpected HTTP status {status} for {resource}")]
    Status { status: u16, resource: String },

    /// A base URL or resource URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The YAML configuration file is malformed.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// JSON (de)serialization of marks or output failed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A date given on the command line or in a file name could not be read.
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Convenience alias for `std::result::Result<T, NewsError>`.
pub type Result<T> = std::result::Result<T, NewsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = NewsError::Status {
            status: 503,
            resource: "2024-01-15-digest.md".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("2024-01-15-digest.md"));
    }

    #[test]
    fn test_invalid_date_display() {
        let err = NewsError::InvalidDate("yesterday-ish".to_string());
        assert!(err.to_string().contains("yesterday-ish"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: NewsError = io.into();
        assert!(matches!(err, NewsError::Io(_)));
    }
}
