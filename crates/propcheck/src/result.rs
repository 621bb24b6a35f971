//! Result and error types for propcheck.
//!
//! Instrumentation itself never fails: these errors only surface while
//! loading configuration from disk or text.

use thiserror::Error;

/// Result type for propcheck operations
pub type PropcheckResult<T> = Result<T, PropcheckError>;

/// Errors that can occur while loading propcheck configuration
#[derive(Debug, Error)]
pub enum PropcheckError {
    /// Configuration file has an extension we do not know how to parse
    #[error("Unsupported configuration format: {extension}")]
    UnsupportedFormat {
        /// File extension that was rejected
        extension: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_display() {
        let err = PropcheckError::UnsupportedFormat {
            extension: "ini".to_string(),
        };
        assert!(err.to_string().contains("ini"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PropcheckError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }
}
