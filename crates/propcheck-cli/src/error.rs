//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Scenario file is malformed or inconsistent
    #[error("Scenario error: {message}")]
    Scenario {
        /// Error message
        message: String,
    },

    /// `--deny-warnings` was set and diagnostics were found
    #[error("{count} prop warning(s) found")]
    WarningsDenied {
        /// Number of diagnostics
        count: usize,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Propcheck library error
    #[error("Propcheck error: {0}")]
    Propcheck(#[from] propcheck::PropcheckError),

    /// A component lifecycle hook failed during replay
    #[error("Replay failed: {0}")]
    Hook(#[from] propcheck::HookError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl CliError {
    /// Create a scenario error
    #[must_use]
    pub fn scenario(message: impl Into<String>) -> Self {
        Self::Scenario {
            message: message.into(),
        }
    }

}
