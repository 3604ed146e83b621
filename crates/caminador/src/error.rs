//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// The walk found faults and the run was asked to fail on them
    #[error("Walk found {count} defect(s)")]
    Defects {
        /// Number of fault routes
        count: usize,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Caminar library error
    #[error("Caminar error: {0}")]
    Caminar(#[from] caminar::CaminarError),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create a defects error
    #[must_use]
    pub const fn defects(count: usize) -> Self {
        Self::Defects { count }
    }
}
