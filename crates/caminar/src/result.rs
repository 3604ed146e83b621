//! Result and error types for Caminar.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for Caminar operations
pub type CaminarResult<T> = Result<T, CaminarError>;

/// Errors that can occur in Caminar
///
/// Only construction problems and IO at the edges are errors. Whatever a
/// [`Step`](crate::Step) does during a walk is recorded as data on the route.
#[derive(Debug, Error)]
pub enum CaminarError {
    /// Malformed field or form definition
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// The graph layout tool is missing or failed
    ///
    /// The text description has already been written when this is returned.
    #[error("Rendering {} failed: {message}", description.display())]
    Render {
        /// Path of the graph description that was written
        description: PathBuf,
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CaminarError {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a render error for the given description file
    #[must_use]
    pub fn render(description: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Render {
            description: description.into(),
            message: message.into(),
        }
    }

    /// Whether this is a configuration error
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error() {
        let err = CaminarError::configuration("empty enum");
        assert!(err.is_configuration());
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("empty enum"));
    }

    #[test]
    fn test_render_error_names_description() {
        let err = CaminarError::render("out/flow.gv", "dot not found");
        assert!(!err.is_configuration());
        let text = err.to_string();
        assert!(text.contains("out/flow.gv"));
        assert!(text.contains("dot not found"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CaminarError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }
}
