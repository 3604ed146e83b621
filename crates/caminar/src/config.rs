//! Walk configuration

use crate::flow::{Renderer, DEFAULT_FONT};
use crate::form::Priority;
use crate::result::CaminarResult;
use crate::seed::Seed;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for one walk and its rendering
///
/// Loaded from YAML; every key is optional.
///
/// ```yaml
/// priority: 2
/// seed: 42
/// output: out/checkout.svg
/// graphviz: /usr/bin/dot
/// font: DejaVu Sans
/// render: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalkConfig {
    /// Coverage ceiling passed to forms and flow
    pub priority: Priority,
    /// Fixed seed for field values (random when absent)
    pub seed: Option<Seed>,
    /// Image path; the DOT description is written beside it
    pub output: PathBuf,
    /// Graphviz program (`$GRAPHVIZ_PATH` or `dot` when absent)
    pub graphviz: Option<PathBuf>,
    /// Font for nodes and edges
    pub font: String,
    /// Whether to run Graphviz after writing the description
    pub render: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            priority: Priority::INVALID,
            seed: None,
            output: PathBuf::from("output/flow.png"),
            graphviz: None,
            font: DEFAULT_FONT.to_string(),
            render: true,
        }
    }
}

impl WalkConfig {
    /// Create default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse YAML text
    pub fn from_yaml(yaml: &str) -> CaminarResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Read a YAML file
    pub fn from_path(path: &Path) -> CaminarResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Serialize as YAML
    pub fn to_yaml(&self) -> CaminarResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Set priority
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Set seed
    #[must_use]
    pub const fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set output image path
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Set Graphviz program
    #[must_use]
    pub fn with_graphviz(mut self, program: impl Into<PathBuf>) -> Self {
        self.graphviz = Some(program.into());
        self
    }

    /// Set font
    #[must_use]
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// Enable or disable rendering
    #[must_use]
    pub const fn with_render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }

    /// Renderer for these settings
    #[must_use]
    pub fn renderer(&self) -> Renderer {
        let renderer = Renderer::new().with_font(self.font.clone());
        match &self.graphviz {
            Some(program) => renderer.with_program(program.clone()),
            None => renderer,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod defaults_tests {
        use super::*;

        #[test]
        fn test_default() {
            let config = WalkConfig::default();
            assert_eq!(config.priority, Priority::INVALID);
            assert!(config.seed.is_none());
            assert_eq!(config.output, PathBuf::from("output/flow.png"));
            assert!(config.render);
        }

        #[test]
        fn test_empty_yaml_is_default() {
            assert_eq!(WalkConfig::from_yaml("{}").unwrap(), WalkConfig::default());
        }
    }

    mod yaml_tests {
        use super::*;
        use std::io::Write;
        use tempfile::NamedTempFile;

        #[test]
        fn test_partial_yaml() {
            let config = WalkConfig::from_yaml("priority: 3\nseed: 42\nrender: false\n").unwrap();
            assert_eq!(config.priority, Priority::EXHAUSTIVE);
            assert_eq!(config.seed, Some(Seed::from_u64(42)));
            assert!(!config.render);
            assert_eq!(config.font, DEFAULT_FONT);
        }

        #[test]
        fn test_priority_is_clamped() {
            let config = WalkConfig::from_yaml("priority: 9").unwrap();
            assert_eq!(config.priority, Priority::EXHAUSTIVE);
        }

        #[test]
        fn test_unknown_key_rejected() {
            assert!(WalkConfig::from_yaml("prority: 1").is_err());
        }

        #[test]
        fn test_round_trip_through_file() {
            let config = WalkConfig::new()
                .with_priority(1)
                .with_seed(Seed::from_u64(5))
                .with_output("out/demo.svg")
                .with_graphviz("/opt/graphviz/bin/dot");
            let mut file = NamedTempFile::new().unwrap();
            file.write_all(config.to_yaml().unwrap().as_bytes()).unwrap();

            assert_eq!(WalkConfig::from_path(file.path()).unwrap(), config);
        }

        #[test]
        fn test_missing_file() {
            let err = WalkConfig::from_path(Path::new("/nonexistent/walk.yaml")).unwrap_err();
            assert!(matches!(err, crate::CaminarError::Io(_)));
        }
    }

    mod builder_tests {
        use super::*;

        #[test]
        fn test_renderer_follows_settings() {
            let config = WalkConfig::new()
                .with_graphviz("neato")
                .with_font("Mono")
                .with_render(false);
            let renderer = config.renderer();
            assert_eq!(renderer.program(), Path::new("neato"));
            assert_eq!(renderer.font(), "Mono");
            assert!(!config.render);
        }
    }
}
