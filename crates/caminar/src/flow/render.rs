//! Rendering graphs with an external Graphviz program.

use crate::result::{CaminarError, CaminarResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Environment variable naming the Graphviz program
pub const GRAPHVIZ_ENV: &str = "GRAPHVIZ_PATH";

/// Program used when `GRAPHVIZ_PATH` is unset
pub const DEFAULT_PROGRAM: &str = "dot";

/// Font passed for nodes and edges
pub const DEFAULT_FONT: &str = "Helvetica";

/// Output format when the image path has no extension
const DEFAULT_FORMAT: &str = "png";

/// Files produced by a render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The DOT description
    pub description: PathBuf,
    /// The rendered image
    pub image: PathBuf,
}

/// Writes DOT descriptions and turns them into images
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    program: PathBuf,
    font: String,
}

impl Default for Renderer {
    fn default() -> Self {
        let program = std::env::var_os(GRAPHVIZ_ENV)
            .filter(|p| !p.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_PROGRAM), PathBuf::from);
        Self {
            program,
            font: DEFAULT_FONT.to_string(),
        }
    }
}

impl Renderer {
    /// Renderer using `$GRAPHVIZ_PATH` or `dot`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific program
    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Use a specific font
    #[must_use]
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// Program that will be run
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Font passed to the program
    #[must_use]
    pub fn font(&self) -> &str {
        &self.font
    }

    /// Path of the description written for `image`
    #[must_use]
    pub fn description_path(image: &Path) -> PathBuf {
        image.with_extension("gv")
    }

    /// Write `dot` beside `image`, creating the directory
    pub fn write_description(&self, dot: &str, image: &Path) -> CaminarResult<PathBuf> {
        let description = Self::description_path(image);
        if let Some(dir) = description.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(&description, dot)?;
        debug!(path = %description.display(), "wrote graph description");
        Ok(description)
    }

    /// Write the description and render it to `image`
    ///
    /// The description stays on disk even when rendering fails.
    pub fn render(&self, dot: &str, image: &Path) -> CaminarResult<Rendered> {
        let description = self.write_description(dot, image)?;
        let format = image
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or(DEFAULT_FORMAT);

        let mut command = Command::new(&self.program);
        command
            .arg(format!("-T{format}"))
            .arg(format!("-Efontname={}", self.font))
            .arg(format!("-Nfontname={}", self.font))
            .arg(format!("-o{}", image.display()))
            .arg(&description);
        debug!(?command, "running graphviz");

        let output = command.output().map_err(|e| {
            CaminarError::render(
                &description,
                format!("could not run {}: {e}", self.program.display()),
            )
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CaminarError::render(
                &description,
                format!(
                    "{} exited with {}: {}",
                    self.program.display(),
                    output.status,
                    stderr.trim()
                ),
            ));
        }

        info!(image = %image.display(), "rendered graph");
        Ok(Rendered {
            description,
            image: image.to_path_buf(),
        })
    }
}
