//! Output formatting and progress reporting

use caminar::{Route, WalkSummary};
use clap::ValueEnum;
use console::{style, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Status lines go to stderr, results to stdout
#[derive(Debug)]
pub struct Reporter {
    out: Term,
    err: Term,
    spinner: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            spinner: None,
            use_color,
            quiet,
        }
    }

    /// Show a spinner while a long operation runs
    pub fn start_spinner(&mut self, message: &str) {
        if self.quiet || !self.err.is_term() {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Remove the spinner
    pub fn finish_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };

        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // failures print even in quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };

        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        let _ = self.out.write_line("");
        let _ = self.out.write_line(&styled);
    }

    /// Print one line of results
    pub fn line(&self, text: &str) {
        let _ = self.out.write_line(text);
    }

    /// Print numbered routes
    pub fn routes(&self, routes: &[Route]) {
        if self.quiet {
            return;
        }
        for (i, route) in routes.iter().enumerate() {
            self.line(&format!("{:>4}. {route}", i + 1));
        }
    }

    /// Print a walk summary
    pub fn summary(&self, summary: &WalkSummary) {
        if self.quiet && !summary.has_defects() {
            return;
        }

        let _ = self.out.write_line("");
        let clean = !summary.has_defects();

        if self.use_color {
            let good = Style::new().green().bold();
            let bad = Style::new().red().bold();
            let muted = Style::new().yellow();

            let status = if clean {
                good.apply_to("CLEAN")
            } else {
                bad.apply_to("DEFECTS")
            };
            let _ = self.out.write_line(&format!(
                "{} {} routes at {} ({} finished, {} domain errors, {} faults)",
                status,
                summary.routes,
                summary.priority,
                good.apply_to(summary.finished),
                muted.apply_to(summary.domain_errors),
                if clean {
                    summary.faults().to_string()
                } else {
                    bad.apply_to(summary.faults()).to_string()
                }
            ));
        } else {
            let status = if clean { "CLEAN" } else { "DEFECTS" };
            let _ = self.out.write_line(&format!(
                "{status} {} routes at {} ({} finished, {} domain errors, {} faults)",
                summary.routes,
                summary.priority,
                summary.finished,
                summary.domain_errors,
                summary.faults()
            ));
        }

        if !clean {
            let _ = self.out.write_line("defects found:");
            for defect in &summary.defects {
                let _ = self.out.write_line(&format!("  {defect}"));
            }
        }
    }
}

/// Format a summary as pretty JSON
pub fn summary_json(summary: &WalkSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}
