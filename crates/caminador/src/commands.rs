//! CLI command definitions using clap

use crate::output::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Caminador: CLI for Caminar - tiered test cases and workflow route exploration
#[derive(Parser, Debug)]
#[command(name = "caminador")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk the built-in checkout workflow and draw its route graph
    Walk(WalkArgs),

    /// Print the cases a form generates
    Cases(CasesArgs),

    /// Show the effective walk configuration
    Config(ConfigArgs),
}

/// Arguments for the walk command
#[derive(Parser, Debug, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct WalkArgs {
    /// Walk configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Coverage priority, clamped to 0-3
    #[arg(short, long, allow_negative_numbers = true)]
    pub priority: Option<i64>,

    /// Seed for generated values
    #[arg(long)]
    pub seed: Option<u64>,

    /// Image path; the DOT description is written beside it
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Graphviz program
    #[arg(long)]
    pub graphviz: Option<PathBuf>,

    /// Font for nodes and edges
    #[arg(long)]
    pub font: Option<String>,

    /// Write the DOT description only
    #[arg(long)]
    pub no_render: bool,

    /// Exit non-zero when a route ends in a fault
    #[arg(long)]
    pub fail_on_defect: bool,

    /// Print every route
    #[arg(long)]
    pub routes: bool,

    /// Summary format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the cases command
#[derive(Parser, Debug)]
pub struct CasesArgs {
    /// Form description file (YAML)
    pub file: PathBuf,

    /// Coverage priority, clamped to 0-3
    #[arg(short, long, default_value = "2", allow_negative_numbers = true)]
    pub priority: i64,

    /// Seed for generated values
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Walk configuration file to load (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show the built-in defaults instead
    #[arg(long)]
    pub defaults: bool,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
