//! Caminador CLI: walk workflows and generate tiered test cases
//!
//! ## Usage
//!
//! ```bash
//! caminador walk                          # Walk the checkout demo at priority 2
//! caminador walk -p 3 -o out/flow.svg     # Exhaustive walk, SVG graph
//! caminador walk --no-render --format json
//! caminador cases login.yaml -p 1         # Cases of a form description
//! caminador config                        # Effective walk configuration
//! ```

use caminador::{
    handlers::{execute_cases, execute_config, execute_walk},
    init_logging, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = build_config(&cli);
    init_logging(config.verbosity);
    config.color.apply();

    match cli.command {
        Commands::Walk(args) => execute_walk(&config, &args),
        Commands::Cases(args) => execute_cases(&config, &args),
        Commands::Config(args) => execute_config(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.verbose, cli.quiet);
    let color: ColorChoice = cli.color.clone().into();
    CliConfig::new().with_verbosity(verbosity).with_color(color)
}
