//! Caminador: command-line interface for Caminar
//!
//! Walks the built-in checkout workflow, prints tiered cases for form
//! descriptions, and shows the effective walk configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

pub mod checkout;
mod commands;
mod config;
mod error;
pub mod handlers;
mod logging;
mod output;

pub use checkout::{Checkout, Order, OrderFlag, OrderService};
pub use commands::{CasesArgs, Cli, ColorArg, Commands, ConfigArgs, WalkArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::init_logging;
pub use output::{summary_json, OutputFormat, Reporter};
