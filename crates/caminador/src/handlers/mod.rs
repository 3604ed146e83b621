//! Command handlers - extracted from main.rs for testability
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - Pure helper functions
//! - Tests

pub mod cases;
pub mod config;
pub mod walk;

// Re-export handlers for convenient access
pub use cases::{execute_cases, generate_cases};
pub use config::{effective_config, execute_config};
pub use walk::{draw_graph, execute_walk, resolve_walk_config};
