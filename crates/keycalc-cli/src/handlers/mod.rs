//! Subcommand handlers

pub mod eval;
pub mod serve;
pub mod tui;

use crate::error::{CliError, CliResult};

/// Creates the runtime for a blocking subcommand
fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server(format!("Failed to create runtime: {e}")))
}
