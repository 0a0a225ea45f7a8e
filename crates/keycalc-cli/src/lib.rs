//! keycalc command-line front-end
//!
//! - `keycalc tui`: interactive terminal calculator
//! - `keycalc eval <keys>`: press keys, print the display
//! - `keycalc serve`: run the arithmetic service

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;

pub use commands::{Cli, Commands, EvalArgs, ServeArgs, TuiArgs};
pub use config::{CliConfig, ServerConfig, Verbosity};
pub use error::{CliError, CliResult};
