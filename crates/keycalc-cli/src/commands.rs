//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// keycalc: keypad calculator with standard operator precedence
#[derive(Parser, Debug)]
#[command(name = "keycalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// YAML configuration file
    #[arg(long, global = true, env = "KEYCALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive terminal calculator
    Tui(TuiArgs),

    /// Evaluate a key sequence and print the display
    ///
    /// Words are keys: `12+3*4=` or `12 + 3 * 4 Enter`. Named keys are
    /// Enter, Esc and BS.
    Eval(EvalArgs),

    /// Run the arithmetic service (POST /api/calculate, GET /api/health)
    Serve(ServeArgs),
}

/// Arguments for the tui command
#[derive(Args, Debug, Default)]
pub struct TuiArgs {
    /// Number of finished expressions kept
    #[arg(long)]
    pub history_limit: Option<usize>,
}

/// Arguments for the eval command
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Keys to press
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub keys: Vec<String>,

    /// Delegate arithmetic to the service at this URL
    #[arg(long)]
    pub remote: Option<String>,

    /// Print display, expression and history as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the serve command
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Send permissive CORS headers
    #[arg(long)]
    pub cors: bool,
}
