//! keycalc: keypad calculator
//!
//! ## Usage
//!
//! ```bash
//! keycalc tui                          # Interactive calculator
//! keycalc eval "2+3*4="                # Prints 14
//! keycalc eval --json 12 + 3 Enter     # Display, expression and history
//! keycalc serve --port 5000 --cors     # Arithmetic service
//! ```

use clap::Parser;
use keycalc_cli::{
    handlers::{eval::run_eval, serve::run_serve, tui::run_tui},
    logging, Cli, CliConfig, CliResult, Commands, Verbosity,
};
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
    let config = build_config(&cli)?;

    // the TUI owns the terminal, so it runs without a log subscriber
    if !matches!(cli.command, Commands::Tui(_)) {
        logging::init(config.verbosity);
    }

    match cli.command {
        Commands::Tui(args) => {
            let limit = args.history_limit.unwrap_or(config.history_limit);
            run_tui(limit)
        }
        Commands::Eval(args) => run_eval(&config, &args),
        Commands::Serve(args) => {
            let mut server = config.server;
            if let Some(host) = args.host {
                server.host = host;
            }
            if let Some(port) = args.port {
                server.port = port;
            }
            server.cors |= args.cors;
            run_serve(&server)
        }
    }
}

/// Loads the config file, then applies global flags
fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::new(),
    };

    if cli.quiet || cli.verbose > 0 {
        let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
        Ok(config.with_verbosity(verbosity))
    } else {
        Ok(config)
    }
}
