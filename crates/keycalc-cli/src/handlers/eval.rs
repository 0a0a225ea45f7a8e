//! `eval`: press a key sequence and report the result

use keycalc::core::history::{History, HistoryEntry};
use keycalc::core::{CalcResult, ExpressionEngine};
use keycalc::driver::CalculatorDriver;
use keycalc::input::Key;
use keycalc::remote::{Arithmetic, HttpArithmetic};
use serde::Serialize;
use tracing::info;

use crate::commands::EvalArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Machine-readable outcome of `eval --json`
#[derive(Debug, Serialize)]
pub struct EvalReport {
    /// Main display text
    pub display: String,
    /// Expression trace
    pub expression: String,
    /// Finished expressions, oldest first
    pub history: Vec<HistoryEntry>,
}

impl EvalReport {
    /// Captures the engine's current readout
    #[must_use]
    pub fn from_engine(engine: &ExpressionEngine) -> Self {
        let readout = engine.state().readout();
        Self {
            display: readout.display,
            expression: readout.expression,
            history: engine.history().iter().cloned().collect(),
        }
    }
}

/// Presses `keys` with local arithmetic
pub fn evaluate_local(engine: &mut ExpressionEngine, keys: &str) -> CalcResult<()> {
    engine.type_keys(keys)
}

/// Presses `keys`, delegating `=` arithmetic
pub async fn evaluate_remote(
    engine: &mut ExpressionEngine,
    keys: &str,
    arithmetic: &dyn Arithmetic,
) -> CalcResult<()> {
    for command in Key::parse_sequence(keys).into_iter().filter_map(Key::command) {
        engine.dispatch_with(command, arithmetic).await?;
    }
    Ok(())
}

/// Runs the eval subcommand
pub fn run_eval(config: &CliConfig, args: &EvalArgs) -> CliResult<()> {
    let keys = args.keys.join(" ");
    let mut engine = ExpressionEngine::with_history(History::with_capacity(config.history_limit));

    match args.remote.as_deref().or(config.remote_url.as_deref()) {
        Some(url) => {
            info!(%url, "delegating arithmetic");
            let remote = HttpArithmetic::new(url);
            super::runtime()?.block_on(evaluate_remote(&mut engine, &keys, &remote))?;
        }
        None => evaluate_local(&mut engine, &keys)?,
    }

    if args.json {
        let report = EvalReport::from_engine(&engine);
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::invalid_argument(e.to_string()))?;
        println!("{json}");
    } else {
        println!("{}", engine.state().display_text());
    }
    Ok(())
}
