//! Expression engine: keypad commands in, immutable states out
//!
//! [`EngineState`] is a value. Every command produces a fresh state and never
//! touches the one it was called on, so a failed `=` leaves the caller's
//! state intact simply by discarding the error. [`ExpressionEngine`] owns the
//! current state plus the session history and swaps states atomically.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::format::format_number;
use crate::core::history::History;
use crate::core::reduce::Stream;
use crate::core::token::{join_trace, Token};
use crate::core::{CalcResult, Operation};
use crate::remote::Arithmetic;

/// A single edit command from the keypad or keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// A digit key, `0..=9`; anything larger is ignored
    Digit(u8),
    /// The decimal point key
    DecimalPoint,
    /// One of the four operator keys
    Operator(Operation),
    /// The equals key
    Equals,
    /// Reset everything
    Clear,
    /// Delete the last typed character
    Backspace,
}

/// Snapshot of the engine as seen by a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Readout {
    /// Current number or last result
    pub display: String,
    /// Human-readable trace, empty when nothing is in progress
    pub expression: String,
}

/// Complete state of one calculation session.
///
/// Invariants: `tokens` is empty or ends in an operator and alternates
/// number/operator; `current_input` is never empty and always parses as a
/// (possibly unfinished) decimal literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineState {
    tokens: Vec<Token>,
    current_input: String,
    last_result: Option<f64>,
    /// Set once a digit or point was typed after the last operator
    entry_started: bool,
    /// Trace of the finished expression, meaningful while `last_result` is set
    trace: String,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            tokens: Vec::new(),
            current_input: "0".to_string(),
            last_result: None,
            entry_started: false,
            trace: String::new(),
        }
    }
}

impl EngineState {
    /// Creates the session start state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed, not yet evaluated tokens
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The literal being typed
    #[must_use]
    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    /// Result of the most recent `=`, until the next command consumes it
    #[must_use]
    pub const fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    /// Text for the main display.
    ///
    /// After `=` the current input holds the formatted result, so this is
    /// always the current input.
    #[must_use]
    pub fn display_text(&self) -> &str {
        &self.current_input
    }

    /// Trace for the history line (`5 + 3 ×`, or `5 + 3 × 2 = 11` after `=`)
    #[must_use]
    pub fn expression_text(&self) -> String {
        if self.last_result.is_some() {
            self.trace.clone()
        } else {
            join_trace(&self.tokens)
        }
    }

    /// Display and expression together
    #[must_use]
    pub fn readout(&self) -> Readout {
        Readout {
            display: self.display_text().to_string(),
            expression: self.expression_text(),
        }
    }

    /// Applies any command; only [`Command::Equals`] can fail
    pub fn apply(&self, command: Command) -> CalcResult<Self> {
        match command {
            Command::Digit(d) => Ok(self.input_digit(d)),
            Command::DecimalPoint => Ok(self.input_decimal_point()),
            Command::Operator(op) => Ok(self.input_operator(op)),
            Command::Equals => self.input_equals(),
            Command::Clear => Ok(Self::clear()),
            Command::Backspace => Ok(self.backspace()),
        }
    }

    /// Types a digit, starting a fresh expression after a result
    #[must_use]
    pub fn input_digit(&self, digit: u8) -> Self {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            return self.clone();
        };
        if self.last_result.is_some() {
            return Self {
                current_input: ch.to_string(),
                entry_started: true,
                ..Self::default()
            };
        }
        let mut next = self.clone();
        if next.current_input == "0" {
            next.current_input = ch.to_string();
        } else {
            next.current_input.push(ch);
        }
        next.entry_started = true;
        next
    }

    /// Types a decimal point; a second point in the same literal is ignored
    #[must_use]
    pub fn input_decimal_point(&self) -> Self {
        if self.last_result.is_some() {
            return Self {
                current_input: "0.".to_string(),
                entry_started: true,
                ..Self::default()
            };
        }
        let mut next = self.clone();
        if !next.current_input.contains('.') {
            next.current_input.push('.');
        }
        next.entry_started = true;
        next
    }

    /// Commits the current literal and an operator.
    ///
    /// After a result, the result seeds the new expression. Pressing an
    /// operator again before typing a new number replaces the pending one.
    #[must_use]
    pub fn input_operator(&self, op: Operation) -> Self {
        if let Some(result) = self.last_result {
            return Self {
                tokens: vec![Token::Number(format_number(result)), Token::Operator(op)],
                ..Self::default()
            };
        }
        let mut next = self.clone();
        let replace = !self.entry_started && next.tokens.last().is_some_and(Token::is_operator);
        if replace {
            if let Some(pending) = next.tokens.last_mut() {
                *pending = Token::Operator(op);
            }
        } else {
            next.tokens.push(Token::Number(self.current_input.clone()));
            next.tokens.push(Token::Operator(op));
        }
        next.current_input = "0".to_string();
        next.entry_started = false;
        next
    }

    /// Evaluates the pending expression with local arithmetic.
    ///
    /// A no-op when nothing was committed. On error `self` is untouched.
    pub fn input_equals(&self) -> CalcResult<Self> {
        let Some((completed, stream)) = self.completed() else {
            return Ok(self.clone());
        };
        let result = stream.reduce()?;
        Ok(Self::finished(&completed, result))
    }

    /// Evaluates the pending expression, delegating each step to `arithmetic`
    pub async fn input_equals_with(&self, arithmetic: &dyn Arithmetic) -> CalcResult<Self> {
        let Some((completed, stream)) = self.completed() else {
            return Ok(self.clone());
        };
        let result = stream.reduce_with(arithmetic).await?;
        Ok(Self::finished(&completed, result))
    }

    /// Deletes the last typed character; after a result this clears.
    ///
    /// Once the literal is back to the default `0` the entry counts as not
    /// started, so a following operator replaces the pending one.
    #[must_use]
    pub fn backspace(&self) -> Self {
        if self.last_result.is_some() {
            return Self::clear();
        }
        let mut next = self.clone();
        next.current_input.pop();
        if next.current_input.is_empty() || next.current_input == "0" {
            next.current_input = "0".to_string();
            next.entry_started = false;
        }
        next
    }

    /// The session start state
    #[must_use]
    pub fn clear() -> Self {
        Self::default()
    }

    /// Pending tokens plus the current literal, ready for reduction
    fn completed(&self) -> Option<(Vec<Token>, Stream)> {
        if self.tokens.is_empty() {
            return None;
        }
        let mut completed = self.tokens.clone();
        if completed.last().is_some_and(Token::is_operator) {
            completed.push(Token::Number(self.current_input.clone()));
        }
        let stream = Stream::from_tokens(&completed);
        debug_assert!(stream.is_some(), "engine produced a malformed stream");
        stream.map(|stream| (completed, stream))
    }

    fn finished(completed: &[Token], result: f64) -> Self {
        let display = format_number(result);
        Self {
            trace: format!("{} = {}", join_trace(completed), display),
            current_input: display,
            last_result: Some(result),
            ..Self::default()
        }
    }
}

/// Stateful wrapper: current state plus in-session history
#[derive(Debug, Default)]
pub struct ExpressionEngine {
    state: EngineState,
    history: History,
}

impl ExpressionEngine {
    /// Creates an engine at the session start state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine recording into the given history
    #[must_use]
    pub fn with_history(history: History) -> Self {
        Self {
            state: EngineState::default(),
            history,
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Finished expressions of this session
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Drops all history entries
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Processes one command with local arithmetic.
    ///
    /// On error the current state is kept and the error returned for the
    /// caller to surface.
    pub fn dispatch(&mut self, command: Command) -> CalcResult<&EngineState> {
        debug!(?command, "dispatching command");
        match self.state.apply(command) {
            Ok(next) => Ok(self.commit(command, next)),
            Err(error) => {
                warn!(%error, ?command, "command aborted, state unchanged");
                Err(error)
            }
        }
    }

    /// Processes one command, delegating `=` arithmetic to `arithmetic`
    pub async fn dispatch_with(
        &mut self,
        command: Command,
        arithmetic: &dyn Arithmetic,
    ) -> CalcResult<&EngineState> {
        debug!(?command, "dispatching command with delegated arithmetic");
        let next = match command {
            Command::Equals => self.state.input_equals_with(arithmetic).await,
            other => self.state.apply(other),
        };
        match next {
            Ok(next) => Ok(self.commit(command, next)),
            Err(error) => {
                warn!(%error, ?command, "command aborted, state unchanged");
                Err(error)
            }
        }
    }

    fn commit(&mut self, command: Command, next: EngineState) -> &EngineState {
        let evaluated = command == Command::Equals && !self.state.tokens.is_empty();
        if evaluated {
            if let Some(result) = next.last_result {
                let mut completed = self.state.tokens.clone();
                completed.push(Token::Number(self.state.current_input.clone()));
                let expression = join_trace(&completed);
                info!(%expression, result, "expression evaluated");
                self.history.record(&expression, result);
            }
        }
        self.state = next;
        &self.state
    }
}
