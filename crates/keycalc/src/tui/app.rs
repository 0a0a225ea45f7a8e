//! TUI application state

use ratatui::layout::Rect;
use tracing::debug;

use super::input::KeyAction;
use super::keypad::Keypad;
use crate::core::{CalcError, ExpressionEngine};
use crate::input::Key;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    /// The engine behind the display
    engine: ExpressionEngine,
    /// Error waiting to be acknowledged
    error: Option<CalcError>,
    /// On-screen keypad, with the last pressed key lit
    keypad: Keypad,
    /// Whether the app should quit
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a new calculator app
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(ExpressionEngine::new())
    }

    /// Creates an app around an existing engine
    #[must_use]
    pub fn with_engine(engine: ExpressionEngine) -> Self {
        Self {
            engine,
            error: None,
            keypad: Keypad::new(),
            should_quit: false,
        }
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &ExpressionEngine {
        &self.engine
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// The error currently shown, if any
    #[must_use]
    pub fn error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    /// Removes and returns the pending error
    pub fn take_error(&mut self) -> Option<CalcError> {
        self.error.take()
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Forgets all finished expressions
    pub fn clear_history(&mut self) {
        self.engine.clear_history();
    }

    /// Presses a calculator key.
    ///
    /// While an error is shown the key only dismisses it.
    pub fn press(&mut self, key: Key) {
        if self.error.take().is_some() {
            debug!(?key, "error dismissed");
            self.keypad.release_all();
            return;
        }

        let Some(command) = key.command() else {
            return;
        };
        self.keypad.highlight(command);

        if let Err(e) = self.engine.dispatch(command) {
            self.error = Some(e);
        }
    }

    /// Applies an action from the input handler
    pub fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Key(key) => self.press(key),
            KeyAction::ClearHistory => self.clear_history(),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Handles a mouse click at (`x`, `y`) given where the keypad was drawn
    pub fn click(&mut self, keypad_area: Rect, x: u16, y: u16) {
        if let Some(command) = self.keypad.hit_test(keypad_area, x, y) {
            self.press(Key::from(command));
        }
    }
}
