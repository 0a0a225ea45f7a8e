//! Terminal key handling
//!
//! Maps crossterm key events to app-level actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::Key;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A calculator key
    Key(Key),
    /// Forget all finished expressions
    ClearHistory,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                KeyCode::Char('l') => KeyAction::ClearHistory,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char(c) => KeyAction::Key(Key::Char(c)),
            KeyCode::Enter => KeyAction::Key(Key::Enter),
            KeyCode::Esc => KeyAction::Key(Key::Escape),
            KeyCode::Backspace | KeyCode::Delete => KeyAction::Key(Key::Backspace),
            _ => KeyAction::None,
        }
    }
}
