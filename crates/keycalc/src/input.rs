//! Key mapping
//!
//! Front-ends translate their native events into [`Key`]s; this module turns
//! keys into engine [`Command`]s. Unrecognized keys map to `None` and are
//! ignored.

use crate::core::{Command, Operation};

/// A platform-neutral key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character
    Char(char),
    /// Enter / Return
    Enter,
    /// Escape
    Escape,
    /// Backspace
    Backspace,
}

impl Key {
    /// Maps the key to an engine command
    #[must_use]
    pub fn command(self) -> Option<Command> {
        match self {
            Self::Char(c @ '0'..='9') => c.to_digit(10).map(|d| Command::Digit(d as u8)),
            Self::Char('.') => Some(Command::DecimalPoint),
            Self::Char('=') | Self::Enter => Some(Command::Equals),
            Self::Char('c' | 'C') | Self::Escape => Some(Command::Clear),
            Self::Backspace => Some(Command::Backspace),
            Self::Char(c) => Operation::from_key(c).map(Command::Operator),
        }
    }

    /// Parses a named key or a single character
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Enter" | "enter" | "Return" => Some(Self::Enter),
            "Escape" | "Esc" | "escape" | "esc" => Some(Self::Escape),
            "Backspace" | "BS" | "backspace" | "bs" => Some(Self::Backspace),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Self::Char(c)),
                    _ => None,
                }
            }
        }
    }

    /// Parses a textual key sequence.
    ///
    /// Words are separated by whitespace. A word naming a key (`Enter`,
    /// `Esc`, `BS`, ...) is that key; any other word is typed character by
    /// character, so `"12+3*4="` and `"12 + 3 * 4 Enter"` are equivalent.
    #[must_use]
    pub fn parse_sequence(text: &str) -> Vec<Self> {
        text.split_whitespace()
            .flat_map(|word| match Self::from_name(word) {
                Some(key) => vec![key],
                None => word.chars().map(Self::Char).collect(),
            })
            .collect()
    }
}

impl From<Command> for Key {
    fn from(command: Command) -> Self {
        match command {
            Command::Digit(d) => Self::Char(char::from_digit(u32::from(d), 10).unwrap_or('?')),
            Command::DecimalPoint => Self::Char('.'),
            Command::Operator(op) => Self::Char(op.key()),
            Command::Equals => Self::Enter,
            Command::Clear => Self::Escape,
            Command::Backspace => Self::Backspace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Key -> Command =====

    #[test]
    fn test_digit_keys() {
        for (i, c) in ('0'..='9').enumerate() {
            assert_eq!(Key::Char(c).command(), Some(Command::Digit(i as u8)));
        }
    }

    #[test]
    fn test_operator_keys() {
        assert_eq!(
            Key::Char('+').command(),
            Some(Command::Operator(Operation::Add))
        );
        assert_eq!(
            Key::Char('-').command(),
            Some(Command::Operator(Operation::Subtract))
        );
        assert_eq!(
            Key::Char('*').command(),
            Some(Command::Operator(Operation::Multiply))
        );
        assert_eq!(
            Key::Char('/').command(),
            Some(Command::Operator(Operation::Divide))
        );
    }

    #[test]
    fn test_equals_keys() {
        assert_eq!(Key::Char('=').command(), Some(Command::Equals));
        assert_eq!(Key::Enter.command(), Some(Command::Equals));
    }

    #[test]
    fn test_clear_keys() {
        assert_eq!(Key::Escape.command(), Some(Command::Clear));
        assert_eq!(Key::Char('c').command(), Some(Command::Clear));
        assert_eq!(Key::Char('C').command(), Some(Command::Clear));
    }

    #[test]
    fn test_misc_keys() {
        assert_eq!(Key::Backspace.command(), Some(Command::Backspace));
        assert_eq!(Key::Char('.').command(), Some(Command::DecimalPoint));
    }

    #[test]
    fn test_unrecognized_keys_ignored() {
        for c in ['^', '%', '(', 'x', ' ', 'é'] {
            assert_eq!(Key::Char(c).command(), None, "{c}");
        }
    }

    // ===== Sequence parsing =====

    #[test]
    fn test_parse_compact_sequence() {
        let keys = Key::parse_sequence("12+3=");
        assert_eq!(
            keys,
            vec![
                Key::Char('1'),
                Key::Char('2'),
                Key::Char('+'),
                Key::Char('3'),
                Key::Char('='),
            ]
        );
    }

    #[test]
    fn test_parse_named_keys() {
        let keys = Key::parse_sequence("9 BS 7 Enter Esc");
        assert_eq!(
            keys,
            vec![
                Key::Char('9'),
                Key::Backspace,
                Key::Char('7'),
                Key::Enter,
                Key::Escape,
            ]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(Key::parse_sequence("   ").is_empty());
    }

    #[test]
    fn test_command_key_roundtrip() {
        for command in [
            Command::Digit(0),
            Command::Digit(9),
            Command::DecimalPoint,
            Command::Operator(Operation::Divide),
            Command::Equals,
            Command::Clear,
            Command::Backspace,
        ] {
            assert_eq!(Key::from(command).command(), Some(command));
        }
    }
}
