//! Expression tokens
//!
//! Numbers keep the literal exactly as typed (`"3."` stays `"3."`) so the
//! expression trace shows what the user entered.

use serde::{Deserialize, Serialize};

use crate::core::Operation;

/// A single element of a pending expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Token {
    /// A decimal literal, stored as entered
    Number(String),
    /// A binary operator
    Operator(Operation),
}

impl Token {
    /// Creates a number token from a literal
    #[must_use]
    pub fn number(literal: impl Into<String>) -> Self {
        Self::Number(literal.into())
    }

    /// Returns true if this token is an operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns the operator, if this is one
    #[must_use]
    pub const fn operator(&self) -> Option<Operation> {
        match self {
            Self::Operator(op) => Some(*op),
            Self::Number(_) => None,
        }
    }

    /// Returns the numeric value of a number token.
    ///
    /// Incomplete literals such as `"3."` parse as their integer part.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(literal) => parse_literal(literal),
            Self::Operator(_) => None,
        }
    }

    /// Returns the text shown for this token in an expression trace
    #[must_use]
    pub fn trace_text(&self) -> &str {
        match self {
            Self::Number(literal) => literal,
            Self::Operator(op) => op.symbol(),
        }
    }
}

/// Parses a keypad literal, accepting a trailing decimal point
pub(crate) fn parse_literal(literal: &str) -> Option<f64> {
    literal
        .strip_suffix('.')
        .unwrap_or(literal)
        .parse::<f64>()
        .ok()
}

/// Joins tokens into a human-readable trace (`5 + 3 ×`)
#[must_use]
pub fn join_trace(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::trace_text)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_value() {
        assert_eq!(Token::number("12").value(), Some(12.0));
        assert_eq!(Token::number("0.5").value(), Some(0.5));
        assert_eq!(Token::number("3.").value(), Some(3.0));
        assert_eq!(Token::number("-8").value(), Some(-8.0));
    }

    #[test]
    fn test_operator_has_no_value() {
        let token = Token::Operator(Operation::Add);
        assert!(token.is_operator());
        assert_eq!(token.value(), None);
        assert_eq!(token.operator(), Some(Operation::Add));
    }

    #[test]
    fn test_number_is_not_operator() {
        let token = Token::number("7");
        assert!(!token.is_operator());
        assert_eq!(token.operator(), None);
    }

    #[test]
    fn test_trace_keeps_literal_as_typed() {
        let tokens = vec![
            Token::number("3."),
            Token::Operator(Operation::Multiply),
            Token::number("2"),
            Token::Operator(Operation::Subtract),
        ];
        assert_eq!(join_trace(&tokens), "3. × 2 −");
    }

    #[test]
    fn test_join_trace_empty() {
        assert_eq!(join_trace(&[]), "");
    }

    #[test]
    fn test_parse_literal_rejects_garbage() {
        assert_eq!(parse_literal("abc"), None);
        assert_eq!(parse_literal("."), None);
    }

    #[test]
    fn test_token_serde_shape() {
        let json = serde_json::to_string(&Token::Operator(Operation::Divide)).unwrap();
        assert_eq!(json, r#"{"kind":"operator","value":"divide"}"#);
        let back: Token = serde_json::from_str(r#"{"kind":"number","value":"4."}"#).unwrap();
        assert_eq!(back, Token::number("4."));
    }
}
