//! Binary arithmetic operations
//!
//! The four keypad operators and their checked application on `f64`.

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Type-safe operation enum - the only operators the keypad offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (−)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operation {
    /// All operations in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the ASCII key that selects this operation
    #[must_use]
    pub const fn key(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Returns the typographic symbol used in expression traces
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Returns the name used on the wire by the arithmetic service
    #[must_use]
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Parses a wire name (`add`, `subtract`, `multiply`, `divide`)
    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.wire_name() == name)
    }

    /// Maps an ASCII operator key to an operation
    #[must_use]
    pub const fn from_key(key: char) -> Option<Self> {
        match key {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Returns the precedence level (higher = reduced first)
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide => 2,
        }
    }

    /// Applies the operation to two operands.
    ///
    /// Division by an exact zero fails with [`CalcError::DivisionByZero`];
    /// a non-finite result fails with [`CalcError::Overflow`].
    pub fn apply(&self, a: f64, b: f64) -> CalcResult<f64> {
        let raw = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                a / b
            }
        };
        check_finite(raw)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Rejects NaN and infinities
pub(crate) fn check_finite(value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Symbol tests =====

    #[test]
    fn test_operation_keys() {
        assert_eq!(Operation::Add.key(), '+');
        assert_eq!(Operation::Subtract.key(), '-');
        assert_eq!(Operation::Multiply.key(), '*');
        assert_eq!(Operation::Divide.key(), '/');
    }

    #[test]
    fn test_operation_display_symbols() {
        assert_eq!(Operation::Add.symbol(), "+");
        assert_eq!(Operation::Subtract.symbol(), "−");
        assert_eq!(Operation::Multiply.symbol(), "×");
        assert_eq!(Operation::Divide.symbol(), "÷");
        assert_eq!(format!("{}", Operation::Divide), "÷");
    }

    #[test]
    fn test_from_key_roundtrip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_key(op.key()), Some(op));
        }
        assert_eq!(Operation::from_key('^'), None);
        assert_eq!(Operation::from_key('%'), None);
    }

    #[test]
    fn test_wire_names() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_wire_name(op.wire_name()), Some(op));
        }
        assert_eq!(Operation::from_wire_name("modulo"), None);
        assert_eq!(Operation::from_wire_name("Add"), None);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Operation::Multiply).unwrap();
        assert_eq!(json, "\"multiply\"");
        let op: Operation = serde_json::from_str("\"subtract\"").unwrap();
        assert_eq!(op, Operation::Subtract);
    }

    // ===== Precedence tests =====

    #[test]
    fn test_precedence_levels() {
        assert_eq!(Operation::Add.precedence(), 1);
        assert_eq!(Operation::Subtract.precedence(), 1);
        assert_eq!(Operation::Multiply.precedence(), 2);
        assert_eq!(Operation::Divide.precedence(), 2);
    }

    // ===== Apply tests =====

    #[test]
    fn test_apply_basic() {
        assert_eq!(Operation::Add.apply(2.0, 3.0), Ok(5.0));
        assert_eq!(Operation::Subtract.apply(10.0, 3.0), Ok(7.0));
        assert_eq!(Operation::Multiply.apply(-3.0, 4.0), Ok(-12.0));
        assert_eq!(Operation::Divide.apply(-10.0, -2.0), Ok(5.0));
    }

    #[test]
    fn test_apply_floats() {
        let sum = Operation::Add.apply(0.1, 0.2).unwrap();
        assert!((sum - 0.3).abs() < 1e-12);
        let q = Operation::Divide.apply(1.0, 3.0).unwrap();
        assert!((q - 0.333_333).abs() < 1e-5);
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            Operation::Divide.apply(10.0, 0.0),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            Operation::Divide.apply(10.0, -0.0),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_divide_zero_by_number() {
        assert_eq!(Operation::Divide.apply(0.0, 5.0), Ok(0.0));
    }

    #[test]
    fn test_overflow_detected() {
        assert_eq!(
            Operation::Multiply.apply(f64::MAX, 2.0),
            Err(CalcError::Overflow)
        );
    }
}
