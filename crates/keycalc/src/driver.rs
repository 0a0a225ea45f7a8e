//! Unified calculator driver
//!
//! Behavioural checks are written once against [`CalculatorDriver`] and run
//! against every front-end: the bare engine and the TUI app.

use crate::core::format::format_number;
use crate::core::{CalcError, CalcResult, ExpressionEngine};
use crate::input::Key;

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Presses a single key; unrecognized keys are ignored
    fn press(&mut self, key: Key) -> CalcResult<()>;

    /// Main display text
    fn display(&self) -> String;

    /// Expression trace
    fn expression(&self) -> String;

    /// Finished expressions, newest first
    fn history(&self) -> Vec<HistoryItem>;

    /// Types a key sequence (see [`Key::parse_sequence`]), stopping at the
    /// first error
    fn type_keys(&mut self, keys: &str) -> CalcResult<()> {
        for key in Key::parse_sequence(keys) {
            self.press(key)?;
        }
        Ok(())
    }
}

/// A history line as seen through a driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// The evaluated expression
    pub expression: String,
    /// The formatted result
    pub result: String,
}

impl CalculatorDriver for ExpressionEngine {
    fn press(&mut self, key: Key) -> CalcResult<()> {
        if let Some(command) = key.command() {
            self.dispatch(command)?;
        }
        Ok(())
    }

    fn display(&self) -> String {
        self.state().display_text().to_string()
    }

    fn expression(&self) -> String {
        self.state().expression_text()
    }

    fn history(&self) -> Vec<HistoryItem> {
        ExpressionEngine::history(self)
            .iter_rev()
            .map(|entry| HistoryItem {
                expression: entry.expression.clone(),
                result: format_number(entry.result),
            })
            .collect()
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use super::{CalcResult, CalculatorDriver, HistoryItem};
    use crate::input::Key;
    use crate::tui::CalculatorApp;

    /// Drives a [`CalculatorApp`] the way the event loop would
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, key: Key) -> CalcResult<()> {
            self.app.press(key);
            match self.app.take_error() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }

        fn display(&self) -> String {
            self.app.engine().state().display_text().to_string()
        }

        fn expression(&self) -> String {
            self.app.engine().state().expression_text()
        }

        fn history(&self) -> Vec<HistoryItem> {
            CalculatorDriver::history(self.app.engine())
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified behavioural checks =====

/// Verifies precedence and left-to-right ties
pub fn verify_precedence<D: CalculatorDriver>(driver: &mut D) {
    assert!(driver.type_keys("2+3*4=").is_ok());
    assert_eq!(driver.display(), "14");
    assert_eq!(driver.expression(), "2 + 3 × 4 = 14");

    assert!(driver.type_keys("Esc 8-2-3=").is_ok());
    assert_eq!(driver.display(), "3");
}

/// Verifies operator replacement and continuation from a result
pub fn verify_operator_handling<D: CalculatorDriver>(driver: &mut D) {
    assert!(driver.type_keys("Esc 5+*2=").is_ok());
    assert_eq!(driver.display(), "10");

    assert!(driver.type_keys("Esc 5+3=").is_ok());
    assert_eq!(driver.display(), "8");
    assert!(driver.type_keys("+2=").is_ok());
    assert_eq!(driver.display(), "10");
    assert_eq!(driver.expression(), "8 + 2 = 10");
}

/// Verifies that division by zero is reported and recoverable
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    assert!(driver.type_keys("Esc 4/0").is_ok());
    let display = driver.display();
    let expression = driver.expression();
    assert_eq!(driver.press(Key::Enter), Err(CalcError::DivisionByZero));
    assert_eq!(driver.display(), display);
    assert_eq!(driver.expression(), expression);

    assert!(driver.type_keys("BS 2=").is_ok());
    assert_eq!(driver.display(), "2");
}

/// Verifies editing keys
pub fn verify_editing<D: CalculatorDriver>(driver: &mut D) {
    assert!(driver.type_keys("Esc 3..").is_ok());
    assert_eq!(driver.display(), "3.");
    assert!(driver.type_keys("BS BS").is_ok());
    assert_eq!(driver.display(), "0");
    assert!(driver.type_keys("7 =").is_ok());
    assert_eq!(driver.display(), "7");
    assert_eq!(driver.expression(), "");
    assert!(driver.type_keys("c").is_ok());
    assert_eq!(driver.display(), "0");
}

/// Verifies the history ordering
pub fn verify_history<D: CalculatorDriver>(driver: &mut D) {
    assert!(driver.type_keys("Esc 1+1= Esc 2*3=").is_ok());
    let history = driver.history();
    assert!(history.len() >= 2);
    assert_eq!(
        history[0],
        HistoryItem {
            expression: "2 × 3".into(),
            result: "6".into(),
        }
    );
    assert_eq!(history[1].expression, "1 + 1");
}

/// Runs every check
pub fn verify_all<D: CalculatorDriver>(driver: &mut D) {
    verify_precedence(driver);
    verify_operator_handling(driver);
    verify_division_by_zero(driver);
    verify_editing(driver);
    verify_history(driver);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_driver_all() {
        let mut engine = ExpressionEngine::new();
        verify_all(&mut engine);
    }

    #[test]
    fn test_engine_driver_ignores_unknown_keys() {
        let mut engine = ExpressionEngine::new();
        engine.type_keys("1 ^ % 2").unwrap();
        assert_eq!(engine.display(), "12");
    }

    #[test]
    fn test_type_keys_stops_at_error() {
        let mut engine = ExpressionEngine::new();
        let result = engine.type_keys("1/0=5");
        assert_eq!(result, Err(CalcError::DivisionByZero));
        assert_eq!(engine.display(), "0");
    }

    #[cfg(feature = "tui")]
    #[test]
    fn test_tui_driver_all() {
        let mut driver = TuiDriver::new();
        verify_all(&mut driver);
    }
}
