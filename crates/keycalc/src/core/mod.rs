//! Calculator core: operations, tokens, reduction and the expression engine
//!
//! Everything in here is synchronous and free of I/O. The only fallible
//! step is reduction, which reports through [`CalcError`].

pub mod engine;
pub mod format;
pub mod history;
mod operations;
pub mod reduce;
pub mod token;

pub use engine::{Command, EngineState, ExpressionEngine};
pub use operations::Operation;
pub use token::Token;

pub(crate) use operations::check_finite;

use crate::remote::RemoteError;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// Every variant aborts the command that raised it and leaves the engine
/// state as it was before the command.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    /// A divisor token was exactly zero
    #[error("Division by zero")]
    DivisionByZero,
    /// The result is not a finite number
    #[error("Overflow: result exceeds maximum value")]
    Overflow,
    /// Delegated arithmetic failed
    #[error("Remote arithmetic failed: {0}")]
    Remote(#[from] RemoteError),
}
