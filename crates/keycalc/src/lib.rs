//! keycalc - keypad calculator engine
//!
//! Turns discrete key presses into an arithmetic expression and reduces it
//! with standard precedence: `×` and `÷` bind tighter than `+` and `−`, ties
//! go left to right.
//!
//! # Layers
//!
//! - [`core`]: immutable [`EngineState`](core::EngineState) with pure
//!   transitions, two-pass reduction and in-session history
//! - [`input`]: platform-neutral keys and the key → command map
//! - [`queue`]: a Tokio task that applies commands strictly in order
//! - [`remote`]: optional delegation of each arithmetic step to a service
//! - [`server`]: the matching arithmetic service (feature `server`)
//! - [`tui`]: ratatui front-end (feature `tui`)
//!
//! # Example
//!
//! ```rust
//! use keycalc::prelude::*;
//!
//! let mut engine = ExpressionEngine::new();
//! engine.type_keys("2+3*4=").unwrap();
//! assert_eq!(engine.display(), "14");
//! assert_eq!(engine.expression(), "2 + 3 × 4 = 14");
//!
//! // errors leave the state untouched
//! engine.type_keys("Esc 4/0").unwrap();
//! assert_eq!(engine.press(Key::Enter), Err(CalcError::DivisionByZero));
//! assert_eq!(engine.expression(), "4 ÷");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;
pub mod input;
pub mod queue;
pub mod remote;

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::{
        CalcError, CalcResult, Command, EngineState, ExpressionEngine, Operation, Token,
    };
    pub use crate::driver::{CalculatorDriver, HistoryItem};
    pub use crate::input::Key;
    pub use crate::queue::{EngineHandle, QueueError};
    pub use crate::remote::{Arithmetic, LocalArithmetic, RemoteError};

    #[cfg(feature = "remote")]
    pub use crate::remote::HttpArithmetic;

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}
