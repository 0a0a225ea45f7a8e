//! Delegated arithmetic
//!
//! The engine can hand each binary step of a reduction to an
//! [`Arithmetic`] implementation instead of computing it in-process. The
//! wire contract is a single request `{operation, a, b}` answered by either
//! `{result, ...}` or `{error}`.

#[cfg(feature = "remote")]
mod client;

#[cfg(feature = "remote")]
pub use client::HttpArithmetic;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{CalcResult, Operation};

/// Request body for one binary operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// Operation to apply
    pub operation: Operation,
    /// Left operand
    pub a: f64,
    /// Right operand
    pub b: f64,
}

/// Successful response body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculateResponse {
    /// Computed value
    pub result: f64,
    /// Echo of the requested operation
    pub operation: Operation,
    /// Echo of the left operand
    pub a: f64,
    /// Echo of the right operand
    pub b: f64,
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason
    pub error: String,
}

impl ErrorBody {
    /// Creates an error body
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Failures of delegated arithmetic.
///
/// All of them are recoverable: the command that triggered the call is
/// aborted and the engine keeps its previous state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The request never produced an HTTP response
    #[error("transport error: {0}")]
    Transport(String),
    /// Non-success status without a usable error body
    #[error("service returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },
    /// The service answered with an `{error}` payload
    #[error("service rejected the request: {0}")]
    Rejected(String),
    /// The response body could not be decoded
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Something that can compute one binary operation
#[async_trait]
pub trait Arithmetic: Send + Sync {
    /// Computes `a op b`
    async fn calculate(&self, op: Operation, a: f64, b: f64) -> CalcResult<f64>;
}

/// In-process arithmetic
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalArithmetic;

#[async_trait]
impl Arithmetic for LocalArithmetic {
    async fn calculate(&self, op: Operation, a: f64, b: f64) -> CalcResult<f64> {
        op.apply(a, b)
    }
}
