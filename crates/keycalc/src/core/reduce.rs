//! Precedence-ordered reduction of a completed token stream
//!
//! Two left-to-right passes: the first collapses every `×`/`÷` triple in
//! place, the second folds the remaining `+`/`−` chain. Within a pass the
//! cursor stays put after a collapse because the next operator has shifted
//! into the same slot. This keeps ties left-associative (`8 − 2 − 3 = 3`).

use tracing::trace;

use crate::core::token::Token;
use crate::core::{check_finite, CalcResult, Operation};
use crate::remote::Arithmetic;

/// Reduction pass, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    /// Multiplication and division
    High,
    /// Addition and subtraction
    Low,
}

impl Pass {
    const ORDER: [Self; 2] = [Self::High, Self::Low];

    /// Precedence level collapsed by this pass
    const fn level(self) -> u8 {
        match self {
            Self::High => 2,
            Self::Low => 1,
        }
    }

    const fn admits(self, op: Operation) -> bool {
        op.precedence() == self.level()
    }
}

/// A completed, well-formed expression: `Number (Operator Number)*`
///
/// `ops[k]` sits between `values[k]` and `values[k + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    values: Vec<f64>,
    ops: Vec<Operation>,
}

impl Stream {
    /// Builds a stream from alternating tokens.
    ///
    /// Returns `None` if the tokens are empty, do not alternate, end in an
    /// operator, or contain an unparsable literal.
    #[must_use]
    pub fn from_tokens(tokens: &[Token]) -> Option<Self> {
        if tokens.len() % 2 == 0 {
            return None;
        }
        let mut values = Vec::with_capacity(tokens.len() / 2 + 1);
        let mut ops = Vec::with_capacity(tokens.len() / 2);
        for (i, token) in tokens.iter().enumerate() {
            if i % 2 == 0 {
                values.push(token.value()?);
            } else {
                ops.push(token.operator()?);
            }
        }
        Some(Self { values, ops })
    }

    /// Reduces the stream with local arithmetic.
    ///
    /// A bare number is returned as-is. Any failing step aborts the whole
    /// reduction; no partial result escapes.
    pub fn reduce(mut self) -> CalcResult<f64> {
        for pass in Pass::ORDER {
            let mut cursor = 0;
            while cursor < self.ops.len() {
                let op = self.ops[cursor];
                if pass.admits(op) {
                    let (a, b) = self.operands(cursor);
                    let result = op.apply(a, b)?;
                    self.collapse(cursor, result);
                } else {
                    cursor += 1;
                }
            }
        }
        self.finish()
    }

    /// Reduces the stream, delegating every binary step to `arithmetic`.
    ///
    /// Steps run in exactly the order [`Stream::reduce`] uses, and each one
    /// is awaited before the stream is updated.
    pub async fn reduce_with(mut self, arithmetic: &dyn Arithmetic) -> CalcResult<f64> {
        for pass in Pass::ORDER {
            let mut cursor = 0;
            while cursor < self.ops.len() {
                let op = self.ops[cursor];
                if pass.admits(op) {
                    let (a, b) = self.operands(cursor);
                    let result = check_finite(arithmetic.calculate(op, a, b).await?)?;
                    self.collapse(cursor, result);
                } else {
                    cursor += 1;
                }
            }
        }
        self.finish()
    }

    fn operands(&self, cursor: usize) -> (f64, f64) {
        (self.values[cursor], self.values[cursor + 1])
    }

    /// Replaces the triple at `cursor` with its result
    fn collapse(&mut self, cursor: usize, result: f64) {
        trace!(
            op = ?self.ops[cursor],
            a = self.values[cursor],
            b = self.values[cursor + 1],
            result,
            "collapsed triple"
        );
        self.values[cursor] = result;
        self.values.remove(cursor + 1);
        self.ops.remove(cursor);
    }

    fn finish(self) -> CalcResult<f64> {
        debug_assert!(self.ops.is_empty());
        check_finite(self.values.first().copied().unwrap_or(0.0))
    }
}

/// Reduces alternating tokens with local arithmetic.
///
/// Returns `None` for a malformed stream.
pub fn reduce_tokens(tokens: &[Token]) -> Option<CalcResult<f64>> {
    Stream::from_tokens(tokens).map(Stream::reduce)
}
