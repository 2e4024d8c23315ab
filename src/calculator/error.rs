//! Failures the engine can run into while computing a value.
//!
//! Every variant collapses to the same `"Error"` display; the distinction only
//! matters for logging and tests.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// An operand string did not parse as a finite number.
    #[error("not a number: {0:?}")]
    Parse(String),

    #[error("division by zero")]
    DivideByZero,

    /// A unary function was applied outside the values it is defined for.
    #[error("{function} is undefined for {value}")]
    Domain { function: &'static str, value: f64 },

    /// The result does not fit in an `f64`.
    #[error("result overflowed")]
    Overflow,
}
