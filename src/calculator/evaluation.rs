//! Arithmetic behind the engine.
//!
//! Binary operations, unary functions and the rounding step that keeps
//! floating-point noise (`0.1 + 0.2`) out of the display.

use super::error::CalcError;
use super::event::{Operator, UnaryFunction};

/// Significant digits kept after every calculation.
pub const PRECISION: usize = 12;

/// Round `value` to `digits` significant decimal digits.
///
/// Non-finite values and zero pass through untouched.
pub fn round_significant(value: f64, digits: usize) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }

    let digits = digits.max(1);
    format!("{:.*e}", digits - 1, value)
        .parse()
        .unwrap_or(value)
}

/// Parse an operand string, rejecting anything that is not a finite number.
pub fn parse_operand(input: &str) -> Result<f64, CalcError> {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::Parse(input.to_string())),
    }
}

/// Apply a pending binary operation to two operand strings.
///
/// With no operator the current operand is returned unchanged.
pub fn compute(
    previous: &str,
    current: &str,
    operator: Option<Operator>,
) -> Result<f64, CalcError> {
    let prev = parse_operand(previous)?;
    let current = parse_operand(current)?;

    let result = match operator {
        Some(Operator::Add) => prev + current,
        Some(Operator::Subtract) => prev - current,
        Some(Operator::Multiply) => prev * current,
        Some(Operator::Divide) => {
            if current == 0.0 {
                return Err(CalcError::DivideByZero);
            }
            prev / current
        }
        None => return Ok(current),
    };

    finite(round_significant(result, PRECISION))
}

/// Apply a unary function to `value`. Trig functions read `value` as degrees.
///
/// The result is not rounded; callers round before storing it.
pub fn apply_function(function: UnaryFunction, value: f64) -> Result<f64, CalcError> {
    let domain_error = || CalcError::Domain {
        function: function.name(),
        value,
    };

    let result = match function {
        UnaryFunction::Sin => value.to_radians().sin(),
        UnaryFunction::Cos => value.to_radians().cos(),
        UnaryFunction::Tan => value.to_radians().tan(),
        UnaryFunction::Log if value > 0.0 => value.log10(),
        UnaryFunction::Ln if value > 0.0 => value.ln(),
        UnaryFunction::Log | UnaryFunction::Ln => return Err(domain_error()),
        UnaryFunction::Sqrt if value >= 0.0 => value.sqrt(),
        UnaryFunction::Sqrt => return Err(domain_error()),
        UnaryFunction::Square => value * value,
        UnaryFunction::Exp => value.exp(),
    };

    if result.is_nan() {
        return Err(domain_error());
    }
    finite(result)
}

fn finite(value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::Overflow)
    }
}

/// Convert a computed value back into an input string the engine can keep
/// appending to or parse again.
pub fn number_to_input(value: f64) -> String {
    if value == 0.0 {
        // Also folds -0 into "0".
        return "0".to_string();
    }

    let abs = value.abs();
    if abs >= 1e21 || abs < 1e-6 {
        format!("{:e}", value)
    } else {
        format!("{}", value)
    }
}
