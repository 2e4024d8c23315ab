//! Input events accepted by the engine.

use serde::Serialize;
use std::fmt;

/// A single decimal digit, `0..=9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

/// Binary operators that can be pending between two operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// The button tag for this operator.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unary functions applied to the current value. Trig functions take degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryFunction {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
    Square,
    Exp,
}

impl UnaryFunction {
    pub const ALL: [UnaryFunction; 8] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Log,
        Self::Ln,
        Self::Sqrt,
        Self::Square,
        Self::Exp,
    ];

    /// The button tag for this function.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
            Self::Square => "square",
            Self::Exp => "exp",
        }
    }
}

impl fmt::Display for UnaryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Digit(Digit),
    Decimal,
    Operator(Operator),
    Equals,
    Clear,
    ToggleSign,
    Percentage,
    Function(UnaryFunction),
}

impl From<Digit> for Event {
    fn from(digit: Digit) -> Self {
        Self::Digit(digit)
    }
}

impl From<Operator> for Event {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

impl From<UnaryFunction> for Event {
    fn from(function: UnaryFunction) -> Self {
        Self::Function(function)
    }
}
