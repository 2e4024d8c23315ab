//! Button-press calculator engine.
//!
//! This module provides functionality to:
//! - Parse button tags and compact key strings into events
//! - Run events through the calculator state machine
//! - Format the accumulator for display
//! - Copy results to the clipboard

mod clipboard;
mod engine;
mod error;
mod evaluation;
mod event;
mod format;
mod keys;

pub use clipboard::copy_to_clipboard;
pub use engine::{Calculator, CalculatorState, ERROR_TEXT, MAX_INPUT_LEN};
pub use error::CalcError;
pub use evaluation::{PRECISION, apply_function, compute, round_significant};
pub use event::{Digit, Event, Operator, UnaryFunction};
pub use format::{format_display, group_thousands};
pub use keys::{parse_key, parse_line};
