//! Display formatting for the calculator readout.

use super::engine::ERROR_TEXT;
use super::evaluation::{PRECISION, round_significant};

/// Longest plain-decimal rendering before falling back to significant digits.
const MAX_DISPLAY_LEN: usize = 15;

/// Magnitudes above this are shown in exponential form.
const EXP_UPPER: f64 = 1e12;

/// Non-zero magnitudes below this are shown in exponential form.
const EXP_LOWER: f64 = 1e-6;

/// Format the engine's current input for display.
///
/// - `"Error"` and unparseable input render as `"Error"`
/// - Infinities render as `"Infinity"` / `"-Infinity"`
/// - Very large or very small magnitudes use exponential notation with six
///   fractional digits
/// - Everything else is the shortest decimal form without trailing zeros
pub fn format_display(input: &str) -> String {
    if input == ERROR_TEXT {
        return ERROR_TEXT.to_string();
    }

    let Ok(value) = input.trim().parse::<f64>() else {
        return ERROR_TEXT.to_string();
    };

    if value.is_nan() {
        return ERROR_TEXT.to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return text.to_string();
    }

    let abs = value.abs();
    if abs > EXP_UPPER || (abs != 0.0 && abs < EXP_LOWER) {
        return format_exponential(value);
    }

    let plain = format_plain(value);
    if plain.len() > MAX_DISPLAY_LEN {
        format_plain(round_significant(value, PRECISION))
    } else {
        plain
    }
}

/// Exponential form with six fractional digits and a signed exponent,
/// e.g. `1.230000e-7`, `4.560000e+13`.
fn format_exponential(value: f64) -> String {
    let formatted = format!("{:.6e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => formatted,
    }
}

/// Shortest round-trip decimal, trailing zeros and a bare point removed.
fn format_plain(value: f64) -> String {
    // Normalise -0 so it never shows a sign.
    let value = if value == 0.0 { 0.0 } else { value };
    let formatted = format!("{}", value);

    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

/// Insert thousands separators into the integer part of a formatted display.
///
/// Exponential and non-numeric displays are returned unchanged.
pub fn group_thousands(display: &str) -> String {
    if display.chars().any(|c| c.is_ascii_alphabetic()) {
        return display.to_string();
    }

    let (sign, unsigned) = match display.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", display),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(pos) => unsigned.split_at(pos),
        None => (unsigned, ""),
    };

    let mut result = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    let grouped: String = result.chars().rev().collect();
    format!("{}{}{}", sign, grouped, frac_part)
}
