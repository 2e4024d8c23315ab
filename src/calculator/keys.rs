//! Key parsing for the calculator front end.
//!
//! Turns button tags (`add`, `sqrt`, `7`) and compact key strings (`12+3=`)
//! into engine events. Anything unrecognized is dropped, the same way a
//! placeholder button does nothing when pressed.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::event::{Digit, Event, Operator, UnaryFunction};

lazy_static! {
    /// Matches words made only of single-character keys.
    /// Allows: digits, `.`, the four operators, `=` and `%`.
    static ref COMPACT_KEYS: Regex = Regex::new(r"^[\d\.\+\-\*/=%]+$").unwrap();
}

/// Parse a single button tag.
///
/// Tags are case-insensitive. Returns `None` for unknown or placeholder
/// buttons.
pub fn parse_key(tag: &str) -> Option<Event> {
    let tag = tag.trim().to_ascii_lowercase();

    if let Some(function) = UnaryFunction::ALL.iter().find(|f| f.name() == tag) {
        return Some(Event::Function(*function));
    }

    let event = match tag.as_str() {
        "decimal" | "." => Event::Decimal,
        "add" | "+" => Event::Operator(Operator::Add),
        "subtract" | "-" => Event::Operator(Operator::Subtract),
        "multiply" | "*" | "x" => Event::Operator(Operator::Multiply),
        "divide" | "/" => Event::Operator(Operator::Divide),
        "equals" | "=" => Event::Equals,
        "clear" | "c" | "ac" => Event::Clear,
        "toggle-sign" | "+/-" | "neg" => Event::ToggleSign,
        "percentage" | "%" => Event::Percentage,
        _ => {
            let mut chars = tag.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Digit::from_char(c).map(Event::Digit),
                _ => None,
            };
        }
    };

    Some(event)
}

/// Split a line of input into events.
///
/// Words are separated by whitespace. A word that is a known tag becomes one
/// event; a word made only of digit and symbol keys becomes one event per
/// character; other words are ignored.
pub fn parse_line(line: &str) -> Vec<Event> {
    let mut events = Vec::new();

    for word in line.split_whitespace() {
        if let Some(event) = parse_key(word) {
            events.push(event);
        } else if COMPACT_KEYS.is_match(word) {
            events.extend(word.chars().filter_map(|c| parse_key(c.encode_utf8(&mut [0; 4]))));
        } else {
            debug!(key = word, "ignoring unrecognized key");
        }
    }

    events
}
