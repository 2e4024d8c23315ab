//! Drives a calculator from an input source into a render target.

use std::io;

use crate::calculator::{Calculator, Event, parse_line};
use crate::display::RenderTarget;

/// A calculator wired to the sink that shows its display.
pub struct Session<R: RenderTarget> {
    calculator: Calculator,
    target: R,
}

impl<R: RenderTarget> Session<R> {
    pub fn new(target: R) -> Self {
        Self {
            calculator: Calculator::new(),
            target,
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn target(&self) -> &R {
        &self.target
    }

    /// Push the current display to the target without pressing anything.
    pub fn refresh(&mut self) -> io::Result<String> {
        let display = self.calculator.display();
        self.target.render(&display)?;
        Ok(display)
    }

    /// Press one key and push the new display to the target.
    pub fn press(&mut self, event: Event) -> io::Result<String> {
        let display = self.calculator.handle(event);
        self.target.render(&display)?;
        Ok(display)
    }

    /// Press every key in order.
    ///
    /// Returns the display after the last key, or the current display when
    /// there were no keys.
    pub fn press_all<I>(&mut self, events: I) -> io::Result<String>
    where
        I: IntoIterator<Item = Event>,
    {
        let mut display = self.calculator.display();
        for event in events {
            display = self.press(event)?;
        }
        Ok(display)
    }

    /// Parse a line of keys and press them.
    pub fn press_line(&mut self, line: &str) -> io::Result<String> {
        self.press_all(parse_line(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::RecordedDisplay;

    #[test]
    fn test_every_event_is_rendered() {
        let mut session = Session::new(RecordedDisplay::default());
        let display = session.press_line("2 add 3 equals").unwrap();
        assert_eq!(display, "5");
        assert_eq!(session.target().frames, vec!["2", "2", "3", "5"]);
    }

    #[test]
    fn test_empty_line_keeps_display() {
        let mut session = Session::new(RecordedDisplay::default());
        session.press_line("42").unwrap();
        let frames = session.target().frames.len();
        assert_eq!(session.press_line("   ").unwrap(), "42");
        assert_eq!(session.press_line("extra").unwrap(), "42");
        assert_eq!(session.target().frames.len(), frames);
    }

    #[test]
    fn test_refresh_renders_current_display() {
        let mut session = Session::new(RecordedDisplay::default());
        assert_eq!(session.refresh().unwrap(), "0");
        assert_eq!(session.target().last(), Some("0"));
    }

    #[test]
    fn test_state_carries_across_lines() {
        let mut session = Session::new(RecordedDisplay::default());
        session.press_line("7 multiply").unwrap();
        assert_eq!(session.press_line("6 =").unwrap(), "42");
        assert!(!session.calculator().is_error());
    }
}
