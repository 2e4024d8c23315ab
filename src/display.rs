//! Render targets for the calculator display.

use std::io::{self, Write};

use crate::calculator::group_thousands;

/// A write-only sink that receives the display after every key press.
pub trait RenderTarget {
    fn render(&mut self, display: &str) -> io::Result<()>;
}

/// Writes each display update as one line.
pub struct TerminalDisplay<W: Write> {
    out: W,
    group_digits: bool,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            group_digits: false,
        }
    }

    /// Show integer digits in groups of three (`1,234,567`).
    pub fn with_grouped_digits(mut self, group_digits: bool) -> Self {
        self.group_digits = group_digits;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderTarget for TerminalDisplay<W> {
    fn render(&mut self, display: &str) -> io::Result<()> {
        if self.group_digits {
            writeln!(self.out, "{}", group_thousands(display))?;
        } else {
            writeln!(self.out, "{}", display)?;
        }
        self.out.flush()
    }
}

/// Keeps every rendered display in memory.
#[derive(Debug, Default)]
pub struct RecordedDisplay {
    pub frames: Vec<String>,
}

impl RecordedDisplay {
    pub fn last(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
}

impl RenderTarget for RecordedDisplay {
    fn render(&mut self, display: &str) -> io::Result<()> {
        self.frames.push(display.to_string());
        Ok(())
    }
}
