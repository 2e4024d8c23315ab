//! Copying the calculator display to the system clipboard.

use anyhow::Context;
use arboard::Clipboard;
use tracing::debug;

/// Copy the display text to the system clipboard.
///
/// Display strings may carry thousands separators; those are stripped so the
/// pasted value parses as a number.
pub fn copy_to_clipboard(display: &str) -> anyhow::Result<()> {
    let text = clipboard_text(display);
    let mut clipboard = Clipboard::new().context("failed to access clipboard")?;

    clipboard
        .set_text(text.clone())
        .context("failed to copy to clipboard")?;
    debug!(%text, "copied display to clipboard");
    Ok(())
}

fn clipboard_text(display: &str) -> String {
    display.chars().filter(|&c| c != ',').collect()
}
