//! zcalc - a button-press calculator for the terminal.
//!
//! Keys are given as arguments (`zcalc 2 add 3 equals`, `zcalc 12.5*4=`) or
//! read line by line from stdin. The display is printed after every key.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use zcalc::calculator::copy_to_clipboard;
use zcalc::{Config, RenderTarget, Session, TerminalDisplay};

#[derive(Parser)]
#[command(name = "zcalc")]
#[command(version, about = "A button-press calculator")]
struct Args {
    /// Keys to press in order, e.g. `9 sqrt` or `2+3=`. Reads stdin when empty.
    keys: Vec<String>,

    /// Config file (defaults to ~/.config/zcalc/config.toml)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Copy the final display to the clipboard
    #[arg(long)]
    copy: bool,

    /// Print the engine state as JSON after each input line
    #[arg(long)]
    json: bool,

    /// Group integer digits with thousands separators
    #[arg(long)]
    group_digits: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::load(args.config.as_deref());
    let group_digits = args.group_digits || config.group_digits;
    let show_state = args.json || config.show_state;
    let copy = args.copy || config.copy_result;
    debug!(?config, "loaded configuration");

    let display = TerminalDisplay::new(io::stdout()).with_grouped_digits(group_digits);
    let mut session = Session::new(display);

    let final_display = if args.keys.is_empty() {
        run_interactive(&mut session, show_state)?
    } else {
        let display = session
            .press_line(&args.keys.join(" "))
            .context("failed to write display")?;
        if show_state {
            print_state(&session)?;
        }
        display
    };

    if copy {
        copy_to_clipboard(&final_display)?;
        info!("copied {} to clipboard", final_display);
    }

    Ok(())
}

/// Read keys from stdin until EOF or `quit`.
fn run_interactive<R: RenderTarget>(session: &mut Session<R>, show_state: bool) -> Result<String> {
    let mut display = session.refresh().context("failed to write display")?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read input")?;
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }

        display = session.press_line(&line).context("failed to write display")?;
        if show_state {
            print_state(session)?;
        }
    }

    Ok(display)
}

fn print_state<R: RenderTarget>(session: &Session<R>) -> Result<()> {
    let json = serde_json::to_string(session.calculator().state())
        .context("failed to serialize calculator state")?;
    println!("{}", json);
    Ok(())
}
