pub mod calculator;
pub mod config;
pub mod display;
pub mod session;

pub use calculator::{Calculator, Event};
pub use config::Config;
pub use display::{RecordedDisplay, RenderTarget, TerminalDisplay};
pub use session::Session;
