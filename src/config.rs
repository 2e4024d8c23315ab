//! Configuration file support for zcalc.
//!
//! Loads config from `$XDG_CONFIG_HOME/zcalc/config.toml`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Front-end preferences. The engine itself has no settings.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Show integer digits in groups of three.
    pub group_digits: bool,

    /// Copy the final display to the clipboard after every run.
    pub copy_result: bool,

    /// Print a JSON snapshot of the engine state after every input line.
    pub show_state: bool,
}

impl Config {
    /// Load config from the default location, or from `path` when given.
    ///
    /// A missing file yields defaults; a broken one is reported and ignored.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(config_path) else {
            return Self::default();
        };

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Get the default config file path.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
}
