//! TOML host configuration for the CLI.
//!
//! User settings (durations, theme, ...) live in the store and are managed
//! with `focusbuddy config`. This file only describes how the CLI itself
//! runs. It is stored at `~/.config/focusbuddy/config.toml`.

use std::path::PathBuf;

use focusbuddy_core::storage::data_dir;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Default tracing filter when RUST_LOG is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Real time between ticks. One tick is one countdown second.
    /// Auto-start delays are wall-clock time and are not scaled by this.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// SQLite store location. Defaults to `focusbuddy.db` in the data directory.
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

fn default_log_filter() -> String {
    "focusbuddy=info,focusbuddy_core=info,warn".into()
}

fn default_tick_interval_ms() -> u64 {
    1000
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            tick_interval_ms: default_tick_interval_ms(),
            store_path: None,
        }
    }
}

impl HostConfig {
    fn path() -> Result<PathBuf, std::io::Error> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults if no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// default file cannot be written.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(_) => {
                let cfg = Self::default();
                std::fs::write(&path, toml::to_string_pretty(&cfg)?)?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                // Logging is not initialised yet.
                eprintln!("warning: ignoring host config: {e}");
                Self::default()
            }
        }
    }
}
