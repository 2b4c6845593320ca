use clap::Subcommand;
use focusbuddy_core::{Settings, SettingsPatch};

use super::open_engine;
use crate::host::HostConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a setting value
    Get {
        /// Setting key (e.g. "focusMinutes" or "auto_start_break")
        key: String,
    },
    /// Set a setting value
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings
    List,
    /// Reset settings to defaults (statistics are kept)
    Reset,
}

pub fn run(action: ConfigAction, host: &HostConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = open_engine(host)?;

    match action {
        ConfigAction::Get { key } => match engine.settings().get(&key) {
            Some(value) => println!("{value}"),
            None => {
                eprintln!("unknown key: {key} (known: {})", Settings::keys().join(", "));
                std::process::exit(1);
            }
        },
        ConfigAction::Set { key, value } => {
            engine.set_setting(&key, &value)?;
            println!("ok");
        }
        ConfigAction::List => {
            let json = serde_json::to_string_pretty(engine.settings())?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            engine.update_settings(SettingsPatch::from(Settings::default()))?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
