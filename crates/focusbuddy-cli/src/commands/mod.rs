pub mod config;
pub mod data;
pub mod run;
pub mod stats;

use focusbuddy_core::{FocusEngine, SqliteStore, SystemClock};

use crate::host::HostConfig;

/// Open the engine on the configured SQLite store with the system clock.
pub fn open_engine(host: &HostConfig) -> Result<FocusEngine, Box<dyn std::error::Error>> {
    let store = match &host.store_path {
        Some(path) => SqliteStore::open_at(path)?,
        None => SqliteStore::open()?,
    };
    Ok(FocusEngine::new(Box::new(SystemClock), Box::new(store)))
}
