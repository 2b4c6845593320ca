//! Persistence for settings and statistics.
//!
//! The engine only needs a synchronous string key-value store. Two backends
//! are provided: [`MemoryStore`] for tests and ephemeral sessions, and
//! [`SqliteStore`] for the CLI, stored at `~/.config/focusbuddy/focusbuddy.db`.

mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use crate::error::StoreError;

/// Store key holding the JSON-serialized [`crate::Settings`].
pub const SETTINGS_KEY: &str = "focusBuddySettings";
/// Store key holding the JSON-serialized [`crate::Statistics`].
pub const STATS_KEY: &str = "focusBuddyStats";

/// Synchronous string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Returns `~/.config/focusbuddy[-dev]/` based on FOCUSBUDDY_ENV.
///
/// Set FOCUSBUDDY_ENV=dev to use the development data directory.
/// FOCUSBUDDY_HOME replaces `~/.config` as the base directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = match std::env::var_os("FOCUSBUDDY_HOME") {
        Some(home) => PathBuf::from(home),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config"),
    };

    let env = std::env::var("FOCUSBUDDY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focusbuddy-dev")
    } else {
        base_dir.join("focusbuddy")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
