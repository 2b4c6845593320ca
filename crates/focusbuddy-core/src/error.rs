//! Core error types for focusbuddy-core.
//!
//! Every failure the engine can meet is non-fatal: store and parse errors
//! fall back to defaults, validation errors leave the previous value in
//! place. These types carry enough context for the caller to report them.

use thiserror::Error;

/// Core error type for focusbuddy-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key-value store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A persisted value exists but cannot be parsed
    #[error("Corrupt data under '{key}': {source}")]
    CorruptData {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Timer state errors
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Destructive reset requested without confirmation
    #[error("Reset requires explicit confirmation")]
    ResetNotConfirmed,

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store could not be reached
    #[error("Store unavailable for '{key}': {message}")]
    Unavailable { key: String, message: String },

    /// SQLite failure
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Unknown settings key
    #[error("Unknown settings key: {0}")]
    UnknownKey(String),
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Timer state errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimerError {
    /// Duration changes are only accepted while idle
    #[error("Cannot change the session duration while the timer is running or paused")]
    Busy,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
