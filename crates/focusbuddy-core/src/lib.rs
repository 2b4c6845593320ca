//! # FocusBuddy Core Library
//!
//! Business logic for the FocusBuddy focus/break timer. The CLI (and any
//! other front end) is a thin view layer over this crate.
//!
//! ## Architecture
//!
//! - **Engine**: [`FocusEngine`] drives a countdown state machine one
//!   `tick()` at a time, counts completed focus sessions and reports every
//!   change as an [`Event`]
//! - **Statistics**: streaks, daily/weekly/total counters and a bounded
//!   session history
//! - **Storage**: a synchronous key-value store ([`KeyValueStore`]) holding
//!   settings and statistics as JSON, in memory or in SQLite
//! - **Clock**: injected time source, so sessions can be simulated without
//!   waiting

pub mod ambient;
pub mod clock;
pub mod companion;
pub mod engine;
pub mod error;
pub mod events;
pub mod export;
pub mod settings;
pub mod stats;
pub mod storage;
pub mod timer;

pub use ambient::AmbientTrack;
pub use clock::{Clock, ManualClock, SystemClock};
pub use companion::{pick_message, Mood};
pub use engine::FocusEngine;
pub use error::{CoreError, StoreError, TimerError, ValidationError};
pub use events::{Event, EventSink};
pub use export::{export_file_name, ExportDocument};
pub use settings::{Settings, SettingsPatch, Theme, WeekRollover};
pub use stats::{SessionRecord, Statistics, StreakUpdate, WeekdayCount};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
pub use timer::{AutoStart, Mode, Phase, TimerState};
