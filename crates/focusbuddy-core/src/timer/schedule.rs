//! Deferred auto-start tasks.
//!
//! A pending auto-start is plain data owned by the engine. It fires from the
//! first tick at or after `due_at`, and is dropped by any user action that
//! changes the timer before then.
//!
//! The delay is measured on the engine's clock, not in ticks: ticking faster
//! than once a second shortens a countdown but not the wait before an
//! auto-start.

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoStart {
    /// Switch to a break and start it, after a focus session.
    Break,
    /// Start the next focus session, after a break.
    Focus,
}

impl AutoStart {
    pub fn delay(&self) -> Duration {
        match self {
            AutoStart::Break => Duration::seconds(3),
            AutoStart::Focus => Duration::seconds(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAutoStart {
    pub kind: AutoStart,
    pub due_at: DateTime<FixedOffset>,
}

impl PendingAutoStart {
    pub fn schedule(kind: AutoStart, now: DateTime<FixedOffset>) -> Self {
        Self {
            kind,
            due_at: now + kind.delay(),
        }
    }

    pub fn is_due(&self, now: DateTime<FixedOffset>) -> bool {
        now >= self.due_at
    }
}
