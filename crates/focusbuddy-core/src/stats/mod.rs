//! Session statistics for FocusBuddy.
//!
//! [`Statistics`] is the durable aggregate: counters, streaks, the
//! per-weekday tally and a bounded newest-first session history. It is
//! updated once per completed focus session and never for breaks.

mod aggregate;
mod metrics;
mod record;

pub use aggregate::{week_start, Statistics, StreakUpdate};
pub use metrics::{WeekdayCount, WEEKDAY_LABELS};
pub use record::{SessionRecord, HISTORY_LIMIT};
