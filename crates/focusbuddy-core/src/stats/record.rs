use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of sessions kept in history. Older ones are evicted.
pub const HISTORY_LIMIT: usize = 100;

/// A completed focus session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub timestamp: DateTime<Utc>,
    pub duration_minutes: u32,
    pub ambient_track: String,
    #[serde(default = "default_completed")]
    pub completed: bool,
}

fn default_completed() -> bool {
    true
}

impl SessionRecord {
    pub fn completed(
        timestamp: DateTime<Utc>,
        duration_minutes: u32,
        ambient_track: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            duration_minutes,
            ambient_track: ambient_track.into(),
            completed: true,
        }
    }
}

/// Prepend `record`, keeping at most [`HISTORY_LIMIT`] entries.
pub(crate) fn push_newest(history: &mut Vec<SessionRecord>, record: SessionRecord) {
    history.insert(0, record);
    history.truncate(HISTORY_LIMIT);
}
