//! Read-only metrics derived from [`Statistics`].

use serde::Serialize;

use super::aggregate::Statistics;
use super::record::SessionRecord;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayCount {
    pub label: &'static str,
    pub count: u32,
}

impl Statistics {
    /// Most frequent ambient track in the history.
    ///
    /// Ties go to the track seen first, walking the history newest-first.
    /// `None` when there is no history.
    pub fn favorite_track(&self) -> Option<&str> {
        let mut counts: Vec<(&str, u32)> = Vec::new();
        for record in &self.history {
            match counts
                .iter_mut()
                .find(|(track, _)| *track == record.ambient_track)
            {
                Some((_, n)) => *n += 1,
                None => counts.push((record.ambient_track.as_str(), 1)),
            }
        }

        let mut best: Option<(&str, u32)> = None;
        for (track, n) in counts {
            match best {
                Some((_, top)) if n <= top => {}
                _ => best = Some((track, n)),
            }
        }
        best.map(|(track, _)| track)
    }

    /// Average completed session length, rounded to the nearest minute.
    pub fn average_session_minutes(&self) -> u32 {
        if self.total_session_count == 0 {
            return 0;
        }
        (f64::from(self.total_minutes) / f64::from(self.total_session_count)).round() as u32
    }

    /// The `n` most recent sessions.
    pub fn recent(&self, n: usize) -> &[SessionRecord] {
        &self.history[..n.min(self.history.len())]
    }

    /// Per-weekday tally with labels, Sunday first.
    pub fn weekday_counts(&self) -> [WeekdayCount; 7] {
        std::array::from_fn(|i| WeekdayCount {
            label: WEEKDAY_LABELS[i],
            count: self.weekly_counts[i],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn with_tracks(tracks: &[&str]) -> Statistics {
        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        Statistics {
            history: tracks
                .iter()
                .map(|t| SessionRecord::completed(ts, 25, *t))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn favorite_track_is_most_frequent() {
        let stats = with_tracks(&["rain", "cafe", "cafe", "forest", "cafe", "rain"]);
        assert_eq!(stats.favorite_track(), Some("cafe"));
    }

    #[test]
    fn favorite_track_tie_goes_to_newest_seen_first() {
        let stats = with_tracks(&["ocean", "rain", "rain", "ocean"]);
        assert_eq!(stats.favorite_track(), Some("ocean"));
    }

    #[test]
    fn favorite_track_none_without_history() {
        assert_eq!(Statistics::default().favorite_track(), None);
    }

    #[test]
    fn average_rounds_to_nearest() {
        let stats = Statistics {
            total_session_count: 3,
            total_minutes: 80,
            ..Default::default()
        };
        assert_eq!(stats.average_session_minutes(), 27);
        assert_eq!(Statistics::default().average_session_minutes(), 0);
    }

    #[test]
    fn recent_clamps_to_history() {
        let stats = with_tracks(&["rain", "cafe"]);
        assert_eq!(stats.recent(20).len(), 2);
        assert_eq!(stats.recent(1)[0].ambient_track, "rain");
    }

    #[test]
    fn weekday_counts_are_labelled() {
        let stats = Statistics {
            weekly_counts: [1, 2, 3, 4, 5, 6, 7],
            ..Default::default()
        };
        let days = stats.weekday_counts();
        assert_eq!(days[0], WeekdayCount { label: "Sun", count: 1 });
        assert_eq!(days[6], WeekdayCount { label: "Sat", count: 7 });
    }
}
