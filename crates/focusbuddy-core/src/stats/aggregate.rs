use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::record::{push_newest, SessionRecord, HISTORY_LIMIT};
use crate::settings::WeekRollover;

/// Durable session statistics.
///
/// Missing fields in a stored document fall back to zero/empty, so older
/// documents load without migration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub current_streak_days: u32,
    pub longest_streak_days: u32,
    pub today_session_count: u32,
    pub today_minutes: u32,
    pub week_session_count: u32,
    pub week_minutes: u32,
    pub total_session_count: u32,
    pub total_minutes: u32,
    pub last_session_date: Option<NaiveDate>,
    /// Completed sessions per weekday, Sunday = 0.
    pub weekly_counts: [u32; 7],
    /// Sunday that opens the week the weekly counters belong to.
    pub week_of: Option<NaiveDate>,
    /// Newest first.
    pub history: Vec<SessionRecord>,
}

/// What a streak update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakUpdate {
    /// A session was already counted today.
    AlreadyCounted,
    /// Streak continued from yesterday, or started from nothing.
    Extended,
    /// Last session was two or more days ago (or in the future).
    Broken,
}

/// First day (Sunday) of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

impl Statistics {
    /// Apply the day-granular streak rule for a session completed `today`.
    ///
    /// On a new day this also rolls the today counters over and moves
    /// `last_session_date` to `today`.
    pub fn update_streak(&mut self, today: NaiveDate) -> StreakUpdate {
        if self.last_session_date == Some(today) {
            return StreakUpdate::AlreadyCounted;
        }

        let yesterday = today.pred_opt();
        let outcome = match self.last_session_date {
            None => StreakUpdate::Extended,
            Some(last) if Some(last) == yesterday => StreakUpdate::Extended,
            Some(_) => StreakUpdate::Broken,
        };

        match outcome {
            StreakUpdate::Extended => {
                self.current_streak_days += 1;
                if self.current_streak_days > self.longest_streak_days {
                    self.longest_streak_days = self.current_streak_days;
                }
            }
            _ => self.current_streak_days = 0,
        }

        self.today_session_count = 0;
        self.today_minutes = 0;
        self.last_session_date = Some(today);
        debug!(
            ?outcome,
            current = self.current_streak_days,
            longest = self.longest_streak_days,
            "streak updated"
        );
        outcome
    }

    /// Startup consistency check.
    ///
    /// Clears today's counters left over from an earlier day and drops a
    /// streak that can no longer continue. Returns `true` if anything changed.
    /// `last_session_date` is left alone: no session has happened yet.
    pub fn reconcile(&mut self, today: NaiveDate) -> bool {
        let Some(last) = self.last_session_date else {
            return false;
        };
        if last == today {
            return false;
        }

        let mut changed = false;
        if self.today_session_count != 0 || self.today_minutes != 0 {
            self.today_session_count = 0;
            self.today_minutes = 0;
            changed = true;
        }
        let continues = Some(last) == today.pred_opt();
        if !continues && self.current_streak_days != 0 {
            self.current_streak_days = 0;
            changed = true;
        }
        changed
    }

    /// Bring statistics from outside the engine (the store or an import)
    /// in line with its invariants: the history cap and [`Self::reconcile`].
    pub fn normalize(&mut self, today: NaiveDate) -> bool {
        let mut changed = false;
        if self.history.len() > HISTORY_LIMIT {
            self.history.truncate(HISTORY_LIMIT);
            changed = true;
        }
        self.reconcile(today) || changed
    }

    /// Reset the weekly counters if `today` belongs to a later week and the
    /// policy asks for it. The week marker is always brought up to date.
    ///
    /// Counters without a week marker belong to an unknown week and are
    /// treated as stale.
    pub fn roll_week(&mut self, today: NaiveDate, policy: WeekRollover) -> bool {
        let this_week = week_start(today);
        let stale = match self.week_of {
            Some(week) => week != this_week,
            None => self.week_session_count != 0 || self.weekly_counts != [0; 7],
        };
        let rolled = policy == WeekRollover::Calendar && stale;
        if rolled {
            self.week_session_count = 0;
            self.week_minutes = 0;
            self.weekly_counts = [0; 7];
        }
        self.week_of = Some(this_week);
        rolled
    }

    /// Count one completed focus session.
    ///
    /// Day and week rollover run before the counters move, so the first
    /// session of a new day is not wiped by the daily reset.
    pub fn record_completion(
        &mut self,
        record: SessionRecord,
        today: NaiveDate,
        policy: WeekRollover,
    ) -> StreakUpdate {
        let streak = self.update_streak(today);
        self.roll_week(today, policy);

        let minutes = record.duration_minutes;
        push_newest(&mut self.history, record);

        self.today_session_count += 1;
        self.today_minutes += minutes;
        self.week_session_count += 1;
        self.week_minutes += minutes;
        self.total_session_count += 1;
        self.total_minutes += minutes;

        let weekday = today.weekday().num_days_from_sunday() as usize;
        self.weekly_counts[weekday] += 1;

        streak
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn day(d: u32) -> NaiveDate {
        // March 2026: the 1st is a Sunday.
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn session(minutes: u32) -> SessionRecord {
        SessionRecord::completed(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(), minutes, "rain")
    }

    #[test]
    fn first_ever_session_starts_streak() {
        let mut stats = Statistics::default();
        assert_eq!(stats.update_streak(day(4)), StreakUpdate::Extended);
        assert_eq!(stats.current_streak_days, 1);
        assert_eq!(stats.longest_streak_days, 1);
        assert_eq!(stats.last_session_date, Some(day(4)));
    }

    #[test]
    fn consecutive_day_extends_streak() {
        let mut stats = Statistics {
            current_streak_days: 4,
            longest_streak_days: 4,
            last_session_date: Some(day(9)),
            ..Default::default()
        };
        stats.update_streak(day(10));
        assert_eq!(stats.current_streak_days, 5);
        assert_eq!(stats.longest_streak_days, 5);
    }

    #[test]
    fn two_day_gap_breaks_streak() {
        let mut stats = Statistics {
            current_streak_days: 4,
            longest_streak_days: 7,
            last_session_date: Some(day(8)),
            ..Default::default()
        };
        assert_eq!(stats.update_streak(day(10)), StreakUpdate::Broken);
        assert_eq!(stats.current_streak_days, 0);
        assert_eq!(stats.longest_streak_days, 7);
    }

    #[test]
    fn future_last_date_breaks_streak() {
        let mut stats = Statistics {
            current_streak_days: 2,
            last_session_date: Some(day(20)),
            ..Default::default()
        };
        assert_eq!(stats.update_streak(day(10)), StreakUpdate::Broken);
        assert_eq!(stats.current_streak_days, 0);
        assert_eq!(stats.last_session_date, Some(day(10)));
    }

    #[test]
    fn same_day_is_counted_once() {
        let mut stats = Statistics::default();
        stats.record_completion(session(25), day(3), WeekRollover::Never);
        let second = stats.record_completion(session(25), day(3), WeekRollover::Never);
        assert_eq!(second, StreakUpdate::AlreadyCounted);
        assert_eq!(stats.current_streak_days, 1);
        assert_eq!(stats.today_session_count, 2);
        assert_eq!(stats.today_minutes, 50);
    }

    #[test]
    fn new_day_keeps_its_first_session() {
        let mut stats = Statistics::default();
        stats.record_completion(session(25), day(3), WeekRollover::Never);
        stats.record_completion(session(25), day(3), WeekRollover::Never);
        stats.record_completion(session(50), day(4), WeekRollover::Never);
        assert_eq!(stats.today_session_count, 1);
        assert_eq!(stats.today_minutes, 50);
        assert_eq!(stats.total_session_count, 3);
        assert_eq!(stats.total_minutes, 100);
        assert_eq!(stats.current_streak_days, 2);
    }

    #[test]
    fn weekday_tally_uses_sunday_zero() {
        let mut stats = Statistics::default();
        stats.record_completion(session(25), day(1), WeekRollover::Never); // Sunday
        stats.record_completion(session(25), day(7), WeekRollover::Never); // Saturday
        stats.record_completion(session(25), day(7), WeekRollover::Never);
        assert_eq!(stats.weekly_counts, [1, 0, 0, 0, 0, 0, 2]);
    }

    #[test]
    fn weekly_counters_accumulate_without_rollover() {
        let mut stats = Statistics::default();
        stats.record_completion(session(25), day(2), WeekRollover::Never);
        stats.record_completion(session(25), day(9), WeekRollover::Never);
        assert_eq!(stats.week_session_count, 2);
        assert_eq!(stats.week_minutes, 50);
        assert_eq!(stats.weekly_counts[1], 2);
    }

    #[test]
    fn calendar_rollover_resets_weekly_counters() {
        let mut stats = Statistics::default();
        stats.record_completion(session(25), day(2), WeekRollover::Calendar);
        stats.record_completion(session(25), day(7), WeekRollover::Calendar);
        assert_eq!(stats.week_session_count, 2);

        stats.record_completion(session(30), day(9), WeekRollover::Calendar);
        assert_eq!(stats.week_session_count, 1);
        assert_eq!(stats.week_minutes, 30);
        assert_eq!(stats.weekly_counts, [0, 1, 0, 0, 0, 0, 0]);
        assert_eq!(stats.week_of, Some(day(8)));
        assert_eq!(stats.total_session_count, 3);
    }

    #[test]
    fn calendar_rollover_drops_counters_of_unknown_week() {
        let mut stats = Statistics {
            week_session_count: 6,
            week_minutes: 150,
            weekly_counts: [0, 3, 3, 0, 0, 0, 0],
            ..Default::default()
        };
        stats.record_completion(session(25), day(11), WeekRollover::Calendar);
        assert_eq!(stats.week_session_count, 1);
        assert_eq!(stats.week_minutes, 25);
        assert_eq!(stats.weekly_counts, [0, 0, 0, 1, 0, 0, 0]);

        let mut never = Statistics {
            week_session_count: 6,
            ..Default::default()
        };
        never.record_completion(session(25), day(11), WeekRollover::Never);
        assert_eq!(never.week_session_count, 7);
    }

    #[test]
    fn normalize_caps_history_and_reconciles() {
        let mut stats = Statistics {
            current_streak_days: 4,
            today_session_count: 9,
            last_session_date: Some(day(1)),
            history: (0..150).map(|_| session(25)).collect(),
            ..Default::default()
        };
        assert!(stats.normalize(day(10)));
        assert_eq!(stats.history.len(), HISTORY_LIMIT);
        assert_eq!(stats.today_session_count, 0);
        assert_eq!(stats.current_streak_days, 0);
        assert!(!stats.normalize(day(10)));
    }

    #[test]
    fn week_start_is_sunday() {
        assert_eq!(week_start(day(1)), day(1));
        assert_eq!(week_start(day(7)), day(1));
        assert_eq!(week_start(day(8)), day(8));
    }

    #[test]
    fn reconcile_clears_stale_today_counters() {
        let mut stats = Statistics {
            current_streak_days: 3,
            today_session_count: 4,
            today_minutes: 100,
            last_session_date: Some(day(9)),
            ..Default::default()
        };
        assert!(stats.reconcile(day(10)));
        assert_eq!(stats.today_session_count, 0);
        assert_eq!(stats.current_streak_days, 3);
        assert_eq!(stats.last_session_date, Some(day(9)));
    }

    #[test]
    fn reconcile_drops_dead_streak() {
        let mut stats = Statistics {
            current_streak_days: 3,
            longest_streak_days: 3,
            last_session_date: Some(day(5)),
            ..Default::default()
        };
        assert!(stats.reconcile(day(10)));
        assert_eq!(stats.current_streak_days, 0);
        assert_eq!(stats.longest_streak_days, 3);
    }

    #[test]
    fn reconcile_same_day_is_noop() {
        let mut stats = Statistics {
            today_session_count: 2,
            last_session_date: Some(day(10)),
            ..Default::default()
        };
        assert!(!stats.reconcile(day(10)));
        assert_eq!(stats.today_session_count, 2);
        assert!(!Statistics::default().reconcile(day(10)));
    }

    #[test]
    fn dates_serialize_as_plain_days() {
        let stats = Statistics {
            last_session_date: Some(day(10)),
            ..Default::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["lastSessionDate"], "2026-03-10");
        assert_eq!(json["weeklyCounts"].as_array().unwrap().len(), 7);
    }
}
