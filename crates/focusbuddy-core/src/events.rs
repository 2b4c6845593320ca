use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::companion::Mood;
use crate::settings::Settings;
use crate::stats::Statistics;
use crate::timer::{AutoStart, Mode};

/// Every state change in the engine produces an Event.
/// The view layer subscribes to them and renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        total_seconds: u32,
        at: DateTime<FixedOffset>,
    },
    TimerResumed {
        remaining_seconds: u32,
        at: DateTime<FixedOffset>,
    },
    TimerPaused {
        remaining_seconds: u32,
        at: DateTime<FixedOffset>,
    },
    TimerStopped {
        at: DateTime<FixedOffset>,
    },
    Tick {
        remaining_seconds: u32,
        total_seconds: u32,
    },
    DurationChanged {
        mode: Mode,
        total_seconds: u32,
    },
    ModeChanged {
        mode: Mode,
    },
    /// A focus session finished and was counted.
    SessionCompleted {
        duration_minutes: u32,
        stats: Box<Statistics>,
    },
    /// A break finished.
    BreakCompleted {
        at: DateTime<FixedOffset>,
    },
    StreakChanged {
        current: u32,
        longest: u32,
    },
    AutoStartScheduled {
        kind: AutoStart,
        due_at: DateTime<FixedOffset>,
    },
    AutoStartCancelled {
        kind: AutoStart,
    },
    SettingsUpdated {
        settings: Settings,
    },
    AmbientTrackChanged {
        track: String,
    },
    /// Completion sound request. Playback is up to the view.
    Chime {
        volume: u8,
    },
    /// Best-effort desktop notification request.
    DesktopNotification {
        title: String,
        body: String,
    },
    CompanionMood {
        mood: Mood,
    },
    DataReset,
    DataImported,
}

/// Subscriber for engine events.
pub trait EventSink {
    fn emit(&mut self, event: &Event);
}

impl<F: FnMut(&Event)> EventSink for F {
    fn emit(&mut self, event: &Event) {
        self(event)
    }
}
