//! Countdown state machine.
//!
//! Advanced one second per `tick()` by the caller; it never looks at the
//! wall clock, so a test can drive a whole session without sleeping.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!   ^        |
//!   +--------+  (stop, or remaining reaches 0)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TimerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Focus,
    Break,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::Break => "Break Time",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
}

/// Snapshot of the countdown, handed to the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub mode: Mode,
    pub total_seconds: u32,
    pub remaining_seconds: u32,
    pub running: bool,
    pub paused: bool,
}

impl TimerState {
    pub fn phase(&self) -> Phase {
        match (self.running, self.paused) {
            (true, true) => Phase::Paused,
            (true, false) => Phase::Running,
            _ => Phase::Idle,
        }
    }

    /// Remaining time as `MM:SS`. Minutes are not wrapped at 60.
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_seconds as f64 / self.total_seconds as f64)
    }
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not counting down; nothing changed.
    Idle,
    /// One second elapsed.
    Counted { remaining_seconds: u32 },
    /// This tick brought the countdown to zero. Reported once per countdown.
    Finished,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    state: TimerState,
}

impl Countdown {
    pub fn new(mode: Mode, minutes: u32) -> Self {
        let total = minutes_to_secs(minutes);
        Self {
            state: TimerState {
                mode,
                total_seconds: total,
                remaining_seconds: total,
                running: false,
                paused: false,
            },
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_counting(&self) -> bool {
        self.state.phase() == Phase::Running
    }

    /// Returns the phase the countdown left, or `None` if it was already running.
    pub fn start(&mut self) -> Option<Phase> {
        let from = self.phase();
        if from == Phase::Running {
            return None;
        }
        if self.state.remaining_seconds == 0 {
            self.state.remaining_seconds = self.state.total_seconds;
        }
        self.state.running = true;
        self.state.paused = false;
        Some(from)
    }

    /// Returns `true` if the countdown was running and is now paused.
    pub fn pause(&mut self) -> bool {
        if self.phase() != Phase::Running {
            return false;
        }
        self.state.paused = true;
        true
    }

    pub fn stop(&mut self) {
        self.state.running = false;
        self.state.paused = false;
        self.state.remaining_seconds = self.state.total_seconds;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_counting() {
            return TickOutcome::Idle;
        }
        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds == 0 {
            self.state.running = false;
            self.state.paused = false;
            return TickOutcome::Finished;
        }
        TickOutcome::Counted {
            remaining_seconds: self.state.remaining_seconds,
        }
    }

    /// Set a new session length. Only accepted while idle.
    pub fn set_duration(&mut self, minutes: u32) -> Result<(), TimerError> {
        if self.phase() != Phase::Idle {
            return Err(TimerError::Busy);
        }
        self.apply_duration(minutes);
        Ok(())
    }

    /// Switch mode and length unconditionally, leaving the countdown idle.
    pub fn switch_to(&mut self, mode: Mode, minutes: u32) {
        self.state.running = false;
        self.state.paused = false;
        self.state.mode = mode;
        self.apply_duration(minutes);
    }

    fn apply_duration(&mut self, minutes: u32) {
        let total = minutes_to_secs(minutes);
        self.state.total_seconds = total;
        self.state.remaining_seconds = total;
    }
}

fn minutes_to_secs(minutes: u32) -> u32 {
    minutes.max(1).saturating_mul(60)
}
