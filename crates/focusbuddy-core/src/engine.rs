//! The focus/break engine.
//!
//! [`FocusEngine`] owns the countdown, the settings and the statistics. It
//! has no thread of its own: the caller delivers one `tick()` per second
//! while [`FocusEngine::needs_ticks`] is true. State changes are reported to
//! subscribed [`EventSink`]s, and settings and statistics are written back to
//! the store after every mutation.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = FocusEngine::new(Box::new(SystemClock), Box::new(store));
//! engine.subscribe(|event: &Event| println!("{event:?}"));
//! engine.start();
//! // Once per second:
//! engine.tick();
//! ```

use chrono::{DateTime, FixedOffset, Utc};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::ambient::AmbientTrack;
use crate::clock::Clock;
use crate::companion::Mood;
use crate::error::{CoreError, Result};
use crate::events::{Event, EventSink};
use crate::export::ExportDocument;
use crate::settings::{validate_minutes, Settings, SettingsPatch};
use crate::stats::{SessionRecord, Statistics, StreakUpdate};
use crate::storage::{KeyValueStore, MemoryStore, SETTINGS_KEY, STATS_KEY};
use crate::timer::{AutoStart, Countdown, Mode, PendingAutoStart, Phase, TickOutcome, TimerState};

pub struct FocusEngine {
    clock: Box<dyn Clock>,
    store: Box<dyn KeyValueStore>,
    settings: Settings,
    stats: Statistics,
    countdown: Countdown,
    track: AmbientTrack,
    pending: Option<PendingAutoStart>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl FocusEngine {
    /// Load settings and statistics from `store` and reconcile them with
    /// today's date.
    ///
    /// Missing, unreadable or corrupt values fall back to defaults; the
    /// engine is always usable.
    pub fn new(clock: Box<dyn Clock>, store: Box<dyn KeyValueStore>) -> Self {
        let mut settings: Settings = load_or_default(&*store, SETTINGS_KEY);
        if let Err(err) = settings.validate() {
            warn!(%err, "stored settings out of range, using defaults");
            settings = Settings::default();
        }
        let stats: Statistics = load_or_default(&*store, STATS_KEY);
        let countdown = Countdown::new(Mode::Focus, settings.focus_minutes);

        let mut engine = Self {
            clock,
            store,
            settings,
            stats,
            countdown,
            track: AmbientTrack::default(),
            pending: None,
            sinks: Vec::new(),
        };

        let today = engine.clock.today();
        if engine.stats.normalize(today) {
            debug!(%today, "statistics reconciled at startup");
            engine.persist();
        }
        engine
    }

    /// Engine backed by a fresh in-memory store.
    pub fn in_memory(clock: Box<dyn Clock>) -> Self {
        Self::new(clock, Box::new(MemoryStore::new()))
    }

    pub fn subscribe<S: EventSink + 'static>(&mut self, sink: S) {
        self.sinks.push(Box::new(sink));
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn timer_state(&self) -> TimerState {
        self.countdown.state()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn ambient_track(&self) -> AmbientTrack {
        self.track
    }

    pub fn pending_auto_start(&self) -> Option<PendingAutoStart> {
        self.pending
    }

    /// True while the countdown runs or an auto-start is waiting to fire.
    pub fn needs_ticks(&self) -> bool {
        self.countdown.is_counting() || self.pending.is_some()
    }

    pub fn export(&self) -> ExportDocument {
        ExportDocument {
            settings: self.settings.clone(),
            stats: self.stats.clone(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Idle -> Running, or Paused -> Running. No-op while already running.
    pub fn start(&mut self) {
        self.cancel_pending();
        let now = self.clock.now();
        let Some(from) = self.countdown.start() else {
            return;
        };
        let state = self.countdown.state();
        if from == Phase::Paused {
            debug!(remaining = state.remaining_seconds, "timer resumed");
            self.emit(Event::TimerResumed {
                remaining_seconds: state.remaining_seconds,
                at: now,
            });
        } else {
            debug!(mode = ?state.mode, total = state.total_seconds, "timer started");
            self.emit(Event::TimerStarted {
                mode: state.mode,
                total_seconds: state.total_seconds,
                at: now,
            });
            if state.mode == Mode::Focus {
                self.mood(Mood::Running);
            }
        }
    }

    /// Running -> Paused, keeping the remaining time.
    pub fn pause(&mut self) {
        self.cancel_pending();
        if !self.countdown.pause() {
            return;
        }
        let remaining = self.countdown.state().remaining_seconds;
        debug!(remaining, "timer paused");
        self.emit(Event::TimerPaused {
            remaining_seconds: remaining,
            at: self.clock.now(),
        });
        self.mood(Mood::Paused);
    }

    /// Any state -> Idle, with the full duration restored.
    pub fn stop(&mut self) {
        self.cancel_pending();
        self.countdown.stop();
        let state = self.countdown.state();
        debug!("timer stopped");
        self.emit(Event::TimerStopped {
            at: self.clock.now(),
        });
        self.emit(Event::Tick {
            remaining_seconds: state.remaining_seconds,
            total_seconds: state.total_seconds,
        });
        self.mood(Mood::Ready);
    }

    /// Advance one second using the engine's clock.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.tick_at(now);
    }

    /// Advance one second.
    ///
    /// A due auto-start fires first and consumes the tick. Otherwise a
    /// running countdown loses exactly one second, and if that reaches zero
    /// the session is completed before this call returns.
    pub fn tick_at(&mut self, now: DateTime<FixedOffset>) {
        if let Some(pending) = self.pending {
            if pending.is_due(now) {
                self.pending = None;
                self.fire(pending.kind);
                return;
            }
        }

        match self.countdown.tick() {
            TickOutcome::Idle => {}
            TickOutcome::Counted { remaining_seconds } => {
                self.emit(Event::Tick {
                    remaining_seconds,
                    total_seconds: self.countdown.state().total_seconds,
                });
            }
            TickOutcome::Finished => {
                self.emit(Event::Tick {
                    remaining_seconds: 0,
                    total_seconds: self.countdown.state().total_seconds,
                });
                self.complete(now);
            }
        }
    }

    /// Set the length of the current session. Only accepted while idle.
    pub fn set_duration(&mut self, minutes: u32) -> Result<()> {
        validate_minutes("minutes", minutes)?;
        self.countdown.set_duration(minutes)?;
        self.cancel_pending();
        self.emit_duration();
        Ok(())
    }

    /// Switch to a break of `break_minutes` and start it.
    pub fn start_break(&mut self) {
        self.cancel_pending();
        self.countdown.switch_to(Mode::Break, self.settings.break_minutes);
        self.emit(Event::ModeChanged { mode: Mode::Break });
        self.emit_duration();
        self.mood(Mood::Break);
        self.start();
    }

    /// Return to an idle focus session of `focus_minutes`.
    pub fn continue_focus(&mut self) {
        self.cancel_pending();
        self.countdown.switch_to(Mode::Focus, self.settings.focus_minutes);
        self.emit(Event::ModeChanged { mode: Mode::Focus });
        self.emit_duration();
        self.mood(Mood::Ready);
    }

    /// Validate and apply a settings patch.
    ///
    /// On error the previous settings stay in effect. An idle countdown
    /// adopts a changed duration for its current mode.
    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<()> {
        let next = self.settings.patched(&patch)?;
        let previous = std::mem::replace(&mut self.settings, next);

        let disabled = match self.pending.map(|p| p.kind) {
            Some(AutoStart::Break) => !self.settings.auto_start_break,
            Some(AutoStart::Focus) => !self.settings.auto_start_focus,
            None => false,
        };
        if disabled {
            self.cancel_pending();
        }

        if self.countdown.phase() == Phase::Idle {
            let (old, new) = match self.countdown.mode() {
                Mode::Focus => (previous.focus_minutes, self.settings.focus_minutes),
                Mode::Break => (previous.break_minutes, self.settings.break_minutes),
            };
            if old != new && self.countdown.set_duration(new).is_ok() {
                self.emit_duration();
            }
        }

        self.persist();
        info!("settings updated");
        self.emit(Event::SettingsUpdated {
            settings: self.settings.clone(),
        });
        Ok(())
    }

    /// Set one setting from its string form, e.g. `("volume", "80")`.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<()> {
        let patch = self.settings.patch_for(key, value)?;
        self.update_settings(patch)
    }

    pub fn change_ambient_track(&mut self, track: AmbientTrack) {
        self.track = track;
        debug!(%track, "ambient track changed");
        self.emit(Event::AmbientTrackChanged {
            track: track.as_str().to_string(),
        });
    }

    /// Replace settings and statistics with an exported document.
    pub fn import(&mut self, doc: ExportDocument) -> Result<()> {
        doc.settings.validate()?;
        self.cancel_pending();
        self.settings = doc.settings;
        self.stats = doc.stats;
        self.stats.normalize(self.clock.today());
        self.countdown = Countdown::new(Mode::Focus, self.settings.focus_minutes);
        self.persist();
        info!(sessions = self.stats.total_session_count, "data imported");
        self.emit(Event::DataImported);
        Ok(())
    }

    /// Irreversibly clear persisted settings and statistics.
    ///
    /// Requires `confirmed`; without it nothing is touched.
    pub fn reset_data(&mut self, confirmed: bool) -> Result<()> {
        if !confirmed {
            return Err(CoreError::ResetNotConfirmed);
        }
        self.cancel_pending();
        self.settings = Settings::default();
        self.stats = Statistics::default();
        self.countdown = Countdown::new(Mode::Focus, self.settings.focus_minutes);
        self.track = AmbientTrack::default();

        // Both keys are attempted even if the first removal fails.
        let settings_removed = self.store.remove(SETTINGS_KEY);
        let stats_removed = self.store.remove(STATS_KEY);
        info!("all data reset");
        self.emit(Event::DataReset);
        settings_removed.and(stats_removed).map_err(CoreError::from)
    }

    /// Write settings and statistics to the store.
    pub fn save(&mut self) -> Result<()> {
        let settings = serde_json::to_string(&self.settings)?;
        let stats = serde_json::to_string(&self.stats)?;
        self.store.set(SETTINGS_KEY, &settings)?;
        self.store.set(STATS_KEY, &stats)?;
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self, now: DateTime<FixedOffset>) {
        let state = self.countdown.state();
        info!(mode = ?state.mode, minutes = state.total_seconds / 60, "session complete");

        if self.settings.sound_enabled {
            self.emit(Event::Chime {
                volume: self.settings.volume,
            });
        }
        if self.settings.desktop_notify {
            let body = match state.mode {
                Mode::Focus => "Focus session complete! Great job!",
                Mode::Break => "Break is over! Ready to focus again?",
            };
            self.emit(Event::DesktopNotification {
                title: "FocusBuddy".into(),
                body: body.into(),
            });
        }

        match state.mode {
            Mode::Focus => {
                let minutes = state.total_seconds / 60;
                let record =
                    SessionRecord::completed(now.with_timezone(&Utc), minutes, self.track.as_str());
                let streak = self.stats.record_completion(
                    record,
                    now.date_naive(),
                    self.settings.week_rollover,
                );
                self.persist();

                self.emit(Event::SessionCompleted {
                    duration_minutes: minutes,
                    stats: Box::new(self.stats.clone()),
                });
                if streak != StreakUpdate::AlreadyCounted {
                    self.emit(Event::StreakChanged {
                        current: self.stats.current_streak_days,
                        longest: self.stats.longest_streak_days,
                    });
                }
                self.mood(Mood::Completed);

                if self.settings.auto_start_break {
                    self.schedule(AutoStart::Break, now);
                }
            }
            Mode::Break => {
                self.emit(Event::BreakCompleted { at: now });
                self.countdown
                    .switch_to(Mode::Focus, self.settings.focus_minutes);
                self.emit(Event::ModeChanged { mode: Mode::Focus });
                self.emit_duration();
                self.mood(Mood::Ready);

                if self.settings.auto_start_focus {
                    self.schedule(AutoStart::Focus, now);
                }
            }
        }
    }

    fn schedule(&mut self, kind: AutoStart, now: DateTime<FixedOffset>) {
        let pending = PendingAutoStart::schedule(kind, now);
        debug!(?kind, due_at = %pending.due_at, "auto-start scheduled");
        self.pending = Some(pending);
        self.emit(Event::AutoStartScheduled {
            kind,
            due_at: pending.due_at,
        });
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(kind = ?pending.kind, "auto-start cancelled");
            self.emit(Event::AutoStartCancelled { kind: pending.kind });
        }
    }

    fn fire(&mut self, kind: AutoStart) {
        debug!(?kind, "auto-start fired");
        match kind {
            AutoStart::Break => self.start_break(),
            AutoStart::Focus => self.start(),
        }
    }

    fn persist(&mut self) {
        if let Err(err) = self.save() {
            warn!(%err, "failed to persist; continuing with in-memory state");
        }
    }

    fn mood(&mut self, mood: Mood) {
        if self.settings.show_companion {
            self.emit(Event::CompanionMood { mood });
        }
    }

    fn emit_duration(&mut self) {
        let state = self.countdown.state();
        self.emit(Event::DurationChanged {
            mode: state.mode,
            total_seconds: state.total_seconds,
        });
    }

    fn emit(&mut self, event: Event) {
        for sink in &mut self.sinks {
            sink.as_mut().emit(&event);
        }
    }
}

fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(source) => {
                let err = CoreError::CorruptData {
                    key: key.to_string(),
                    source,
                };
                warn!(%err, "discarding persisted value");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(err) => {
            warn!(%err, key, "store unavailable, using defaults");
            T::default()
        }
    }
}
