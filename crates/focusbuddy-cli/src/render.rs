//! Terminal view: renders engine events to stdout.

use std::io::Write;

use focusbuddy_core::{pick_message, Event, EventSink, Mode};

const BAR_WIDTH: usize = 30;

pub struct TerminalRenderer {
    mode: Mode,
    /// A `\r` progress line is on screen and needs a newline before other output.
    mid_line: bool,
}

impl TerminalRenderer {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            mid_line: false,
        }
    }

    fn line(&mut self, text: &str) {
        if self.mid_line {
            println!();
            self.mid_line = false;
        }
        println!("{text}");
    }

    fn progress(&mut self, remaining: u32, total: u32) {
        let done = if total == 0 {
            0
        } else {
            ((total - remaining.min(total)) as usize * BAR_WIDTH) / total as usize
        };
        print!(
            "\r{:<10} {:02}:{:02} [{}{}]",
            self.mode.label(),
            remaining / 60,
            remaining % 60,
            "#".repeat(done),
            ".".repeat(BAR_WIDTH - done)
        );
        let _ = std::io::stdout().flush();
        self.mid_line = true;
    }
}

impl EventSink for TerminalRenderer {
    fn emit(&mut self, event: &Event) {
        match event {
            Event::Tick {
                remaining_seconds,
                total_seconds,
            } => self.progress(*remaining_seconds, *total_seconds),
            Event::TimerStarted {
                mode,
                total_seconds,
                ..
            } => {
                self.mode = *mode;
                self.line(&format!("{} started ({} min)", mode.label(), total_seconds / 60));
                self.progress(*total_seconds, *total_seconds);
            }
            Event::TimerResumed { .. } => self.line("Resumed"),
            Event::TimerPaused { .. } => self.line("Paused"),
            Event::TimerStopped { .. } => self.line("Stopped"),
            Event::ModeChanged { mode } => self.mode = *mode,
            Event::SessionCompleted {
                duration_minutes,
                stats,
            } => self.line(&format!(
                "Focus session complete: {duration_minutes} min. Today: {} sessions, {} min.",
                stats.today_session_count, stats.today_minutes
            )),
            Event::BreakCompleted { .. } => self.line("Break is over."),
            Event::StreakChanged { current, longest } => {
                self.line(&format!("Streak: {current} days (best {longest})"))
            }
            Event::AutoStartScheduled { kind, .. } => {
                self.line(&format!("Starting {kind:?} shortly..."))
            }
            Event::Chime { .. } => {
                print!("\x07");
                let _ = std::io::stdout().flush();
            }
            Event::DesktopNotification { title, body } => {
                self.line(&format!("[{title}] {body}"))
            }
            Event::CompanionMood { mood } => {
                let message = pick_message(*mood, &mut rand::thread_rng());
                self.line(&format!("  (\\_/)  {message}"));
            }
            Event::AmbientTrackChanged { track } => {
                self.line(&format!("Ambient track: {track}"))
            }
            Event::DurationChanged { .. }
            | Event::AutoStartCancelled { .. }
            | Event::SettingsUpdated { .. }
            | Event::DataReset
            | Event::DataImported => {}
        }
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        if self.mid_line {
            println!();
        }
    }
}
