mod countdown;
mod schedule;

pub use countdown::{Countdown, Mode, Phase, TickOutcome, TimerState};
pub use schedule::{AutoStart, PendingAutoStart};
