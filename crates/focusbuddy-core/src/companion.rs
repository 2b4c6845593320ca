//! Companion (mascot) lines shown next to the timer.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Ready,
    Running,
    Paused,
    Completed,
    Break,
}

const READY: &[&str] = &[
    "Ready to focus? Let's make this one count.",
    "Pick a task and press start. I'll keep time.",
    "One session at a time. You've got this.",
    "Clear the desk, start the clock.",
];

const RUNNING: &[&str] = &[
    "Nice focus. Keep it going.",
    "You're in the zone. Stay there.",
    "Steady work. The clock is on your side.",
    "Great momentum. Eyes on the task.",
];

const PAUSED: &[&str] = &[
    "Paused. Take a breath and come back strong.",
    "Short pause? That's fine. Resume when ready.",
    "Timer's holding. So is your progress.",
];

const COMPLETED: &[&str] = &[
    "Session complete. Well done!",
    "That's another one in the books.",
    "Finished! You earned a break.",
    "Great work. The streak thanks you.",
];

const BREAK: &[&str] = &[
    "Break time. Stretch, breathe, hydrate.",
    "Step away for a moment. You earned it.",
    "Rest now, focus again soon.",
];

impl Mood {
    pub fn messages(&self) -> &'static [&'static str] {
        match self {
            Mood::Ready => READY,
            Mood::Running => RUNNING,
            Mood::Paused => PAUSED,
            Mood::Completed => COMPLETED,
            Mood::Break => BREAK,
        }
    }
}

/// Pick a random line for `mood`.
pub fn pick_message<R: Rng + ?Sized>(mood: Mood, rng: &mut R) -> &'static str {
    mood.messages().choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_mood_has_lines() {
        for mood in [Mood::Ready, Mood::Running, Mood::Paused, Mood::Completed, Mood::Break] {
            assert!(!mood.messages().is_empty());
        }
    }

    #[test]
    fn picks_from_the_mood_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let line = pick_message(Mood::Paused, &mut rng);
            assert!(PAUSED.contains(&line));
        }
    }
}
