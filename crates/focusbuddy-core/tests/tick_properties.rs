//! Property tests for countdown arithmetic.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{FixedOffset, TimeZone};
use focusbuddy_core::{Event, FocusEngine, ManualClock};
use proptest::prelude::*;

fn engine(minutes: u32) -> (FocusEngine, Rc<Cell<u32>>) {
    let clock = ManualClock::new(
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2026, 5, 20, 14, 0, 0)
            .unwrap(),
    );
    let mut engine = FocusEngine::in_memory(Box::new(clock));
    engine.set_duration(minutes).unwrap();

    let completions = Rc::new(Cell::new(0));
    let counter = completions.clone();
    engine.subscribe(move |e: &Event| {
        if matches!(e, Event::SessionCompleted { .. }) {
            counter.set(counter.get() + 1);
        }
    });
    (engine, completions)
}

proptest! {
    #[test]
    fn remaining_after_n_ticks(minutes in 1u32..=3, ticks in 0u32..400) {
        let (mut engine, completions) = engine(minutes);
        let initial = engine.timer_state().remaining_seconds;
        engine.start();

        for n in 1..=ticks {
            engine.tick();
            let remaining = engine.timer_state().remaining_seconds;
            if n < initial {
                prop_assert_eq!(remaining, initial - n);
                prop_assert_eq!(completions.get(), 0);
            } else {
                prop_assert_eq!(remaining, 0);
                prop_assert_eq!(completions.get(), 1);
            }
        }
    }

    #[test]
    fn pause_then_start_loses_no_time(ticks in 0u32..120) {
        let (mut engine, _) = engine(5);
        engine.start();
        for _ in 0..ticks {
            engine.tick();
        }
        let before = engine.timer_state().remaining_seconds;
        engine.pause();
        engine.tick();
        engine.start();
        prop_assert_eq!(engine.timer_state().remaining_seconds, before);
    }

    #[test]
    fn completed_minutes_add_exactly(minutes in 1u32..=4) {
        let (mut engine, _) = engine(minutes);
        engine.start();
        for _ in 0..minutes * 60 {
            engine.tick();
        }
        let stats = engine.stats();
        prop_assert_eq!(stats.total_minutes, minutes);
        prop_assert_eq!(stats.total_session_count, 1);
    }
}
