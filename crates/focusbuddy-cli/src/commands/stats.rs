use chrono::Local;
use clap::Subcommand;
use focusbuddy_core::WeekdayCount;
use serde::Serialize;

use super::open_engine;
use crate::host::HostConfig;

const CHART_WIDTH: u32 = 30;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's stats
    Today,
    /// All-time stats
    All,
    /// This week's stats with the per-weekday tally
    Week,
    /// Bar chart of sessions per weekday
    Chart,
    /// Most recent completed sessions
    Log {
        /// Number of sessions to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Today {
    sessions: u32,
    minutes: u32,
    current_streak_days: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Week {
    sessions: u32,
    minutes: u32,
    days: [WeekdayCount; 7],
}

pub fn run(action: StatsAction, host: &HostConfig) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine(host)?;
    let stats = engine.stats();

    match action {
        StatsAction::Today => {
            let today = Today {
                sessions: stats.today_session_count,
                minutes: stats.today_minutes,
                current_streak_days: stats.current_streak_days,
            };
            println!("{}", serde_json::to_string_pretty(&today)?);
        }
        StatsAction::All => {
            println!("{}", serde_json::to_string_pretty(stats)?);
        }
        StatsAction::Week => {
            let week = Week {
                sessions: stats.week_session_count,
                minutes: stats.week_minutes,
                days: stats.weekday_counts(),
            };
            println!("{}", serde_json::to_string_pretty(&week)?);
        }
        StatsAction::Chart => {
            print!("{}", render_chart(&stats.weekday_counts()));
        }
        StatsAction::Log { limit } => {
            let recent = stats.recent(limit);
            if recent.is_empty() {
                println!("no sessions yet");
            }
            for record in recent {
                println!(
                    "{}  {:>4} min  {}",
                    record.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    record.duration_minutes,
                    record.ambient_track
                );
            }
        }
    }
    Ok(())
}

/// One line per weekday, bars scaled so the busiest day fills the width.
fn render_chart(days: &[WeekdayCount; 7]) -> String {
    let max = days.iter().map(|d| d.count).max().unwrap_or(0).max(1);
    let mut out = String::new();
    for day in days {
        let len = (day.count * CHART_WIDTH).div_ceil(max);
        out.push_str(&format!(
            "{} |{:<width$}| {}\n",
            day.label,
            "#".repeat(len as usize),
            day.count,
            width = CHART_WIDTH as usize
        ));
    }
    out
}
