//! Status, export, import and reset.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use focusbuddy_core::{export_file_name, Clock, ExportDocument, SystemClock, TimerState};
use serde::Serialize;

use super::open_engine;
use crate::host::HostConfig;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Status<'a> {
    timer: TimerState,
    remaining: String,
    percent_done: u32,
    ambient_track: &'a str,
    current_streak_days: u32,
    longest_streak_days: u32,
    today_sessions: u32,
    today_minutes: u32,
    week_sessions: u32,
    week_minutes: u32,
    total_sessions: u32,
    total_minutes: u32,
    favorite_track: &'a str,
    average_session_minutes: u32,
}

pub fn status(host: &HostConfig) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine(host)?;
    let stats = engine.stats();
    let timer = engine.timer_state();
    let status = Status {
        timer,
        remaining: timer.display(),
        percent_done: (timer.progress() * 100.0).round() as u32,
        ambient_track: engine.ambient_track().as_str(),
        current_streak_days: stats.current_streak_days,
        longest_streak_days: stats.longest_streak_days,
        today_sessions: stats.today_session_count,
        today_minutes: stats.today_minutes,
        week_sessions: stats.week_session_count,
        week_minutes: stats.week_minutes,
        total_sessions: stats.total_session_count,
        total_minutes: stats.total_minutes,
        favorite_track: stats.favorite_track().unwrap_or("None"),
        average_session_minutes: stats.average_session_minutes(),
    };
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

pub fn export(out: Option<PathBuf>, host: &HostConfig) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine(host)?;
    let path = out.unwrap_or_else(|| PathBuf::from(export_file_name(SystemClock.today())));
    std::fs::write(&path, engine.export().to_pretty_json()?)?;
    println!("exported to {}", path.display());
    Ok(())
}

pub fn import(path: &Path, host: &HostConfig) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    let doc = ExportDocument::from_json(&raw)?;
    let mut engine = open_engine(host)?;
    engine.import(doc)?;
    println!(
        "imported {} sessions from {}",
        engine.stats().total_session_count,
        path.display()
    );
    Ok(())
}

pub fn reset(yes: bool, host: &HostConfig) -> Result<(), Box<dyn std::error::Error>> {
    let confirmed = yes || confirm("Are you sure you want to reset all data? This cannot be undone.")?;
    let mut engine = open_engine(host)?;
    engine.reset_data(confirmed)?;
    println!("all data reset");
    Ok(())
}

fn confirm(question: &str) -> Result<bool, std::io::Error> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
