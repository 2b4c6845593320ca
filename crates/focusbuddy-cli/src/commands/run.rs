use std::time::Duration;

use clap::Args;
use focusbuddy_core::AmbientTrack;
use tracing::info;

use super::open_engine;
use crate::host::HostConfig;
use crate::render::TerminalRenderer;

#[derive(Args)]
pub struct RunArgs {
    /// Session length in minutes (defaults to the focus setting)
    #[arg(long, conflicts_with = "take_break")]
    pub minutes: Option<u32>,
    /// Take a break instead of a focus session
    #[arg(long = "break")]
    pub take_break: bool,
    /// Ambient track: rain, ocean, cafe or forest
    #[arg(long)]
    pub track: Option<AmbientTrack>,
}

pub fn run(args: RunArgs, host: &HostConfig) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(drive(args, host))
}

/// Deliver ticks until nothing is counting down or pending, or Ctrl-C.
async fn drive(args: RunArgs, host: &HostConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = open_engine(host)?;
    let mode = engine.timer_state().mode;
    engine.subscribe(TerminalRenderer::new(mode));

    if let Some(track) = args.track {
        engine.change_ambient_track(track);
    }
    if args.take_break {
        engine.start_break();
    } else {
        if let Some(minutes) = args.minutes {
            engine.set_duration(minutes)?;
        }
        engine.start();
    }

    let mut interval = tokio::time::interval(Duration::from_millis(host.tick_interval_ms.max(1)));
    // The first tick of an interval completes immediately.
    interval.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    while engine.needs_ticks() {
        tokio::select! {
            _ = interval.tick() => engine.tick(),
            _ = &mut ctrl_c => {
                info!("interrupted, stopping timer");
                engine.stop();
                break;
            }
        }
    }
    Ok(())
}
