use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use tracing::{info, warn};

use skyfall_app::game_loop::{spawn_game_loop, TICK_DURATION};
use skyfall_app::pilot::Autopilot;
use skyfall_app::state::{AppState, GameLoopCommand, MissionStatus};
use skyfall_app::config;

/// Give up on a mission that neither ends nor dies within this time.
const MISSION_TIMEOUT: Duration = Duration::from_secs(180);

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = config::load(config_path.as_deref())?;
    info!(seed = config.seed, enemies = config.spawns.len(), "starting mission");

    let state = AppState::new();
    let (cmd_tx, handle) = spawn_game_loop(config, &state)?;

    let mut pilot = Autopilot::new();
    let started = Instant::now();
    while !handle.is_finished() {
        let elapsed = started.elapsed();
        if elapsed > MISSION_TIMEOUT {
            warn!(?elapsed, "mission timed out");
            let _ = cmd_tx.send(GameLoopCommand::Shutdown);
            break;
        }
        for command in pilot.poll(elapsed) {
            if cmd_tx.send(command).is_err() {
                break;
            }
        }
        std::thread::sleep(TICK_DURATION);
    }

    let status = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;

    let drawables = state
        .latest_snapshot
        .lock()
        .ok()
        .and_then(|snapshot| snapshot.as_ref().map(|s| s.drawables.len()))
        .unwrap_or_default();

    match status {
        MissionStatus::Success => info!(drawables, "mission accomplished"),
        MissionStatus::Failure => info!(drawables, "player aircraft lost"),
        MissionStatus::Running => info!(drawables, "mission aborted"),
    }
    Ok(())
}
