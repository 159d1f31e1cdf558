//! Game loop thread: fixed-timestep simulation driven by wall-clock time.
//!
//! Real elapsed time is accumulated and consumed in whole ticks of
//! `TICK_DURATION`. Key events arrive over an `mpsc` channel; realtime keys
//! are re-issued every tick while held.

use std::collections::BTreeSet;
use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, trace};

use skyfall_core::constants::{DT, TICK_RATE};
use skyfall_core::state::FrameSnapshot;
use skyfall_sim::player::{Key, KeyBindings};
use skyfall_sim::resources::{ResourceLookup, ResourceTable};
use skyfall_sim::{SceneError, World, WorldConfig};

use crate::state::{AppState, GameLoopCommand, MissionStatus};

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Most ticks run for one frame before the backlog is dropped.
const MAX_CATCH_UP_STEPS: u32 = 5;

/// Splits wall-clock time into fixed simulation steps.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    accumulator: Duration,
}

impl FixedTimestep {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            accumulator: Duration::ZERO,
        }
    }

    /// Add `elapsed` and return how many steps are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps > MAX_CATCH_UP_STEPS {
            // Too far behind; drop the backlog instead of spiralling.
            debug!(skipped = steps - MAX_CATCH_UP_STEPS, "dropping late ticks");
            steps = MAX_CATCH_UP_STEPS;
        }
        steps
    }

    /// Time left until the next step is due.
    pub fn until_next_step(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }
}

/// A running mission: the world plus the player's held keys.
pub struct MissionSession {
    world: World,
    bindings: KeyBindings,
    held: BTreeSet<Key>,
}

impl MissionSession {
    pub fn new(config: WorldConfig, bindings: KeyBindings) -> Self {
        Self {
            world: World::new(config),
            bindings,
            held: BTreeSet::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn key_pressed(&mut self, key: Key) {
        if self.held.insert(key) {
            self.bindings.handle_key_press(key, self.world.command_queue_mut());
        }
    }

    pub fn key_released(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Run one tick and report the mission status afterwards.
    pub fn step(&mut self) -> MissionStatus {
        let held = &self.held;
        self.bindings
            .handle_realtime_input(|key| held.contains(&key), self.world.command_queue_mut());
        self.world.update(DT);

        for event in self.world.take_audio_events() {
            trace!(effect = ?event.effect, x = event.position.x, y = event.position.y, "sound");
        }
        self.status()
    }

    pub fn status(&self) -> MissionStatus {
        if !self.world.has_alive_player() {
            MissionStatus::Failure
        } else if self.world.has_player_reached_end() {
            MissionStatus::Success
        } else {
            MissionStatus::Running
        }
    }

    pub fn snapshot(&self, resources: &dyn ResourceLookup) -> Result<FrameSnapshot, SceneError> {
        self.world.draw(resources)
    }
}

/// Spawn the game loop in a new thread. The handle yields the final status.
pub fn spawn_game_loop(
    config: WorldConfig,
    state: &AppState,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<MissionStatus>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot = Arc::clone(&state.latest_snapshot);
    let status = Arc::clone(&state.status);

    let handle = std::thread::Builder::new()
        .name("skyfall-game-loop".into())
        .spawn(move || run_game_loop(config, cmd_rx, &latest_snapshot, &status))?;

    Ok((cmd_tx, handle))
}

/// Runs until the mission ends, a Shutdown arrives or the channel disconnects.
fn run_game_loop(
    config: WorldConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<FrameSnapshot>>,
    shared_status: &Mutex<MissionStatus>,
) -> MissionStatus {
    let bindings = KeyBindings::new(config.player_speed);
    let mut session = MissionSession::new(config, bindings);
    let resources = ResourceTable::with_all_resources();
    let mut clock = FixedTimestep::new(TICK_DURATION);
    let mut last_frame = Instant::now();
    info!("game loop started");

    loop {
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::KeyPressed(key)) => session.key_pressed(key),
                Ok(GameLoopCommand::KeyReleased(key)) => session.key_released(key),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!("game loop shut down");
                    return session.status();
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        let now = Instant::now();
        let steps = clock.advance(now - last_frame);
        last_frame = now;

        let mut status = MissionStatus::Running;
        for _ in 0..steps {
            status = session.step();
            if status != MissionStatus::Running {
                break;
            }
        }

        if steps > 0 {
            match session.snapshot(&resources) {
                Ok(snapshot) => {
                    if let Ok(mut lock) = latest_snapshot.lock() {
                        *lock = Some(snapshot);
                    }
                }
                Err(e) => error!(%e, "frame could not be drawn"),
            }
        }
        if let Ok(mut lock) = shared_status.lock() {
            *lock = status;
        }

        if status != MissionStatus::Running {
            let time = session.world().time();
            info!(?status, tick = time.tick, seconds = time.elapsed_secs, "mission over");
            return status;
        }

        std::thread::sleep(clock.until_next_step());
    }
}
