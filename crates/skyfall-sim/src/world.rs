//! World orchestrator: owns the scene, the command queue and the view.
//!
//! `World::update` runs the ten fixed phases of a tick in order. The world
//! is headless; drawing yields a `FrameSnapshot` and sounds are buffered as
//! `AudioEvent`s for the embedding application to drain.

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use skyfall_core::category::Category;
use skyfall_core::constants::*;
use skyfall_core::enums::Layer;
use skyfall_core::events::AudioEvent;
use skyfall_core::state::FrameSnapshot;
use skyfall_core::types::{Rect, SimTime};

use crate::command::{Action, Command, CommandQueue, DispatchScratch};
use crate::error::SceneError;
use crate::resources::ResourceLookup;
use crate::scene::{NodeId, SceneGraph, UpdateContext};
use crate::systems::spawner::{SpawnPoint, SpawnSchedule};
use crate::systems::{collision, view};
use crate::world_setup;

/// Configuration for a new world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// RNG seed. Same seed and inputs give the same run.
    pub seed: u64,
    pub view_width: f32,
    pub view_height: f32,
    pub world_height: f32,
    /// Vertical scroll speed in units/s; negative scrolls up.
    pub scroll_speed: f32,
    pub battlefield_margin: f32,
    pub border_distance: f32,
    /// Speed of player movement input (units/s).
    pub player_speed: f32,
    pub spawns: Vec<SpawnPoint>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            world_height: WORLD_HEIGHT,
            scroll_speed: SCROLL_SPEED,
            battlefield_margin: BATTLEFIELD_MARGIN,
            border_distance: BORDER_DISTANCE,
            player_speed: PLAYER_SPEED,
            spawns: SpawnSchedule::default_mission(),
        }
    }
}

impl WorldConfig {
    pub fn view_size(&self) -> Vec2 {
        Vec2::new(self.view_width, self.view_height)
    }
}

pub struct World {
    config: WorldConfig,
    scene: SceneGraph,
    layers: [NodeId; Layer::COUNT],
    player: Option<NodeId>,
    commands: CommandQueue,
    scratch: DispatchScratch,
    schedule: SpawnSchedule,
    rng: ChaCha8Rng,
    time: SimTime,
    world_bounds: Rect,
    spawn_position: Vec2,
    view_center: Vec2,
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        let world_bounds = Rect::new(0.0, 0.0, config.view_width, config.world_height);
        let spawn_position = Vec2::new(
            config.view_width / 2.0,
            world_bounds.bottom() - config.view_height / 2.0,
        );

        let mut scene = SceneGraph::new();
        let layout = world_setup::build_scene(&mut scene, world_bounds, spawn_position);
        let schedule = SpawnSchedule::new(config.spawns.iter().copied());

        info!(
            seed = config.seed,
            enemies = schedule.remaining(),
            height = config.world_height,
            "world built"
        );

        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            scene,
            layers: layout.layers,
            player: Some(layout.player),
            commands: CommandQueue::new(),
            scratch: DispatchScratch::default(),
            schedule,
            time: SimTime::default(),
            world_bounds,
            spawn_position,
            view_center: spawn_position,
        }
    }

    /// Advance the world by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        // Scroll, and forget last tick's player input.
        self.view_center.y += self.config.scroll_speed * dt;
        if let Some(player) = self.live_player() {
            if let Some(mut body) = self.scene.body_mut(player) {
                body.velocity = Vec2::ZERO;
            }
        }

        self.destroy_entities_outside_view();
        self.guide_missiles();

        self.scratch.enemy_positions.clear();
        let root = self.scene.root();
        while let Some(command) = self.commands.pop() {
            self.scene.on_command(root, &command, &mut self.scratch);
        }

        self.adapt_player_velocity();

        let result = collision::run(&mut self.scene, &mut self.commands);
        if result != collision::CollisionResult::default() {
            trace!(?result, "collisions resolved");
        }

        self.scene.remove_wrecks();
        self.spawn_enemies();

        let mut ctx = UpdateContext {
            commands: &mut self.commands,
            rng: &mut self.rng,
        };
        self.scene.update(dt, &mut ctx);

        self.adapt_player_position();
        self.time.advance(dt);
    }

    /// Snapshot of everything visible this frame.
    pub fn draw(&self, resources: &dyn ResourceLookup) -> Result<FrameSnapshot, SceneError> {
        let mut drawables = Vec::new();
        self.scene.draw(resources, &mut drawables)?;
        Ok(FrameSnapshot {
            time: self.time,
            view: self.view_bounds(),
            drawables,
        })
    }

    /// Queue for player input, processed on the next update.
    pub fn command_queue_mut(&mut self) -> &mut CommandQueue {
        &mut self.commands
    }

    /// Drain the sound requests realised since the last call.
    pub fn take_audio_events(&mut self) -> Vec<AudioEvent> {
        std::mem::take(&mut self.scratch.audio_events)
    }

    pub fn has_alive_player(&self) -> bool {
        self.live_player()
            .is_some_and(|player| !self.scene.is_marked_for_removal(player))
    }

    pub fn has_player_reached_end(&self) -> bool {
        self.live_player()
            .is_some_and(|player| !self.world_bounds.contains(self.scene.world_position(player)))
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn player(&self) -> Option<NodeId> {
        self.live_player()
    }

    pub fn layer(&self, layer: Layer) -> NodeId {
        self.layers[layer as usize]
    }

    pub fn world_bounds(&self) -> Rect {
        self.world_bounds
    }

    pub fn spawn_position(&self) -> Vec2 {
        self.spawn_position
    }

    pub fn view_center(&self) -> Vec2 {
        self.view_center
    }

    pub fn view_bounds(&self) -> Rect {
        view::view_bounds(self.view_center, self.config.view_size())
    }

    pub fn battlefield_bounds(&self) -> Rect {
        view::battlefield_bounds(self.view_bounds(), self.config.battlefield_margin)
    }

    /// Enemies still waiting to enter the battlefield.
    pub fn pending_spawns(&self) -> usize {
        self.schedule.remaining()
    }

    /// Live enemy aircraft currently in the scene.
    pub fn enemy_count(&self) -> usize {
        self.scene
            .find_all(self.scene.root(), Category::ENEMY_AIRCRAFT)
            .into_iter()
            .filter(|&enemy| !self.scene.is_destroyed(enemy))
            .count()
    }

    fn live_player(&self) -> Option<NodeId> {
        self.player.filter(|&player| self.scene.contains(player))
    }

    fn destroy_entities_outside_view(&mut self) {
        let bounds = self.battlefield_bounds();
        self.commands.push(Command::new(
            Category::PROJECTILE | Category::ENEMY_AIRCRAFT,
            Action::DestroyOutside(bounds),
        ));
    }

    fn guide_missiles(&mut self) {
        self.commands.push(Command::new(
            Category::ENEMY_AIRCRAFT,
            Action::CollectEnemyPositions,
        ));
        self.commands.push(Command::new(
            Category::ALLIED_PROJECTILE,
            Action::GuideMissiles,
        ));
    }

    fn adapt_player_velocity(&mut self) {
        let scroll_speed = self.config.scroll_speed;
        let Some(player) = self.live_player() else {
            return;
        };
        if let Some(mut body) = self.scene.body_mut(player) {
            body.velocity = view::adapt_velocity(body.velocity, scroll_speed);
        }
    }

    /// The air layer is untransformed, so the player's local position is its world position.
    fn adapt_player_position(&mut self) {
        let view = self.view_bounds();
        let border = self.config.border_distance;
        let Some(player) = self.live_player() else {
            return;
        };
        if let Some(mut transform) = self.scene.transform_mut(player) {
            transform.position = view::clamp_to_view(transform.position, view, border);
        }
    }

    fn spawn_enemies(&mut self) {
        let reach = self.spawn_position.y - self.battlefield_bounds().top;
        let air_layer = self.layer(Layer::UpperAir);
        for point in self.schedule.release_due(reach) {
            let position = Vec2::new(self.spawn_position.x + point.x, self.spawn_position.y - point.depth);
            world_setup::spawn_enemy(&mut self.scene, air_layer, point.kind, position);
            debug!(kind = ?point.kind, ?position, "enemy spawned");
        }
    }

    #[cfg(test)]
    pub(crate) fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    /// Spawn an enemy outside the schedule (for tests).
    #[cfg(test)]
    pub(crate) fn spawn_test_enemy(&mut self, kind: skyfall_core::enums::AircraftType, position: Vec2) -> NodeId {
        let air_layer = self.layer(Layer::UpperAir);
        world_setup::spawn_enemy(&mut self.scene, air_layer, kind, position)
    }

    /// Spawn a projectile directly into the air layer (for tests).
    #[cfg(test)]
    pub(crate) fn spawn_test_projectile(
        &mut self,
        kind: skyfall_core::enums::ProjectileType,
        position: Vec2,
        velocity: Vec2,
    ) -> NodeId {
        let air_layer = self.layer(Layer::UpperAir);
        let node = world_setup::create_projectile(&mut self.scene, kind, position, velocity);
        self.scene.attach_child_at_world(air_layer, node)
    }
}
