//! Category-targeted commands and the queue that carries them between ticks.
//!
//! A command never holds a reference into the scene graph. Payloads are
//! owned values computed by the emitter, so a command that outlives its
//! emitter is still safe to dispatch.

use std::collections::VecDeque;

use glam::Vec2;
use tracing::trace;

use skyfall_core::category::Category;
use skyfall_core::enums::{ParticleType, PickupType, ProjectileType, SoundEffect};
use skyfall_core::events::AudioEvent;
use skyfall_core::types::Rect;

use crate::nodes::NodeKind;
use crate::scene::{NodeId, SceneGraph};
use crate::systems::guidance;
use crate::world_setup;

/// A projectile to be created by the air layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawn {
    pub kind: ProjectileType,
    /// World position.
    pub position: Vec2,
    pub velocity: Vec2,
}

/// What a command does to each node it reaches.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Add to an aircraft's velocity.
    Accelerate(Vec2),
    /// Ask an aircraft to fire its guns (honored when the cooldown allows).
    Fire,
    /// Ask an aircraft to launch a missile (honored when ammo remains).
    LaunchMissile,
    /// Create projectiles under the receiving layer.
    SpawnProjectiles(Vec<ProjectileSpawn>),
    /// Create a pickup under the receiving layer.
    SpawnPickup { kind: PickupType, position: Vec2 },
    /// Forward a sound request to the sound node.
    PlaySound { effect: SoundEffect, position: Vec2 },
    /// Add particles to the particle system of the matching type.
    EmitParticles {
        kind: ParticleType,
        position: Vec2,
        count: u32,
    },
    /// Remove entities whose bounds no longer touch the given rectangle.
    DestroyOutside(Rect),
    /// Record the world position of every live enemy aircraft.
    CollectEnemyPositions,
    /// Point every homing projectile at the nearest recorded enemy.
    GuideMissiles,
}

/// A deferred, broadcast instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub category: Category,
    pub action: Action,
}

impl Command {
    pub fn new(category: Category, action: Action) -> Self {
        Self { category, action }
    }

    pub fn play_sound(effect: SoundEffect, position: Vec2) -> Self {
        Self::new(
            Category::SOUND_EFFECT,
            Action::PlaySound { effect, position },
        )
    }
}

/// FIFO of commands produced during a tick.
#[derive(Debug, Default)]
pub struct CommandQueue {
    queue: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    pub fn pop(&mut self) -> Option<Command> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.queue.iter()
    }
}

impl Extend<Command> for CommandQueue {
    fn extend<T: IntoIterator<Item = Command>>(&mut self, iter: T) {
        self.queue.extend(iter);
    }
}

/// Per-dispatch scratch space shared by all nodes visited while draining the queue.
#[derive(Debug, Default)]
pub struct DispatchScratch {
    /// Filled by `CollectEnemyPositions`, read by `GuideMissiles`.
    pub enemy_positions: Vec<Vec2>,
    /// Sound requests realised by the sound node.
    pub audio_events: Vec<AudioEvent>,
}

impl Action {
    /// Apply this action to a node whose category matched the command.
    pub(crate) fn apply(
        &self,
        scene: &mut SceneGraph,
        node: NodeId,
        scratch: &mut DispatchScratch,
    ) {
        match self {
            Action::Accelerate(delta) => {
                if let Some((_, body)) = scene.aircraft_mut(node) {
                    body.accelerate(*delta);
                }
            }
            Action::Fire => {
                if let Some((aircraft, _)) = scene.aircraft_mut(node) {
                    aircraft.fire();
                }
            }
            Action::LaunchMissile => {
                if let Some((aircraft, _)) = scene.aircraft_mut(node) {
                    aircraft.launch_missile();
                }
            }
            Action::SpawnProjectiles(spawns) => {
                for spawn in spawns {
                    let projectile = world_setup::create_projectile(
                        scene,
                        spawn.kind,
                        spawn.position,
                        spawn.velocity,
                    );
                    scene.attach_child_at_world(node, projectile);
                }
            }
            Action::SpawnPickup { kind, position } => {
                let pickup = world_setup::create_pickup(scene, *kind, *position);
                scene.attach_child_at_world(node, pickup);
            }
            Action::PlaySound { effect, position } => {
                if scene.kind(node).is_some_and(|kind| matches!(*kind, NodeKind::Sound(_))) {
                    trace!(?effect, ?position, "sound requested");
                    scratch.audio_events.push(AudioEvent {
                        effect: *effect,
                        position: *position,
                    });
                }
            }
            Action::EmitParticles {
                kind,
                position,
                count,
            } => {
                if let Some(particles) = scene.particles_mut(node) {
                    if particles.kind() == *kind {
                        for _ in 0..*count {
                            particles.add_particle(*position);
                        }
                    }
                }
            }
            Action::DestroyOutside(bounds) => {
                if !bounds.intersects(&scene.bounding_rect(node)) {
                    scene.remove_entity(node);
                }
            }
            Action::CollectEnemyPositions => {
                if scene.is_aircraft(node) && !scene.is_destroyed(node) {
                    scratch.enemy_positions.push(scene.world_position(node));
                }
            }
            Action::GuideMissiles => {
                let position = scene.world_position(node);
                let Some(target) = guidance::nearest_target(position, &scratch.enemy_positions)
                else {
                    return;
                };
                if let Some((projectile, _)) = scene.projectile_mut(node) {
                    if projectile.is_guided() {
                        projectile.guide_towards(target, position);
                    }
                }
            }
        }
    }
}
