//! Static per-type data tables.
//!
//! Each table is an array indexed by its type enum and built at compile
//! time, so there is no initialization order to get wrong.

use serde::Serialize;

use crate::enums::*;
use crate::types::{Color, IntRect};

/// One leg of a scripted flight path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Direction {
    /// Heading relative to straight down, in degrees.
    pub angle: f32,
    /// Distance flown before switching to the next leg.
    pub distance: f32,
}

impl Direction {
    pub const fn new(angle: f32, distance: f32) -> Self {
        Self { angle, distance }
    }
}

/// Static description of an aircraft archetype.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AircraftData {
    pub hitpoints: i32,
    pub speed: f32,
    pub texture: TextureId,
    pub texture_rect: IntRect,
    /// Seconds between shots at fire-rate level 0. Zero means the type never fires.
    pub fire_interval: f32,
    /// Looping flight path. Empty for externally steered aircraft.
    pub directions: &'static [Direction],
    pub has_roll_animation: bool,
}

static AIRCRAFT_TABLE: [AircraftData; 3] = [
    AircraftData {
        hitpoints: 100,
        speed: 200.0,
        texture: TextureId::Entities,
        texture_rect: IntRect::new(0, 0, 48, 64),
        fire_interval: 1.0,
        directions: &[],
        has_roll_animation: true,
    },
    AircraftData {
        hitpoints: 20,
        speed: 80.0,
        texture: TextureId::Entities,
        texture_rect: IntRect::new(144, 0, 84, 64),
        fire_interval: 0.0,
        directions: &[
            Direction::new(45.0, 80.0),
            Direction::new(-45.0, 160.0),
            Direction::new(45.0, 80.0),
        ],
        has_roll_animation: false,
    },
    AircraftData {
        hitpoints: 40,
        speed: 50.0,
        texture: TextureId::Entities,
        texture_rect: IntRect::new(228, 0, 60, 59),
        fire_interval: 2.0,
        directions: &[
            Direction::new(45.0, 50.0),
            Direction::new(0.0, 50.0),
            Direction::new(-45.0, 100.0),
            Direction::new(0.0, 50.0),
            Direction::new(45.0, 50.0),
        ],
        has_roll_animation: false,
    },
];

impl AircraftType {
    pub fn data(self) -> &'static AircraftData {
        &AIRCRAFT_TABLE[self as usize]
    }

    /// Whether this archetype flies for the player.
    pub fn is_allied(self) -> bool {
        matches!(self, AircraftType::Eagle)
    }
}

/// Static description of a projectile kind.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProjectileData {
    pub damage: i32,
    pub speed: f32,
    pub texture: TextureId,
    pub texture_rect: IntRect,
}

static PROJECTILE_TABLE: [ProjectileData; 3] = [
    ProjectileData {
        damage: 10,
        speed: 300.0,
        texture: TextureId::Entities,
        texture_rect: IntRect::new(175, 64, 3, 14),
    },
    ProjectileData {
        damage: 10,
        speed: 300.0,
        texture: TextureId::Entities,
        texture_rect: IntRect::new(175, 64, 3, 14),
    },
    ProjectileData {
        damage: 200,
        speed: 150.0,
        texture: TextureId::Entities,
        texture_rect: IntRect::new(160, 64, 15, 32),
    },
];

impl ProjectileType {
    pub fn data(self) -> &'static ProjectileData {
        &PROJECTILE_TABLE[self as usize]
    }

    pub fn is_guided(self) -> bool {
        matches!(self, ProjectileType::Missile)
    }

    pub fn is_enemy(self) -> bool {
        matches!(self, ProjectileType::EnemyBullet)
    }
}

/// Effect a pickup has on the aircraft that collects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PickupEffect {
    /// Restore this many hit points.
    Repair(i32),
    /// Add this many missiles.
    CollectMissiles(u32),
    /// Raise the spread level by one, up to the cap.
    IncreaseSpread,
    /// Raise the fire-rate level by one, up to the cap.
    IncreaseFireRate,
}

/// Static description of a pickup kind.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PickupData {
    pub effect: PickupEffect,
    pub texture: TextureId,
    pub texture_rect: IntRect,
}

static PICKUP_TABLE: [PickupData; 4] = [
    PickupData {
        effect: PickupEffect::Repair(25),
        texture: TextureId::Entities,
        texture_rect: IntRect::new(0, 64, 40, 40),
    },
    PickupData {
        effect: PickupEffect::CollectMissiles(3),
        texture: TextureId::Entities,
        texture_rect: IntRect::new(40, 64, 40, 40),
    },
    PickupData {
        effect: PickupEffect::IncreaseSpread,
        texture: TextureId::Entities,
        texture_rect: IntRect::new(80, 64, 40, 40),
    },
    PickupData {
        effect: PickupEffect::IncreaseFireRate,
        texture: TextureId::Entities,
        texture_rect: IntRect::new(120, 64, 40, 40),
    },
];

impl PickupType {
    pub fn data(self) -> &'static PickupData {
        &PICKUP_TABLE[self as usize]
    }
}

/// Static description of a particle flavour.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParticleData {
    pub color: Color,
    /// Seconds a particle stays alive.
    pub lifetime: f32,
}

static PARTICLE_TABLE: [ParticleData; 2] = [
    ParticleData {
        color: Color::rgb(255, 255, 50),
        lifetime: 0.6,
    },
    ParticleData {
        color: Color::rgb(50, 50, 50),
        lifetime: 4.0,
    },
];

impl ParticleType {
    pub fn data(self) -> &'static ParticleData {
        &PARTICLE_TABLE[self as usize]
    }
}
