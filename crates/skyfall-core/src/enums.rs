//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Aircraft archetype. Drives the per-type data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftType {
    /// Player-flown fighter.
    Eagle,
    /// Fast enemy interceptor with a zig-zag pattern. Does not shoot.
    Raptor,
    /// Slow, armoured enemy gunship.
    Avenger,
}

impl AircraftType {
    pub const ALL: [AircraftType; 3] = [Self::Eagle, Self::Raptor, Self::Avenger];
}

/// Projectile kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileType {
    AlliedBullet,
    EnemyBullet,
    /// Homing missile fired by the player.
    Missile,
}

/// Pickup kind dropped by destroyed enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupType {
    HealthRefill,
    MissileRefill,
    FireSpread,
    FireRate,
}

impl PickupType {
    pub const ALL: [PickupType; 4] = [
        Self::HealthRefill,
        Self::MissileRefill,
        Self::FireSpread,
        Self::FireRate,
    ];
}

/// Particle flavour emitted by missile trails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleType {
    Propellant,
    Smoke,
}

/// Sound effects the simulation can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    AlliedGunfire,
    EnemyGunfire,
    Explosion1,
    Explosion2,
    LaunchMissile,
    CollectPickup,
}

/// Logical texture ids resolved by the resource collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureId {
    /// Sprite sheet with aircraft, projectiles and pickups.
    Entities,
    /// Tiled background.
    Desert,
    Explosion,
    Particle,
}

impl TextureId {
    pub const ALL: [TextureId; 4] = [Self::Entities, Self::Desert, Self::Explosion, Self::Particle];
}

/// Logical font ids resolved by the resource collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontId {
    Main,
}

impl FontId {
    pub const ALL: [FontId; 1] = [Self::Main];
}

/// Top-level scene layers, drawn in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Background,
    /// Particle systems, drawn below aircraft.
    LowerAir,
    /// Aircraft, projectiles and pickups.
    UpperAir,
}

impl Layer {
    pub const COUNT: usize = 3;
    pub const ALL: [Layer; Self::COUNT] = [Self::Background, Self::LowerAir, Self::UpperAir];
}
