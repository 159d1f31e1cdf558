//! Simulation constants and tuning parameters.
//!
//! Balance numbers are kept at their shipped values.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- World layout ---

/// Default view width in world units.
pub const VIEW_WIDTH: f32 = 1024.0;

/// Default view height in world units.
pub const VIEW_HEIGHT: f32 = 768.0;

/// Height of the scrolling world.
pub const WORLD_HEIGHT: f32 = 2000.0;

/// Vertical view scroll speed (units/s). Negative scrolls toward the top of the world.
pub const SCROLL_SPEED: f32 = -50.0;

/// Extra distance above the view that still counts as battlefield.
pub const BATTLEFIELD_MARGIN: f32 = 100.0;

/// Minimum distance the player keeps from the view edges.
pub const BORDER_DISTANCE: f32 = 40.0;

// --- Player ---

/// Speed applied per movement input (units/s).
pub const PLAYER_SPEED: f32 = 200.0;

// --- Aircraft ---

pub const INITIAL_FIRE_RATE_LEVEL: u32 = 1;
pub const MAX_FIRE_RATE_LEVEL: u32 = 10;

pub const INITIAL_SPREAD_LEVEL: u32 = 1;
pub const MAX_SPREAD_LEVEL: u32 = 3;

pub const INITIAL_MISSILE_AMMO: u32 = 2;

/// A destroyed enemy drops a pickup with probability 1 / PICKUP_DROP_ODDS.
pub const PICKUP_DROP_ODDS: u32 = 3;

/// HUD health label offset below the aircraft.
pub const HEALTH_DISPLAY_OFFSET: f32 = 50.0;

/// HUD missile label offset below the player aircraft.
pub const MISSILE_DISPLAY_OFFSET: f32 = 70.0;

// --- Explosion animation ---

pub const EXPLOSION_FRAME_SIZE: i32 = 256;
pub const EXPLOSION_FRAME_COUNT: u32 = 16;
/// Frames per row of the explosion sheet.
pub const EXPLOSION_SHEET_COLUMNS: u32 = 4;
pub const EXPLOSION_DURATION_SECS: f32 = 1.0;

// --- Projectiles ---

/// Homing blend rate toward the target direction (per second).
pub const MISSILE_APPROACH_RATE: f32 = 200.0;

// --- Pickups ---

pub const PICKUP_HITPOINTS: i32 = 1;

/// Downward drift of a freshly dropped pickup (units/s).
pub const PICKUP_DRIFT_SPEED: f32 = 1.0;

// --- Particles ---

/// Particles emitted per second by a trail emitter.
pub const EMISSION_RATE: f32 = 30.0;

// --- Text ---

pub const TEXT_CHARACTER_SIZE: u32 = 20;
