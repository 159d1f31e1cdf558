//! Homing-missile guidance: target selection and steering.

use glam::Vec2;

use skyfall_core::constants::MISSILE_APPROACH_RATE;
use skyfall_core::types::unit_vector;

/// Closest of `targets` to `from`, if any.
pub fn nearest_target(from: Vec2, targets: &[Vec2]) -> Option<Vec2> {
    targets
        .iter()
        .copied()
        .min_by(|a, b| from.distance_squared(*a).total_cmp(&from.distance_squared(*b)))
}

/// Blend the current velocity toward `target_direction`, keeping `max_speed`.
pub fn steer(velocity: Vec2, target_direction: Vec2, max_speed: f32, dt: f32) -> Vec2 {
    unit_vector(MISSILE_APPROACH_RATE * dt * target_direction + velocity) * max_speed
}

/// Sprite rotation (degrees) for a nose-up sprite flying along `velocity`.
pub fn heading_degrees(velocity: Vec2) -> f32 {
    velocity.y.atan2(velocity.x).to_degrees() + 90.0
}
