use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Velocity and hit points shared by every gameplay entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub velocity: Vec2,
    hitpoints: i32,
}

impl Body {
    pub fn new(hitpoints: i32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            hitpoints,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn hitpoints(&self) -> i32 {
        self.hitpoints
    }

    pub fn accelerate(&mut self, delta: Vec2) {
        self.velocity += delta;
    }

    /// Panics when `points` is not positive.
    pub fn repair(&mut self, points: i32) {
        assert!(points > 0, "repair amount must be positive, got {points}");
        self.hitpoints += points;
    }

    /// Panics when `points` is not positive.
    pub fn damage(&mut self, points: i32) {
        assert!(points > 0, "damage amount must be positive, got {points}");
        self.hitpoints -= points;
    }

    pub fn destroy(&mut self) {
        self.hitpoints = 0;
    }

    pub fn is_destroyed(&self) -> bool {
        self.hitpoints <= 0
    }

    /// Displacement over `dt` at the current velocity.
    pub fn displacement(&self, dt: f32) -> Vec2 {
        self.velocity * dt
    }
}
