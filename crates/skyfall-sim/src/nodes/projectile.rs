use glam::Vec2;

use skyfall_core::category::Category;
use skyfall_core::enums::ProjectileType;
use skyfall_core::types::{unit_vector, Rect, Transform};

use crate::nodes::entity::Body;
use crate::systems::guidance;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    kind: ProjectileType,
    target_direction: Vec2,
}

impl Projectile {
    pub fn new(kind: ProjectileType) -> Self {
        Self {
            kind,
            target_direction: Vec2::ZERO,
        }
    }

    pub fn kind(&self) -> ProjectileType {
        self.kind
    }

    pub fn is_guided(&self) -> bool {
        self.kind.is_guided()
    }

    pub fn category(&self) -> Category {
        if self.kind.is_enemy() {
            Category::ENEMY_PROJECTILE
        } else {
            Category::ALLIED_PROJECTILE
        }
    }

    pub fn damage(&self) -> i32 {
        self.kind.data().damage
    }

    pub fn max_speed(&self) -> f32 {
        self.kind.data().speed
    }

    pub fn target_direction(&self) -> Vec2 {
        self.target_direction
    }

    pub fn local_bounds(&self) -> Rect {
        self.kind.data().texture_rect.centered_bounds()
    }

    /// Steer toward `target`. Only homing projectiles may be guided.
    pub fn guide_towards(&mut self, target: Vec2, own_position: Vec2) {
        assert!(self.is_guided(), "{:?} cannot be guided", self.kind);
        self.target_direction = unit_vector(target - own_position);
    }

    pub(crate) fn update(&mut self, body: &mut Body, transform: &mut Transform, dt: f32) {
        if self.is_guided() {
            body.velocity = guidance::steer(body.velocity, self.target_direction, self.max_speed(), dt);
            transform.rotation = guidance::heading_degrees(body.velocity);
        }
        transform.translate(body.displacement(dt));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_flies_straight() {
        let mut bullet = Projectile::new(ProjectileType::AlliedBullet);
        let mut body = Body::new(1).with_velocity(Vec2::new(0.0, -300.0));
        let mut transform = Transform::at(Vec2::new(50.0, 500.0));
        bullet.update(&mut body, &mut transform, 0.1);
        assert_eq!(body.velocity, Vec2::new(0.0, -300.0));
        assert!((transform.position.y - 470.0).abs() < 1e-3);
        assert_eq!(transform.rotation, 0.0, "unguided projectiles keep their rotation");
    }

    #[test]
    fn test_unguided_missile_keeps_heading() {
        let mut missile = Projectile::new(ProjectileType::Missile);
        let mut body = Body::new(1).with_velocity(Vec2::new(0.0, -150.0));
        let mut transform = Transform::default();
        missile.update(&mut body, &mut transform, 1.0 / 60.0);
        assert!((body.velocity - Vec2::new(0.0, -150.0)).length() < 1e-3);
        assert!(transform.rotation.abs() < 1e-3, "upward flight means zero rotation");
    }

    #[test]
    fn test_guided_missile_turns_toward_target() {
        let mut missile = Projectile::new(ProjectileType::Missile);
        missile.guide_towards(Vec2::new(100.0, 0.0), Vec2::ZERO);
        assert_eq!(missile.target_direction(), Vec2::X);

        let mut body = Body::new(1).with_velocity(Vec2::new(0.0, -150.0));
        let mut transform = Transform::default();
        missile.update(&mut body, &mut transform, 1.0 / 60.0);
        assert!(body.velocity.x > 0.0, "velocity should bend toward +x");
        assert!((body.velocity.length() - 150.0).abs() < 1e-2, "speed stays at max speed");
    }

    #[test]
    #[should_panic(expected = "cannot be guided")]
    fn test_guiding_bullet_panics() {
        Projectile::new(ProjectileType::EnemyBullet).guide_towards(Vec2::ONE, Vec2::ZERO);
    }

    #[test]
    fn test_categories() {
        assert_eq!(Projectile::new(ProjectileType::EnemyBullet).category(), Category::ENEMY_PROJECTILE);
        assert_eq!(Projectile::new(ProjectileType::Missile).category(), Category::ALLIED_PROJECTILE);
    }
}
