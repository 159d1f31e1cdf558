//! Aircraft: player, allied and enemy planes.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use skyfall_core::category::Category;
use skyfall_core::constants::*;
use skyfall_core::enums::{AircraftType, PickupType, ProjectileType, SoundEffect};
use skyfall_core::tables::AircraftData;
use skyfall_core::types::{IntRect, Rect, Transform};

use crate::command::{Action, Command, ProjectileSpawn};
use crate::nodes::animation::Animation;
use crate::nodes::entity::Body;
use crate::scene::{NodeId, UpdateContext};

/// Bullet spawn offsets per spread level, as fractions of the aircraft sprite size.
const SPREAD_PATTERNS: [&[(f32, f32)]; 3] = [
    &[(0.0, 0.5)],
    &[(-0.33, 0.33), (0.33, 0.33)],
    &[(-0.5, 0.33), (0.0, 0.5), (0.5, 0.33)],
];

const MISSILE_OFFSET: (f32, f32) = (0.0, 0.5);

/// Text shown under an aircraft after an update.
#[derive(Debug, Clone, PartialEq)]
pub struct HudText {
    pub health: Option<(NodeId, String)>,
    pub missiles: Option<(NodeId, String)>,
    /// Counter-rotation that keeps labels upright.
    pub rotation: f32,
}

#[derive(Debug, Clone)]
pub struct Aircraft {
    kind: AircraftType,
    texture_rect: IntRect,
    explosion: Animation,
    fire_countdown: f32,
    is_firing: bool,
    is_launching_missile: bool,
    show_explosion: bool,
    played_explosion_sound: bool,
    spawned_pickup: bool,
    fire_rate_level: u32,
    spread_level: u32,
    missile_ammo: u32,
    travelled_distance: f32,
    direction_index: usize,
    health_display: Option<NodeId>,
    missile_display: Option<NodeId>,
}

impl Aircraft {
    pub fn new(kind: AircraftType) -> Self {
        Self {
            kind,
            texture_rect: kind.data().texture_rect,
            explosion: Animation::explosion(),
            fire_countdown: 0.0,
            is_firing: false,
            is_launching_missile: false,
            show_explosion: true,
            played_explosion_sound: false,
            spawned_pickup: false,
            fire_rate_level: INITIAL_FIRE_RATE_LEVEL,
            spread_level: INITIAL_SPREAD_LEVEL,
            missile_ammo: INITIAL_MISSILE_AMMO,
            travelled_distance: 0.0,
            direction_index: 0,
            health_display: None,
            missile_display: None,
        }
    }

    pub fn kind(&self) -> AircraftType {
        self.kind
    }

    fn data(&self) -> &'static AircraftData {
        self.kind.data()
    }

    pub fn is_allied(&self) -> bool {
        self.kind.is_allied()
    }

    pub fn category(&self) -> Category {
        if self.is_allied() {
            Category::PLAYER_AIRCRAFT
        } else {
            Category::ENEMY_AIRCRAFT
        }
    }

    pub fn max_speed(&self) -> f32 {
        self.data().speed
    }

    pub fn fire_rate_level(&self) -> u32 {
        self.fire_rate_level
    }

    pub fn spread_level(&self) -> u32 {
        self.spread_level
    }

    pub fn missile_ammo(&self) -> u32 {
        self.missile_ammo
    }

    pub fn fire_countdown(&self) -> f32 {
        self.fire_countdown
    }

    pub fn is_firing(&self) -> bool {
        self.is_firing
    }

    /// Current sprite-sheet rectangle, including the roll frame.
    pub fn texture_rect(&self) -> IntRect {
        self.texture_rect
    }

    pub fn explosion(&self) -> &Animation {
        &self.explosion
    }

    pub fn shows_explosion(&self) -> bool {
        self.show_explosion
    }

    pub(crate) fn set_displays(&mut self, health: Option<NodeId>, missiles: Option<NodeId>) {
        self.health_display = health;
        self.missile_display = missiles;
    }

    pub fn local_bounds(&self) -> Rect {
        self.data().texture_rect.centered_bounds()
    }

    /// Guns only fire for aircraft with a non-zero fire interval.
    pub fn fire(&mut self) {
        if self.data().fire_interval != 0.0 {
            self.is_firing = true;
        }
    }

    pub fn launch_missile(&mut self) {
        if self.missile_ammo > 0 {
            self.is_launching_missile = true;
            self.missile_ammo -= 1;
        }
    }

    pub fn increase_fire_rate(&mut self) {
        if self.fire_rate_level < MAX_FIRE_RATE_LEVEL {
            self.fire_rate_level += 1;
        }
    }

    pub fn increase_spread(&mut self) {
        if self.spread_level < MAX_SPREAD_LEVEL {
            self.spread_level += 1;
        }
    }

    pub fn collect_missiles(&mut self, count: u32) {
        self.missile_ammo += count;
    }

    /// Destroy without an explosion; the wreck is pruned on the next sweep.
    pub fn remove(&mut self, body: &mut Body) {
        body.destroy();
        self.show_explosion = false;
    }

    pub fn is_marked_for_removal(&self, body: &Body) -> bool {
        body.is_destroyed() && (self.explosion.is_finished() || !self.show_explosion)
    }

    pub(crate) fn update(
        &mut self,
        body: &mut Body,
        transform: &mut Transform,
        world_position: Vec2,
        dt: f32,
        ctx: &mut UpdateContext<'_>,
    ) {
        self.update_roll_animation(body.velocity);

        if body.is_destroyed() {
            self.check_pickup_drop(world_position, ctx);
            self.explosion.update(dt);
            if !self.played_explosion_sound {
                let effect = if ctx.rng.gen_bool(0.5) {
                    SoundEffect::Explosion1
                } else {
                    SoundEffect::Explosion2
                };
                ctx.commands.push(Command::play_sound(effect, world_position));
                self.played_explosion_sound = true;
            }
            return;
        }

        self.check_projectile_launch(world_position, dt, ctx);
        self.update_movement_pattern(body, dt);
        transform.translate(body.displacement(dt));
    }

    fn update_roll_animation(&mut self, velocity: Vec2) {
        let data = self.data();
        if !data.has_roll_animation {
            return;
        }
        let mut rect = data.texture_rect;
        if velocity.x < 0.0 {
            rect.left += rect.width;
        } else if velocity.x > 0.0 {
            rect.left += 2 * rect.width;
        }
        self.texture_rect = rect;
    }

    fn check_pickup_drop(&mut self, world_position: Vec2, ctx: &mut UpdateContext<'_>) {
        if !self.is_allied() && !self.spawned_pickup && ctx.rng.gen_range(0..PICKUP_DROP_ODDS) == 0 {
            let kind = *PickupType::ALL
                .choose(&mut *ctx.rng)
                .unwrap_or(&PickupType::HealthRefill);
            debug!(?kind, ?world_position, "pickup dropped");
            ctx.commands.push(Command::new(
                Category::SCENE_AIR_LAYER,
                Action::SpawnPickup {
                    kind,
                    position: world_position,
                },
            ));
        }
        self.spawned_pickup = true;
    }

    fn check_projectile_launch(&mut self, world_position: Vec2, dt: f32, ctx: &mut UpdateContext<'_>) {
        if !self.is_allied() {
            self.fire();
        }

        if self.is_firing && self.fire_countdown <= 0.0 {
            ctx.commands.push(Command::new(
                Category::SCENE_AIR_LAYER,
                Action::SpawnProjectiles(self.bullet_spawns(world_position)),
            ));
            let effect = if self.is_allied() {
                SoundEffect::AlliedGunfire
            } else {
                SoundEffect::EnemyGunfire
            };
            ctx.commands.push(Command::play_sound(effect, world_position));
            self.fire_countdown = self.data().fire_interval / (self.fire_rate_level as f32 + 1.0);
            self.is_firing = false;
        } else if self.fire_countdown > 0.0 {
            self.fire_countdown -= dt;
            self.is_firing = false;
        }

        if self.is_launching_missile {
            let missile = self.projectile_spawn(ProjectileType::Missile, MISSILE_OFFSET, world_position);
            ctx.commands.push(Command::new(
                Category::SCENE_AIR_LAYER,
                Action::SpawnProjectiles(vec![missile]),
            ));
            ctx.commands.push(Command::play_sound(SoundEffect::LaunchMissile, world_position));
            self.is_launching_missile = false;
        }
    }

    /// Projectiles for one trigger pull at the current spread level.
    pub fn bullet_spawns(&self, world_position: Vec2) -> Vec<ProjectileSpawn> {
        let kind = if self.is_allied() {
            ProjectileType::AlliedBullet
        } else {
            ProjectileType::EnemyBullet
        };
        let level = self.spread_level.clamp(1, MAX_SPREAD_LEVEL) as usize;
        SPREAD_PATTERNS[level - 1]
            .iter()
            .map(|&offset| self.projectile_spawn(kind, offset, world_position))
            .collect()
    }

    fn projectile_spawn(&self, kind: ProjectileType, offset: (f32, f32), world_position: Vec2) -> ProjectileSpawn {
        let sprite = self.data().texture_rect.size();
        let offset = Vec2::new(offset.0 * sprite.x, offset.1 * sprite.y);
        let sign = if self.is_allied() { -1.0 } else { 1.0 };
        ProjectileSpawn {
            kind,
            position: world_position + offset * sign,
            velocity: Vec2::new(0.0, kind.data().speed) * sign,
        }
    }

    fn update_movement_pattern(&mut self, body: &mut Body, dt: f32) {
        let directions = self.data().directions;
        if directions.is_empty() {
            return;
        }
        if self.travelled_distance > directions[self.direction_index].distance {
            self.direction_index = (self.direction_index + 1) % directions.len();
            self.travelled_distance = 0.0;
        }

        let radians = (directions[self.direction_index].angle + 90.0).to_radians();
        let speed = self.max_speed();
        body.velocity = Vec2::new(speed * radians.cos(), speed * radians.sin());
        self.travelled_distance += speed * dt;
    }

    /// Label text reflecting the post-update state.
    pub(crate) fn hud(&self, body: &Body, rotation: f32) -> HudText {
        let health = self.health_display.map(|id| {
            let text = if body.is_destroyed() {
                String::new()
            } else {
                format!("{} HP", body.hitpoints())
            };
            (id, text)
        });
        let missiles = self.missile_display.map(|id| {
            let text = if body.is_destroyed() || self.missile_ammo == 0 {
                String::new()
            } else {
                format!("M: {}", self.missile_ammo)
            };
            (id, text)
        });
        HudText {
            health,
            missiles,
            rotation: -rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::command::CommandQueue;

    #[test]
    fn test_category_follows_allegiance() {
        assert_eq!(Aircraft::new(AircraftType::Eagle).category(), Category::PLAYER_AIRCRAFT);
        assert_eq!(Aircraft::new(AircraftType::Raptor).category(), Category::ENEMY_AIRCRAFT);
        assert_eq!(Aircraft::new(AircraftType::Avenger).category(), Category::ENEMY_AIRCRAFT);
    }

    #[test]
    fn test_raptor_never_fires() {
        let mut raptor = Aircraft::new(AircraftType::Raptor);
        raptor.fire();
        assert!(!raptor.is_firing(), "zero fire interval means no guns");
    }

    #[test]
    fn test_missile_ammo_never_negative() {
        let mut eagle = Aircraft::new(AircraftType::Eagle);
        for _ in 0..5 {
            eagle.launch_missile();
        }
        assert_eq!(eagle.missile_ammo(), 0);
    }

    #[test]
    fn test_upgrades_capped() {
        let mut eagle = Aircraft::new(AircraftType::Eagle);
        for _ in 0..20 {
            eagle.increase_spread();
            eagle.increase_fire_rate();
        }
        assert_eq!(eagle.spread_level(), MAX_SPREAD_LEVEL);
        assert_eq!(eagle.fire_rate_level(), MAX_FIRE_RATE_LEVEL);
    }

    #[test]
    fn test_fire_cooldown_shrinks_with_each_level() {
        let mut eagle = Aircraft::new(AircraftType::Eagle);
        let mut queue = CommandQueue::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = UpdateContext {
            commands: &mut queue,
            rng: &mut rng,
        };

        let mut previous = f32::INFINITY;
        for level in INITIAL_FIRE_RATE_LEVEL..=MAX_FIRE_RATE_LEVEL {
            assert_eq!(eagle.fire_rate_level(), level);
            eagle.fire_countdown = 0.0;
            eagle.fire();
            eagle.check_projectile_launch(Vec2::ZERO, DT, &mut ctx);

            let cooldown = eagle.fire_countdown();
            assert!(cooldown > 0.0, "a shot was fired at level {level}");
            assert!(cooldown < previous, "level {level}: {cooldown} should be below {previous}");
            previous = cooldown;
            eagle.increase_fire_rate();
        }
        assert!((previous - 1.0 / 11.0).abs() < 1e-5);
    }

    #[test]
    fn test_single_shot_spawns_ahead_of_player() {
        let eagle = Aircraft::new(AircraftType::Eagle);
        let spawns = eagle.bullet_spawns(Vec2::new(100.0, 500.0));
        assert_eq!(spawns.len(), 1);
        // Eagle sprite is 48x64; allied bullets go up, so the offset is mirrored.
        assert_eq!(spawns[0].position, Vec2::new(100.0, 468.0));
        assert_eq!(spawns[0].velocity, Vec2::new(0.0, -300.0));
        assert_eq!(spawns[0].kind, ProjectileType::AlliedBullet);
    }

    #[test]
    fn test_triple_spread_pattern() {
        let mut eagle = Aircraft::new(AircraftType::Eagle);
        eagle.increase_spread();
        eagle.increase_spread();
        let spawns = eagle.bullet_spawns(Vec2::ZERO);
        assert_eq!(spawns.len(), 3);
        assert!((spawns[0].position.x - 24.0).abs() < 1e-4, "left bullet mirrored to +x");
        assert!((spawns[2].position.x + 24.0).abs() < 1e-4, "right bullet mirrored to -x");
        assert!((spawns[1].position.y + 32.0).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_bullets_travel_down() {
        let avenger = Aircraft::new(AircraftType::Avenger);
        let spawns = avenger.bullet_spawns(Vec2::new(0.0, 0.0));
        assert_eq!(spawns[0].kind, ProjectileType::EnemyBullet);
        assert!(spawns[0].velocity.y > 0.0);
    }

    #[test]
    fn test_roll_frames() {
        let mut eagle = Aircraft::new(AircraftType::Eagle);
        eagle.update_roll_animation(Vec2::new(-10.0, 0.0));
        assert_eq!(eagle.texture_rect().left, 48);
        eagle.update_roll_animation(Vec2::new(10.0, 0.0));
        assert_eq!(eagle.texture_rect().left, 96);
        eagle.update_roll_animation(Vec2::ZERO);
        assert_eq!(eagle.texture_rect().left, 0);
    }

    #[test]
    fn test_movement_pattern_advances_legs() {
        let mut raptor = Aircraft::new(AircraftType::Raptor);
        let mut body = Body::new(20);
        raptor.update_movement_pattern(&mut body, 0.5);
        // First leg: 45 degrees off the downward axis.
        let expected = (135.0f32).to_radians();
        assert!((body.velocity.x - 80.0 * expected.cos()).abs() < 1e-3);
        assert!((body.velocity.y - 80.0 * expected.sin()).abs() < 1e-3);

        // 80 units per second; the first leg is 80 long and must be exceeded.
        for _ in 0..3 {
            raptor.update_movement_pattern(&mut body, 0.5);
        }
        assert_eq!(raptor.direction_index, 1, "should move to the second leg");
    }

    #[test]
    fn test_removed_aircraft_marked_immediately() {
        let mut raptor = Aircraft::new(AircraftType::Raptor);
        let mut body = Body::new(20);
        raptor.remove(&mut body);
        assert!(raptor.is_marked_for_removal(&body), "removal skips the explosion");
    }

    #[test]
    fn test_destroyed_aircraft_waits_for_explosion() {
        let raptor = Aircraft::new(AircraftType::Raptor);
        let mut body = Body::new(20);
        body.destroy();
        assert!(!raptor.is_marked_for_removal(&body));
    }
}
