use tracing::debug;

use skyfall_core::category::Category;
use skyfall_core::enums::SoundEffect;

use crate::command::{Command, CommandQueue};
use crate::scene::{NodeId, SceneGraph};

/// Tally of collisions resolved in one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    pub rammed: u32,
    pub pickups_collected: u32,
    pub projectile_hits: u32,
}

/// Order `pair` so the first node falls in `first` and the second in `second`.
fn match_categories(
    scene: &SceneGraph,
    (a, b): (NodeId, NodeId),
    first: Category,
    second: Category,
) -> Option<(NodeId, NodeId)> {
    let (category_a, category_b) = (scene.category(a), scene.category(b));
    if first.matches(category_a) && second.matches(category_b) {
        Some((a, b))
    } else if first.matches(category_b) && second.matches(category_a) {
        Some((b, a))
    } else {
        None
    }
}

/// Detect overlapping pairs and apply their gameplay effects.
///
/// A pair is skipped when either side was destroyed earlier in the same
/// resolution pass.
pub fn run(scene: &mut SceneGraph, commands: &mut CommandQueue) -> CollisionResult {
    let mut result = CollisionResult::default();

    for pair in scene.collision_pairs().into_sorted() {
        if scene.is_destroyed(pair.0) || scene.is_destroyed(pair.1) {
            continue;
        }

        if let Some((player, enemy)) =
            match_categories(scene, pair, Category::PLAYER_AIRCRAFT, Category::ENEMY_AIRCRAFT)
        {
            let enemy_hitpoints = scene.body(enemy).map_or(0, |body| body.hitpoints());
            if let Some(mut body) = scene.body_mut(player) {
                body.damage(enemy_hitpoints);
            }
            if let Some(mut body) = scene.body_mut(enemy) {
                body.destroy();
            }
            result.rammed += 1;
        } else if let Some((player, pickup)) =
            match_categories(scene, pair, Category::PLAYER_AIRCRAFT, Category::PICKUP)
        {
            if let Some(kind) = scene.pickup(pickup) {
                if let Some((aircraft, body)) = scene.aircraft_mut(player) {
                    kind.apply(aircraft, body);
                }
                debug!(pickup = ?kind.kind(), "pickup collected");
            }
            if let Some(mut body) = scene.body_mut(pickup) {
                body.destroy();
            }
            commands.push(Command::play_sound(
                SoundEffect::CollectPickup,
                scene.world_position(player),
            ));
            result.pickups_collected += 1;
        } else if let Some((aircraft, projectile)) =
            match_categories(scene, pair, Category::ENEMY_AIRCRAFT, Category::ALLIED_PROJECTILE)
                .or_else(|| {
                    match_categories(scene, pair, Category::PLAYER_AIRCRAFT, Category::ENEMY_PROJECTILE)
                })
        {
            let damage = scene.projectile(projectile).map_or(0, |p| p.damage());
            if damage > 0 {
                if let Some(mut body) = scene.body_mut(aircraft) {
                    body.damage(damage);
                }
            }
            if let Some(mut body) = scene.body_mut(projectile) {
                body.destroy();
            }
            result.projectile_hits += 1;
        }
    }

    result
}
