#[cfg(test)]
mod tests {
    use glam::{Affine2, Vec2};

    use crate::category::Category;
    use crate::constants::*;
    use crate::enums::*;
    use crate::state::{Drawable, FrameSnapshot};
    use crate::tables::PickupEffect;
    use crate::types::{IntRect, Rect, SimTime, TextureHandle, Transform};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    // ---- Rect ----

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let overlap = a.intersection(&b).expect("rects overlap");
        assert_eq!(overlap, Rect::new(5.0, 5.0, 5.0, 5.0));
        assert!(b.intersects(&a), "intersection must be symmetric");
    }

    #[test]
    fn test_rect_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b), "shared edge is not an overlap");
    }

    #[test]
    fn test_empty_rect_never_intersects() {
        let empty = Rect::default();
        let big = Rect::new(-100.0, -100.0, 200.0, 200.0);
        assert!(!empty.intersects(&big));
        assert!(!big.intersects(&empty));
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(r.contains(Vec2::new(9.9, 9.9)));
        assert!(!r.contains(Vec2::new(10.0, 5.0)));
        assert!(!r.contains(Vec2::new(5.0, -0.1)));
    }

    #[test]
    fn test_rect_negative_size_is_normalized() {
        let r = Rect::new(10.0, 10.0, -10.0, -10.0);
        assert!(r.contains(Vec2::new(5.0, 5.0)));
        assert!(r.intersects(&Rect::new(4.0, 4.0, 2.0, 2.0)));
    }

    #[test]
    fn test_rect_transformed_by_quarter_turn() {
        let r = IntRect::new(0, 0, 40, 20).centered_bounds();
        let t = Transform {
            position: Vec2::new(100.0, 50.0),
            rotation: 90.0,
            scale: Vec2::ONE,
        };
        let bounds = r.transformed(&t.matrix());
        assert!(approx(bounds.width, 20.0), "width {}", bounds.width);
        assert!(approx(bounds.height, 40.0), "height {}", bounds.height);
        assert!(approx(bounds.left, 90.0));
        assert!(approx(bounds.top, 30.0));
    }

    // ---- Transform ----

    #[test]
    fn test_transform_applies_scale_then_rotation_then_translation() {
        let t = Transform {
            position: Vec2::new(10.0, 0.0),
            rotation: 90.0,
            scale: Vec2::splat(2.0),
        };
        let p = t.matrix().transform_point2(Vec2::new(1.0, 0.0));
        assert!(approx(p.x, 10.0), "x {}", p.x);
        assert!(approx(p.y, 2.0), "y {}", p.y);
    }

    #[test]
    fn test_default_transform_is_identity() {
        assert_eq!(Transform::default().matrix(), Affine2::IDENTITY);
    }

    // ---- Category ----

    #[test]
    fn test_category_matching() {
        let target = Category::PROJECTILE | Category::ENEMY_AIRCRAFT;
        assert!(target.matches(Category::ALLIED_PROJECTILE));
        assert!(target.matches(Category::ENEMY_AIRCRAFT));
        assert!(!target.matches(Category::PLAYER_AIRCRAFT));
        assert!(!target.matches(Category::NONE));
        assert!(!Category::NONE.matches(Category::SCENE_AIR_LAYER));
    }

    // ---- Tables ----

    #[test]
    fn test_aircraft_table() {
        assert!(AircraftType::Eagle.is_allied());
        assert!(!AircraftType::Raptor.is_allied());
        assert_eq!(AircraftType::Eagle.data().hitpoints, 100);
        assert_eq!(AircraftType::Raptor.data().fire_interval, 0.0);
        assert_eq!(AircraftType::Avenger.data().directions.len(), 5);
        assert!(AircraftType::Eagle.data().directions.is_empty());
        for kind in AircraftType::ALL {
            assert!(kind.data().hitpoints > 0, "{kind:?} must start alive");
        }
    }

    #[test]
    fn test_projectile_table() {
        assert!(ProjectileType::Missile.is_guided());
        assert!(!ProjectileType::AlliedBullet.is_guided());
        assert!(ProjectileType::EnemyBullet.is_enemy());
        assert_eq!(ProjectileType::Missile.data().damage, 200);
        assert_eq!(ProjectileType::AlliedBullet.data().speed, 300.0);
    }

    #[test]
    fn test_pickup_table_effects() {
        assert_eq!(
            PickupType::HealthRefill.data().effect,
            PickupEffect::Repair(25)
        );
        assert_eq!(
            PickupType::MissileRefill.data().effect,
            PickupEffect::CollectMissiles(3)
        );
        assert_eq!(
            PickupType::FireSpread.data().effect,
            PickupEffect::IncreaseSpread
        );
        assert_eq!(
            PickupType::FireRate.data().effect,
            PickupEffect::IncreaseFireRate
        );
    }

    #[test]
    fn test_particle_lifetimes() {
        assert_eq!(ParticleType::Propellant.data().lifetime, 0.6);
        assert_eq!(ParticleType::Smoke.data().lifetime, 4.0);
    }

    // ---- Time ----

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        for _ in 0..TICK_RATE {
            t.advance(DT);
        }
        assert_eq!(t.tick, TICK_RATE as u64);
        assert!((t.elapsed_secs - 1.0).abs() < 1e-5);
    }

    // ---- Snapshot ----

    #[test]
    fn test_snapshot_serde() {
        let snapshot = FrameSnapshot {
            time: SimTime::default(),
            view: Rect::new(0.0, 1232.0, VIEW_WIDTH, VIEW_HEIGHT),
            drawables: vec![Drawable::Sprite {
                texture: TextureHandle(3),
                texture_rect: IntRect::new(0, 0, 48, 64),
                origin: Vec2::new(24.0, 32.0),
                transform: Affine2::from_translation(Vec2::new(512.0, 1616.0)),
            }],
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"type\":\"Sprite\""));
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.drawables, snapshot.drawables);
        assert_eq!(back.view, snapshot.view);
    }
}
