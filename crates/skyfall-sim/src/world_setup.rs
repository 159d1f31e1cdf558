//! Node factories and initial scene construction.

use glam::Vec2;

use skyfall_core::category::Category;
use skyfall_core::constants::*;
use skyfall_core::enums::{AircraftType, FontId, Layer, ParticleType, PickupType, ProjectileType, TextureId};
use skyfall_core::types::{IntRect, Rect, Transform};

use crate::nodes::{
    Aircraft, Body, EmitterNode, NodeKind, ParticleNode, Pickup, Projectile, SoundNode, SpriteNode, TextNode,
};
use crate::scene::{Detached, NodeId, SceneGraph};

/// Handles to the fixed parts of a freshly built scene.
#[derive(Debug, Clone, Copy)]
pub struct SceneLayout {
    pub layers: [NodeId; Layer::COUNT],
    pub player: NodeId,
}

/// Build layers, background, particle systems, sound node and the player.
pub fn build_scene(scene: &mut SceneGraph, world_bounds: Rect, spawn_position: Vec2) -> SceneLayout {
    let root = scene.root();
    let layers = Layer::ALL.map(|layer| {
        let category = match layer {
            Layer::UpperAir => Category::SCENE_AIR_LAYER,
            Layer::Background | Layer::LowerAir => Category::NONE,
        };
        let node = scene.create(NodeKind::Group(category), Transform::default());
        scene.attach_child(root, node)
    });

    let desert = SpriteNode::new(
        TextureId::Desert,
        IntRect::new(0, 0, world_bounds.width as i32, world_bounds.height as i32),
    );
    let background = scene.create(
        NodeKind::Sprite(desert),
        Transform::at(world_bounds.position()),
    );
    scene.attach_child(layers[Layer::Background as usize], background);

    for kind in [ParticleType::Smoke, ParticleType::Propellant] {
        let particles = scene.create(NodeKind::Particles(ParticleNode::new(kind)), Transform::default());
        scene.attach_child(layers[Layer::LowerAir as usize], particles);
    }

    let sound = scene.create(NodeKind::Sound(SoundNode), Transform::default());
    scene.attach_child(root, sound);

    let player = create_aircraft(scene, AircraftType::Eagle, Transform::at(spawn_position));
    let player = scene.attach_child(layers[Layer::UpperAir as usize], player);

    SceneLayout { layers, player }
}

/// Aircraft with its HUD labels attached. The player also gets a missile counter.
pub fn create_aircraft(scene: &mut SceneGraph, kind: AircraftType, transform: Transform) -> Detached {
    let hitpoints = kind.data().hitpoints;
    let aircraft = scene.create_entity(
        NodeKind::Aircraft(Aircraft::new(kind)),
        transform,
        Body::new(hitpoints),
    );
    let id = aircraft.id();

    let health = scene.create(
        NodeKind::Text(TextNode::new(FontId::Main, format!("{hitpoints} HP"))),
        Transform::at(Vec2::new(0.0, HEALTH_DISPLAY_OFFSET)),
    );
    let health = scene.attach_child(id, health);

    let missiles = if kind.is_allied() {
        let label = scene.create(
            NodeKind::Text(TextNode::new(FontId::Main, format!("M: {INITIAL_MISSILE_AMMO}"))),
            Transform::at(Vec2::new(0.0, MISSILE_DISPLAY_OFFSET)),
        );
        Some(scene.attach_child(id, label))
    } else {
        None
    };

    if let Some((aircraft, _)) = scene.aircraft_mut(id) {
        aircraft.set_displays(Some(health), missiles);
    }
    aircraft
}

/// Projectile at a world position. Homing projectiles trail smoke and propellant.
pub fn create_projectile(scene: &mut SceneGraph, kind: ProjectileType, position: Vec2, velocity: Vec2) -> Detached {
    let projectile = Projectile::new(kind);
    let height = projectile.local_bounds().height;
    let node = scene.create_entity(
        NodeKind::Projectile(projectile),
        Transform::at(position),
        Body::new(1).with_velocity(velocity),
    );

    if kind.is_guided() {
        for trail in [ParticleType::Smoke, ParticleType::Propellant] {
            let emitter = scene.create(
                NodeKind::Emitter(EmitterNode::new(trail)),
                Transform::at(Vec2::new(0.0, height / 2.0)),
            );
            scene.attach_child(node.id(), emitter);
        }
    }
    node
}

pub fn create_pickup(scene: &mut SceneGraph, kind: PickupType, position: Vec2) -> Detached {
    scene.create_entity(
        NodeKind::Pickup(Pickup::new(kind)),
        Transform::at(position),
        Body::new(PICKUP_HITPOINTS).with_velocity(Vec2::new(0.0, PICKUP_DRIFT_SPEED)),
    )
}

/// Enemy aircraft, nose down.
pub fn spawn_enemy(scene: &mut SceneGraph, air_layer: NodeId, kind: AircraftType, position: Vec2) -> NodeId {
    let transform = Transform {
        rotation: 180.0,
        ..Transform::at(position)
    };
    let enemy = create_aircraft(scene, kind, transform);
    scene.attach_child_at_world(air_layer, enemy)
}
