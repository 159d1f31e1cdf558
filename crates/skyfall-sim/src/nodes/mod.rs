//! Node variants stored in the scene graph.
//!
//! Every node carries a `NodeKind`, a local `Transform` and a `Hierarchy`.
//! Aircraft, projectiles and pickups additionally carry a `Body`.

pub mod aircraft;
pub mod animation;
pub mod entity;
pub mod particles;
pub mod pickup;
pub mod projectile;
pub mod sound;
pub mod sprite;
pub mod text;

pub use aircraft::Aircraft;
pub use animation::Animation;
pub use entity::Body;
pub use particles::{EmitterNode, ParticleNode};
pub use pickup::Pickup;
pub use projectile::Projectile;
pub use sound::SoundNode;
pub use sprite::SpriteNode;
pub use text::TextNode;

use skyfall_core::category::Category;
use skyfall_core::types::Rect;

/// Closed set of node variants.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Plain grouping node with a fixed category (root, layers).
    Group(Category),
    Sprite(SpriteNode),
    Text(TextNode),
    Aircraft(Aircraft),
    Projectile(Projectile),
    Pickup(Pickup),
    Particles(ParticleNode),
    Emitter(EmitterNode),
    Sound(SoundNode),
}

impl NodeKind {
    /// Gameplay role used for command targeting and collision classification.
    pub fn category(&self) -> Category {
        match self {
            NodeKind::Group(category) => *category,
            NodeKind::Aircraft(aircraft) => aircraft.category(),
            NodeKind::Projectile(projectile) => projectile.category(),
            NodeKind::Pickup(_) => Category::PICKUP,
            NodeKind::Particles(_) => Category::PARTICLE_SYSTEM,
            NodeKind::Sound(_) => Category::SOUND_EFFECT,
            NodeKind::Sprite(_) | NodeKind::Text(_) | NodeKind::Emitter(_) => Category::NONE,
        }
    }

    /// Collision bounds in node-local space, `None` for nodes that never collide.
    pub fn local_bounds(&self) -> Option<Rect> {
        match self {
            NodeKind::Aircraft(aircraft) => Some(aircraft.local_bounds()),
            NodeKind::Projectile(projectile) => Some(projectile.local_bounds()),
            NodeKind::Pickup(pickup) => Some(pickup.local_bounds()),
            _ => None,
        }
    }

    /// Whether the node should be pruned by the wreck sweep.
    pub fn is_marked_for_removal(&self, body: Option<&Body>) -> bool {
        match (self, body) {
            (NodeKind::Aircraft(aircraft), Some(body)) => aircraft.is_marked_for_removal(body),
            (_, Some(body)) => body.is_destroyed(),
            (_, None) => false,
        }
    }
}
