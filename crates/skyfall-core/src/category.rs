//! Category bitmask used for command targeting and collision classification.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Gameplay role of a scene node.
    ///
    /// A node reports exactly one role, but commands may target several
    /// roles at once by combining flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Category: u32 {
        /// The upper air layer; receives spawn commands for new entities.
        const SCENE_AIR_LAYER   = 1 << 0;
        const PLAYER_AIRCRAFT   = 1 << 1;
        const ENEMY_AIRCRAFT    = 1 << 2;
        const PICKUP            = 1 << 3;
        const ALLIED_PROJECTILE = 1 << 4;
        const ENEMY_PROJECTILE  = 1 << 5;
        const PARTICLE_SYSTEM   = 1 << 6;
        const SOUND_EFFECT      = 1 << 7;

        const PROJECTILE = Self::ALLIED_PROJECTILE.bits() | Self::ENEMY_PROJECTILE.bits();
    }
}

impl Category {
    /// Category of nodes that take no part in dispatch or collision.
    pub const NONE: Category = Category::empty();

    /// True when a command targeting `self` should be applied to a node of `node`.
    pub fn matches(self, node: Category) -> bool {
        self.intersects(node)
    }
}
