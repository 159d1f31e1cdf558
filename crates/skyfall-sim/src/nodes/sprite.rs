use glam::Vec2;

use skyfall_core::enums::TextureId;
use skyfall_core::types::IntRect;

/// Static textured rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteNode {
    pub texture: TextureId,
    pub texture_rect: IntRect,
    /// Local point placed at the node position.
    pub origin: Vec2,
}

impl SpriteNode {
    /// Sprite anchored at its top-left corner.
    pub fn new(texture: TextureId, texture_rect: IntRect) -> Self {
        Self {
            texture,
            texture_rect,
            origin: Vec2::ZERO,
        }
    }
}
