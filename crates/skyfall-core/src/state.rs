//! Frame snapshot: the complete visual state handed to the renderer.

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

use crate::types::{Color, FontHandle, IntRect, Rect, SimTime, TextureHandle};

/// Everything the renderer needs to present one frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    /// World-space rectangle visible on screen.
    pub view: Rect,
    /// Drawables in painter's order (parents before children).
    pub drawables: Vec<Drawable>,
}

/// A single draw call emitted by a scene node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Drawable {
    Sprite {
        texture: TextureHandle,
        texture_rect: IntRect,
        /// Local origin subtracted before `transform` is applied.
        origin: Vec2,
        transform: Affine2,
    },
    /// Text centered on the node origin.
    Text {
        font: FontHandle,
        text: String,
        character_size: u32,
        transform: Affine2,
    },
    /// World-space particle quads sharing one texture.
    Particles {
        texture: TextureHandle,
        quads: Vec<ParticleQuad>,
    },
}

/// One particle, alpha already faded by remaining lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleQuad {
    pub position: Vec2,
    pub color: Color,
}
