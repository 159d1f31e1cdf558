//! Fundamental geometric and simulation types.
//!
//! Coordinates follow screen convention: x grows right, y grows down.
//! Rotations are stored in degrees, clockwise.

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Normalized (min, max) corners, tolerating negative sizes.
    fn min_max(&self) -> (Vec2, Vec2) {
        let a = self.position();
        let b = a + self.size();
        (a.min(b), a.max(b))
    }

    /// Whether `point` lies inside the rectangle (left/top inclusive, right/bottom exclusive).
    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = self.min_max();
        point.x >= min.x && point.x < max.x && point.y >= min.y && point.y < max.y
    }

    /// Overlap of the two rectangles, or `None` when they only touch or are apart.
    ///
    /// A zero-area rectangle never intersects anything.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let (a_min, a_max) = self.min_max();
        let (b_min, b_max) = other.min_max();
        let min = a_min.max(b_min);
        let max = a_max.min(b_max);
        if min.x < max.x && min.y < max.y {
            Some(Rect::from_position_size(min, max - min))
        } else {
            None
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection(other).is_some()
    }

    /// Axis-aligned bounds of this rectangle after applying `transform`.
    pub fn transformed(&self, transform: &Affine2) -> Rect {
        let corners = [
            Vec2::new(self.left, self.top),
            Vec2::new(self.right(), self.top),
            Vec2::new(self.left, self.bottom()),
            Vec2::new(self.right(), self.bottom()),
        ]
        .map(|c| transform.transform_point2(c));

        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min = min.min(*c);
            max = max.max(*c);
        }
        Rect::from_position_size(min, max - min)
    }
}

/// Integer rectangle addressing a region of a texture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl IntRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Local bounds of a sprite showing this region with its origin at the center.
    pub fn centered_bounds(&self) -> Rect {
        let size = self.size();
        Rect::from_position_size(-size / 2.0, size)
    }
}

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Local 2D transform of a scene node: translation, rotation and scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    /// Degrees, clockwise in screen space.
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Affine matrix: translate, then rotate, then scale (applied right to left).
    pub fn matrix(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(self.scale, self.rotation.to_radians(), self.position)
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }
}

/// Opaque texture handle issued by the resource collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Opaque font handle issued by the resource collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontHandle(pub u32);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of completed ticks.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt);
    }
}

/// Unit vector in the direction of `v`, or zero when `v` is zero.
pub fn unit_vector(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}
