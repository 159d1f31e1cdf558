//! Resolution of texture and font identifiers to renderer handles.

use std::collections::HashMap;

use skyfall_core::enums::{FontId, TextureId};
use skyfall_core::types::{FontHandle, TextureHandle};

/// Supplied by the embedding application when drawing.
pub trait ResourceLookup {
    fn texture(&self, id: TextureId) -> Option<TextureHandle>;
    fn font(&self, id: FontId) -> Option<FontHandle>;
}

/// Map-backed lookup.
#[derive(Debug, Clone, Default)]
pub struct ResourceTable {
    textures: HashMap<TextureId, TextureHandle>,
    fonts: HashMap<FontId, FontHandle>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every known texture and font, numbered in declaration order.
    pub fn with_all_resources() -> Self {
        let mut table = Self::new();
        for (index, id) in TextureId::ALL.into_iter().enumerate() {
            table.insert_texture(id, TextureHandle(index as u32));
        }
        for (index, id) in FontId::ALL.into_iter().enumerate() {
            table.insert_font(id, FontHandle(index as u32));
        }
        table
    }

    pub fn insert_texture(&mut self, id: TextureId, handle: TextureHandle) -> Option<TextureHandle> {
        self.textures.insert(id, handle)
    }

    pub fn insert_font(&mut self, id: FontId, handle: FontHandle) -> Option<FontHandle> {
        self.fonts.insert(id, handle)
    }
}

impl ResourceLookup for ResourceTable {
    fn texture(&self, id: TextureId) -> Option<TextureHandle> {
        self.textures.get(&id).copied()
    }

    fn font(&self, id: FontId) -> Option<FontHandle> {
        self.fonts.get(&id).copied()
    }
}
