use skyfall_core::constants::TEXT_CHARACTER_SIZE;
use skyfall_core::enums::FontId;

/// Centered text label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub font: FontId,
    pub text: String,
    pub character_size: u32,
}

impl TextNode {
    pub fn new(font: FontId, text: impl Into<String>) -> Self {
        Self {
            font,
            text: text.into(),
            character_size: TEXT_CHARACTER_SIZE,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}
