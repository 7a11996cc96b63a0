//! Rich text block.

use super::{Component, ItemKind};
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Horizontal alignment of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

/// Properties of a text item.
///
/// `html` is editor output and is rendered as trusted markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextProps {
    pub html: String,
    pub color: String,
    pub align: TextAlign,
    pub font_size: f64,
    pub padding: f64,
    pub radius: f64,
    pub bg: String,
    pub shadow: bool,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            html: "<h2>Write something great ✨</h2><p>This is a rich text block. Double‑click to edit.</p>"
                .to_string(),
            color: "#0f172a".to_string(),
            align: TextAlign::Left,
            font_size: 18.0,
            padding: 12.0,
            radius: 12.0,
            bg: "#ffffffb3".to_string(),
            shadow: true,
        }
    }
}

impl Component for TextProps {
    const KIND: ItemKind = ItemKind::Text;
    const DEFAULT_SIZE: Size = Size::new(320.0, 120.0);
}
