//! Image block.

use super::{Component, ItemKind};
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// How an image fills its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectFit {
    #[default]
    Cover,
    Contain,
    Fill,
}

impl ObjectFit {
    pub fn as_css(self) -> &'static str {
        match self {
            ObjectFit::Cover => "cover",
            ObjectFit::Contain => "contain",
            ObjectFit::Fill => "fill",
        }
    }
}

/// Properties of an image item. An empty `src` renders a placeholder on the
/// canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    pub object_fit: ObjectFit,
    pub radius: f64,
    pub shadow: bool,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            src: String::new(),
            alt: String::new(),
            object_fit: ObjectFit::Cover,
            radius: 16.0,
            shadow: true,
        }
    }
}

impl Component for ImageProps {
    const KIND: ItemKind = ItemKind::Image;
    const DEFAULT_SIZE: Size = Size::new(360.0, 220.0);
}
