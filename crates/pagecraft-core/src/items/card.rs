//! Card: image column plus title, body and call to action.

use super::{Component, ItemKind};
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Properties of a card item.
///
/// Title and body carry independent color, size, weight and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardProps {
    pub title: String,
    pub body: String,
    pub img: String,
    pub cta: String,
    pub href: String,
    pub radius: f64,
    pub shadow: bool,
    pub padding: f64,
    pub bg: String,
    pub title_color: String,
    pub body_color: String,
    pub cta_color: String,
    pub title_size: f64,
    pub body_size: f64,
    pub title_bold: bool,
    pub body_bold: bool,
    pub title_italic: bool,
    pub body_italic: bool,
}

impl Default for CardProps {
    fn default() -> Self {
        Self {
            title: "Beautiful Card".to_string(),
            body: "A modern card with image, text and action.".to_string(),
            img: String::new(),
            cta: "Learn more".to_string(),
            href: "#".to_string(),
            radius: 20.0,
            shadow: true,
            padding: 16.0,
            bg: "#ffffffcc".to_string(),
            title_color: "#0f172a".to_string(),
            body_color: "#52525b".to_string(),
            cta_color: "#4f46e5".to_string(),
            title_size: 18.0,
            body_size: 14.0,
            title_bold: true,
            body_bold: false,
            title_italic: false,
            body_italic: false,
        }
    }
}

impl Component for CardProps {
    const KIND: ItemKind = ItemKind::Card;
    const DEFAULT_SIZE: Size = Size::new(420.0, 260.0);
}
