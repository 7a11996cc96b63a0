//! Link button.

use super::{Component, ItemKind};
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Button style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    /// Filled indigo with white text.
    #[default]
    Primary,
    /// Transparent with a 1px indigo border.
    Outline,
    /// Transparent, text only.
    Ghost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonProps {
    pub label: String,
    pub href: String,
    pub variant: ButtonVariant,
    pub radius: f64,
    pub padding_x: f64,
    pub padding_y: f64,
}

impl Default for ButtonProps {
    fn default() -> Self {
        Self {
            label: "Click Me".to_string(),
            href: "#".to_string(),
            variant: ButtonVariant::Primary,
            radius: 14.0,
            padding_x: 16.0,
            padding_y: 10.0,
        }
    }
}

impl Component for ButtonProps {
    const KIND: ItemKind = ItemKind::Button;
    const DEFAULT_SIZE: Size = Size::new(160.0, 56.0);
}
