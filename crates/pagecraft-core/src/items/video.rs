//! Embedded video player.

use super::{Component, ItemKind};
use crate::video::normalize_video_url;
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Properties of a video item. `url` is an embeddable player URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoProps {
    pub url: String,
    pub radius: f64,
}

impl VideoProps {
    /// Set the url from user input, rewriting share links to embed links.
    pub fn set_url(&mut self, input: &str) {
        self.url = normalize_video_url(input);
    }
}

impl Default for VideoProps {
    fn default() -> Self {
        Self {
            url: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_string(),
            radius: 16.0,
        }
    }
}

impl Component for VideoProps {
    const KIND: ItemKind = ItemKind::Video;
    const DEFAULT_SIZE: Size = Size::new(480.0, 270.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_url_normalizes_share_link() {
        let mut props = VideoProps::default();
        props.set_url("https://youtu.be/abc123");
        assert_eq!(props.url, "https://www.youtube.com/embed/abc123");
    }
}
