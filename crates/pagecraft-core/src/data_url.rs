//! Image data URLs for attached image files.

use base64::{Engine, engine::general_purpose::STANDARD};
use std::path::Path;

/// Image formats accepted for attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Svg,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Svg => "image/svg+xml",
        }
    }

    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "svg" => Some(ImageFormat::Svg),
            _ => None,
        }
    }

    /// Detect format from magic bytes. SVG is text and has none.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(ImageFormat::Gif);
        }
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }
        None
    }

    /// Detect format from content, falling back to the file name's extension.
    pub fn detect(data: &[u8], name: Option<&Path>) -> Option<Self> {
        Self::from_magic_bytes(data).or_else(|| {
            name.and_then(Path::extension)
                .and_then(|ext| ext.to_str())
                .and_then(Self::from_extension)
        })
    }
}

/// Encode image bytes as a `data:` URL.
///
/// Returns `None` when the bytes are not a recognized image.
pub fn image_data_url(data: &[u8], name: Option<&Path>) -> Option<String> {
    let format = ImageFormat::detect(data, name)?;
    Some(format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(data)))
}

/// Whether pasted text is acceptable as a remote image source.
pub fn is_remote_image_url(text: &str) -> bool {
    text.starts_with("http")
}
