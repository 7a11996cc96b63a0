//! Renderer trait abstraction.

use pagecraft_core::canvas::Canvas;
use pagecraft_core::items::Item;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid geometry for item {id}: {reason}")]
    InvalidGeometry { id: String, reason: String },
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Selection ring and handle color.
pub const DEFAULT_SELECTION_COLOR: &str = "#6366f1";

/// Context for a single render pass.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Page background; defaults to the document's `canvasBg`.
    pub background_color: String,
    /// Draw the dot grid (interactive renderers only).
    pub show_grid: bool,
    /// Selection ring and handle color.
    pub selection_color: String,
}

impl<'a> RenderContext<'a> {
    /// Create a render context using the document's own settings.
    pub fn new(canvas: &'a Canvas) -> Self {
        Self {
            canvas,
            background_color: canvas.document.canvas_bg.clone(),
            show_grid: canvas.document.show_grid,
            selection_color: DEFAULT_SELECTION_COLOR.to_string(),
        }
    }

    /// Items in paint order.
    pub fn items(&self) -> &'a [Item] {
        &self.canvas.document.items
    }
}

/// Trait for markup backends.
pub trait Renderer {
    /// Build the markup for a frame, replacing any previous output.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Take the built markup, leaving the renderer empty.
    fn take_markup(&mut self) -> String;
}

/// Reject items whose geometry cannot be written as CSS lengths.
pub(crate) fn check_geometry(item: &Item) -> RenderResult<()> {
    let fields = [("x", item.x), ("y", item.y), ("w", item.w), ("h", item.h)];
    match fields.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, value)) => Err(RendererError::InvalidGeometry {
            id: item.id.clone(),
            reason: format!("{name} is {value}"),
        }),
        None => Ok(()),
    }
}
