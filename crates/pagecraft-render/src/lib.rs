//! Pagecraft Render Library
//!
//! Turns a page into markup. Every item kind has one visual spec; the static
//! exporter and the interactive canvas renderer are thin adapters over it.

pub mod export;
pub mod interactive;
pub mod markup;
mod renderer;
pub mod visual;

pub use export::{ExportOptions, StaticHtmlRenderer, render_html};
pub use interactive::CanvasMarkupRenderer;
pub use markup::escape_html;
pub use renderer::{DEFAULT_SELECTION_COLOR, RenderContext, RenderResult, Renderer, RendererError};
pub use visual::visual_spec;
