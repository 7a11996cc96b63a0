//! Static HTML export.
//!
//! Produces one self-contained document: every item absolutely positioned
//! inside a `#root` container sized to the content plus a margin, with no
//! editor affordances and no external resources.

use crate::markup::{Style, px};
use crate::renderer::{RenderContext, RenderResult, Renderer, check_geometry};
use crate::visual::visual_spec;
use kurbo::Size;
use pagecraft_core::canvas::DEFAULT_CANVAS_BG;
use pagecraft_core::items::Item;

/// Space added right of and below the furthest item.
pub const EXPORT_MARGIN: f64 = 80.0;

/// Smallest exported page width.
pub const MIN_EXPORT_WIDTH: f64 = 800.0;

/// Smallest exported page height.
pub const MIN_EXPORT_HEIGHT: f64 = 600.0;

/// Options for static export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Page and root background.
    pub canvas_bg: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            canvas_bg: DEFAULT_CANVAS_BG.to_string(),
        }
    }
}

/// Size of the exported `#root` container.
pub fn export_size(items: &[Item]) -> Size {
    let (right, bottom) = items.iter().fold((0.0_f64, 0.0_f64), |(r, b), item| {
        (r.max(item.x + item.w), b.max(item.y + item.h))
    });
    Size::new(
        MIN_EXPORT_WIDTH.max(right + EXPORT_MARGIN),
        MIN_EXPORT_HEIGHT.max(bottom + EXPORT_MARGIN),
    )
}

/// Absolute placement of an item inside `#root`.
pub fn position_style(item: &Item) -> Style {
    Style::new()
        .with("position", "absolute")
        .with("left", px(item.x))
        .with("top", px(item.y))
        .with("width", px(item.w))
        .with("height", px(item.h))
}

/// Static markup for one item.
pub fn render_item(item: &Item) -> RenderResult<String> {
    check_geometry(item)?;
    let mut element = visual_spec(item);
    element.style.prepend(position_style(item));
    Ok(element.to_html())
}

/// A color that is safe to place inside a `<style>` block.
fn stylesheet_color(color: &str) -> &str {
    let unsafe_char = |c: char| matches!(c, '<' | '>' | '{' | '}' | ';' | '"' | '\'' | '\\');
    if color.is_empty() || color.contains(unsafe_char) {
        log::warn!("Ignoring canvas background {color:?} in export");
        DEFAULT_CANVAS_BG
    } else {
        color
    }
}

/// Render items into a complete HTML document.
pub fn render_html(items: &[Item], options: &ExportOptions) -> RenderResult<String> {
    let blocks = items
        .iter()
        .map(render_item)
        .collect::<RenderResult<Vec<_>>>()?
        .join("\n");
    let size = export_size(items);
    let bg = stylesheet_color(&options.canvas_bg);

    Ok(format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"/>\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\"/>\
         <title>Exported Page</title><style>*{{box-sizing:border-box}}\
         html,body{{width:100%;height:100%;margin:0;padding:0}}\
         body{{background:{bg};min-height:100vh;font:14px/1.5 system-ui, -apple-system, Segoe UI, Roboto, Helvetica, Arial}}\
         #root{{position:relative;width:{width};height:{height};background:{bg};overflow:hidden;margin:40px auto}}\
         </style></head><body><div id=\"root\">{blocks}</div></body></html>",
        width = px(size.width),
        height = px(size.height),
    ))
}

/// Renderer producing the static export document from a canvas, using the
/// page's own background.
#[derive(Debug, Default)]
pub struct StaticHtmlRenderer {
    markup: String,
}

impl StaticHtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for StaticHtmlRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let options = ExportOptions {
            canvas_bg: ctx.background_color.clone(),
        };
        self.markup = render_html(ctx.items(), &options)?;
        log::debug!("Exported {} items ({} bytes)", ctx.items().len(), self.markup.len());
        Ok(())
    }

    fn take_markup(&mut self) -> String {
        std::mem::take(&mut self.markup)
    }
}
