//! Interactive canvas markup.
//!
//! Wraps each item's visual spec in a positioned container and adds what
//! the editor needs: media placeholders, the selection ring, resize handles,
//! the live rich-text surface and the dot grid.

use crate::markup::{Element, Node, Style, px};
use crate::renderer::{RenderContext, RenderResult, Renderer, check_geometry};
use crate::visual::visual_spec;
use pagecraft_core::canvas::{ItemState, Mode};
use pagecraft_core::items::{Item, ItemKind};
use pagecraft_core::selection::{HANDLE_SIZE, get_handles};

const GRID_BACKGROUND: &str = "radial-gradient(circle, rgba(0,0,0,0.06) 1px, transparent 1px)";
const GRID_SPACING: &str = "12px 12px";

/// Renderer producing the editor canvas markup.
#[derive(Debug, Default)]
pub struct CanvasMarkupRenderer {
    markup: String,
}

impl CanvasMarkupRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for CanvasMarkupRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let mut root = Element::new("div")
            .attr("class", "pc-canvas")
            .attr("data-mode", mode_name(ctx.canvas.mode()))
            .style(
                Style::new()
                    .with("position", "relative")
                    .with("width", "100%")
                    .with("height", "100%")
                    .with("overflow", "auto")
                    .with("background", ctx.background_color.clone()),
            );

        if ctx.show_grid {
            root = root.child(grid_overlay());
        }
        for item in ctx.items() {
            root = root.child(render_item(ctx, item)?);
        }

        self.markup = root.to_html();
        Ok(())
    }

    fn take_markup(&mut self) -> String {
        std::mem::take(&mut self.markup)
    }
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Design => "design",
        Mode::Preview => "preview",
    }
}

fn state_name(state: ItemState) -> &'static str {
    match state {
        ItemState::Idle => "idle",
        ItemState::Selected => "selected",
        ItemState::Editing => "editing",
    }
}

fn grid_overlay() -> Element {
    Element::new("div").attr("class", "pc-grid").style(
        Style::new()
            .with("position", "absolute")
            .with("inset", "0")
            .with("pointer-events", "none")
            .with("background-image", GRID_BACKGROUND)
            .with("background-size", GRID_SPACING),
    )
}

/// One positioned item with its affordances.
fn render_item(ctx: &RenderContext, item: &Item) -> RenderResult<Element> {
    check_geometry(item)?;
    let state = ctx.canvas.item_state(&item.id);

    let mut body = with_placeholders(visual_spec(item));
    body.style.prepend(Style::new().with("width", "100%").with("height", "100%"));
    if state == ItemState::Editing && item.kind() == ItemKind::Text {
        body = body.attr("contenteditable", "true").attr("data-no-drag", "");
    }

    let mut style = Style::new()
        .with("position", "absolute")
        .with("left", px(item.x))
        .with("top", px(item.y))
        .with("width", px(item.w))
        .with("height", px(item.h))
        .with("z-index", if state.is_selected() { "20" } else { "10" });
    if state.is_selected() {
        style.set("outline", format!("2px solid {}", ctx.selection_color));
    }

    let mut wrapper = Element::new("div")
        .attr("class", "pc-item")
        .attr("data-id", item.id.clone())
        .attr("data-type", item.kind().as_str())
        .attr("data-state", state_name(state))
        .style(style)
        .child(body);

    if state.is_selected() {
        for handle in get_handles(item.rect()) {
            let left = handle.position.x - item.x - HANDLE_SIZE / 2.0;
            let top = handle.position.y - item.y - HANDLE_SIZE / 2.0;
            wrapper = wrapper.child(
                Element::new("div")
                    .attr("class", "pc-handle")
                    .attr("data-dir", handle.dir.as_str())
                    .style(
                        Style::new()
                            .with("position", "absolute")
                            .with("left", px(left))
                            .with("top", px(top))
                            .with("width", px(HANDLE_SIZE))
                            .with("height", px(HANDLE_SIZE))
                            .with("background", ctx.selection_color.clone())
                            .with("border", "2px solid white")
                            .with("border-radius", "3px")
                            .with("cursor", handle.dir.cursor()),
                    ),
            );
        }
    }
    Ok(wrapper)
}

fn placeholder_box(text: &'static str) -> Element {
    Element::new("div")
        .attr("class", "pc-placeholder")
        .style(
            Style::new()
                .with("width", "100%")
                .with("height", "100%")
                .with("display", "flex")
                .with("align-items", "center")
                .with("justify-content", "center")
                .with("color", "#a1a1aa"),
        )
        .child(Node::text(text))
}

/// Swap empty media for visible placeholders, recursively.
fn with_placeholders(mut element: Element) -> Element {
    if let Some(text) = element.placeholder.take() {
        if element.is_void() {
            let mut replacement = placeholder_box(text);
            replacement.style.set("border", "1px dashed #d4d4d8");
            replacement.style.set("border-radius", "12px");
            replacement.style.set("background", "#fafafa");
            return replacement;
        }
        element.children.push(placeholder_box(text).into());
    }
    element.children = element
        .children
        .into_iter()
        .map(|child| match child {
            Node::Element(child) => Node::Element(with_placeholders(child)),
            other => other,
        })
        .collect();
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use pagecraft_core::canvas::Canvas;
    use pagecraft_core::selection::PressTarget;

    fn build(canvas: &Canvas) -> String {
        let mut renderer = CanvasMarkupRenderer::new();
        renderer.build_scene(&RenderContext::new(canvas)).unwrap();
        renderer.take_markup()
    }

    #[test]
    fn test_empty_canvas_with_grid() {
        let canvas = Canvas::new();
        let html = build(&canvas);
        assert!(html.starts_with("<div class=\"pc-canvas\" data-mode=\"design\""));
        assert!(html.contains("background:#ffffff;"));
        assert!(html.contains("class=\"pc-grid\""));
    }

    #[test]
    fn test_grid_hidden() {
        let mut canvas = Canvas::new();
        canvas.document.toggle_grid();
        assert!(!build(&canvas).contains("pc-grid"));
    }

    #[test]
    fn test_placeholders() {
        let mut canvas = Canvas::new();
        canvas.document.add_item(Item::new(ItemKind::Image, 0.0, 0.0));
        canvas.document.add_item(Item::new(ItemKind::Card, 0.0, 240.0));
        let html = build(&canvas);
        assert!(html.contains(">No image. Use toolbar to upload or paste URL.</div>"));
        assert!(html.contains(">Image</div>"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_selected_item_has_ring_and_handles() {
        let mut canvas = Canvas::new();
        let id = canvas.document.add_item(Item::new(ItemKind::Button, 40.0, 40.0));
        assert!(!build(&canvas).contains("pc-handle"));

        canvas.select(&id);
        let html = build(&canvas);
        assert_eq!(html.matches("class=\"pc-handle\"").count(), 8);
        assert!(html.contains("outline:2px solid #6366f1;"));
        assert!(html.contains("data-state=\"selected\""));
        // Bottom-right handle centered on the corner of a 160x56 item.
        assert!(html.contains("data-dir=\"se\" style=\"position:absolute;left:154px;top:50px;"));
    }

    #[test]
    fn test_selected_text_is_editable() {
        let mut canvas = Canvas::new();
        let id = canvas.document.add_item(Item::new(ItemKind::Text, 0.0, 0.0));
        assert!(!build(&canvas).contains("contenteditable"));

        canvas.pointer_down_item(&id, PressTarget::Editable, Point::new(10.0, 10.0));
        let html = build(&canvas);
        assert!(html.contains("contenteditable=\"true\""));
        assert!(html.contains("data-state=\"editing\""));
    }

    #[test]
    fn test_preview_mode_is_read_only() {
        let mut canvas = Canvas::new();
        let id = canvas.document.add_item(Item::new(ItemKind::Text, 0.0, 0.0));
        canvas.select(&id);
        canvas.set_mode(Mode::Preview);

        let html = build(&canvas);
        assert!(html.contains("data-mode=\"preview\""));
        assert!(!html.contains("contenteditable"));
        assert!(!html.contains("pc-handle"));
        assert!(!html.contains("outline:"));
    }

    #[test]
    fn test_items_fill_their_wrapper() {
        let mut canvas = Canvas::new();
        canvas.document.add_item(Item::new(ItemKind::Video, 8.0, 16.0));
        let html = build(&canvas);
        assert!(html.contains("left:8px;top:16px;width:480px;height:270px;z-index:10;"));
        assert!(html.contains("<iframe src=\"https://www.youtube.com/embed/dQw4w9WgXcQ\" style=\"width:100%;height:100%;border-radius:16px;\""));
    }
}
