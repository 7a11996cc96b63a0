//! Per-kind visual specs.
//!
//! [`visual_spec`] describes how an item looks, independent of where it is
//! placed. The static exporter and the interactive canvas both start from
//! it and add only their own positioning and affordances.

use crate::markup::{Element, Node, Style, px};
use pagecraft_core::items::{
    ButtonProps, ButtonVariant, CardProps, ImageProps, Item, ItemProps, TextProps, VideoProps,
};

/// Shadow recipe shared by every item with `shadow` on.
pub const SHADOW: &str = "0 6px 18px rgba(0,0,0,.08)";

/// Accent used by buttons and card links.
pub const INDIGO: &str = "#4f46e5";

/// Text color of outline and ghost buttons.
pub const INDIGO_TEXT: &str = "#4338ca";

/// Permissions granted to embedded players.
pub const VIDEO_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// Placeholder for an image item without a source.
pub const IMAGE_PLACEHOLDER: &str = "No image. Use toolbar to upload or paste URL.";

/// Placeholder for a card without an image.
pub const CARD_IMAGE_PLACEHOLDER: &str = "Image";

/// Build the visual spec for an item.
pub fn visual_spec(item: &Item) -> Element {
    match &item.props {
        ItemProps::Text(props) => text_spec(props),
        ItemProps::Image(props) => image_spec(props),
        ItemProps::Button(props) => button_spec(props),
        ItemProps::Card(props) => card_spec(props),
        ItemProps::Video(props) => video_spec(props),
    }
}

/// Background, radius, shadow and color, each only when set.
fn common_style(bg: &str, radius: f64, shadow: bool, color: &str) -> Style {
    let mut style = Style::new();
    if !bg.is_empty() {
        style.set("background", bg);
    }
    style.set("border-radius", px(radius));
    if shadow {
        style.set("box-shadow", SHADOW);
    }
    if !color.is_empty() {
        style.set("color", color);
    }
    style
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() { default } else { value }
}

/// Zero and NaN sizes are unset.
fn size_or(value: f64, default: f64) -> f64 {
    if value == 0.0 || value.is_nan() { default } else { value }
}

fn text_spec(props: &TextProps) -> Element {
    let mut style = common_style(&props.bg, props.radius, props.shadow, &props.color);
    style
        .set("padding", px(props.padding))
        .set("font-size", px(size_or(props.font_size, 16.0)))
        .set("text-align", props.align.as_css());
    Element::new("div").style(style).child(Node::raw(props.html.clone()))
}

fn image_spec(props: &ImageProps) -> Element {
    let mut style = Style::new().with("object-fit", props.object_fit.as_css());
    style.extend(common_style("", props.radius, props.shadow, ""));
    let element = Element::new("img")
        .attr("src", props.src.clone())
        .attr("alt", props.alt.clone())
        .style(style);
    if props.src.is_empty() {
        element.placeholder(IMAGE_PLACEHOLDER)
    } else {
        element
    }
}

fn button_spec(props: &ButtonProps) -> Element {
    let mut style = match props.variant {
        ButtonVariant::Primary => Style::new().with("background", INDIGO).with("color", "white"),
        ButtonVariant::Outline => Style::new()
            .with("border", format!("1px solid {INDIGO}"))
            .with("color", INDIGO_TEXT)
            .with("background", "transparent"),
        ButtonVariant::Ghost => Style::new()
            .with("color", INDIGO_TEXT)
            .with("background", "transparent"),
    };
    style
        .set("display", "flex")
        .set("align-items", "center")
        .set("justify-content", "center")
        .set("border-radius", px(props.radius))
        .set("padding", format!("{} {}", px(props.padding_y), px(props.padding_x)));
    Element::new("a")
        .attr("href", props.href.clone())
        .style(style)
        .child(Node::text(props.label.clone()))
}

fn card_spec(props: &CardProps) -> Element {
    let mut style = common_style(&props.bg, props.radius, props.shadow, "");
    style
        .set("padding", px(props.padding))
        .set("display", "flex")
        .set("gap", "12px");

    let mut media = Element::new("div").style(
        Style::new()
            .with("width", "40%")
            .with("height", "100%")
            .with("overflow", "hidden")
            .with("border-radius", "12px")
            .with("background", "#f4f4f5"),
    );
    if props.img.is_empty() {
        media = media.placeholder(CARD_IMAGE_PLACEHOLDER);
    } else {
        media = media.child(
            Element::new("img").attr("src", props.img.clone()).style(
                Style::new()
                    .with("width", "100%")
                    .with("height", "100%")
                    .with("object-fit", "cover"),
            ),
        );
    }

    let title = Element::new("h3")
        .style(
            Style::new()
                .with("margin", "0 0 4px 0")
                .with("color", or_default(&props.title_color, "#0f172a"))
                .with("font-size", px(size_or(props.title_size, 18.0)))
                .with("font-weight", if props.title_bold { "700" } else { "500" })
                .with("font-style", if props.title_italic { "italic" } else { "normal" }),
        )
        .child(Node::text(props.title.clone()));

    let body = Element::new("p")
        .style(
            Style::new()
                .with("margin", "0")
                .with("color", or_default(&props.body_color, "#52525b"))
                .with("font-size", px(size_or(props.body_size, 14.0)))
                .with("font-weight", if props.body_bold { "600" } else { "400" })
                .with("font-style", if props.body_italic { "italic" } else { "normal" }),
        )
        .child(Node::text(props.body.clone()));

    let link = Element::new("a")
        .attr("href", props.href.clone())
        .style(
            Style::new()
                .with("color", or_default(&props.cta_color, INDIGO))
                .with("text-decoration", "none")
                .with("font", "600 14px system-ui"),
        )
        .child(Node::text(props.cta.clone()));

    let content = Element::new("div")
        .style(
            Style::new()
                .with("width", "60%")
                .with("display", "flex")
                .with("flex-direction", "column"),
        )
        .child(title)
        .child(body)
        .child(
            Element::new("div")
                .style(Style::new().with("margin-top", "auto"))
                .child(link),
        );

    Element::new("div").style(style).child(media).child(content)
}

fn video_spec(props: &VideoProps) -> Element {
    Element::new("iframe")
        .attr("src", props.url.clone())
        .style(Style::new().with("border-radius", px(props.radius)))
        .attr("allow", VIDEO_ALLOW)
        .flag("allowfullscreen")
}
