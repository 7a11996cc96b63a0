//! A small HTML node tree with escaping serialization.
//!
//! Attribute values and text nodes are always escaped; only [`Node::Raw`]
//! is written verbatim.

use std::fmt::Write;

/// Escape `& < > " '` for use in text content or attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

/// Format a pixel length the way CSS expects (`18px`, `12.5px`).
pub fn px(n: f64) -> String {
    format!("{n}px")
}

/// Ordered inline style declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    decls: Vec<(String, String)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration.
    pub fn set(&mut self, property: &str, value: impl Into<String>) -> &mut Self {
        self.decls.push((property.to_string(), value.into()));
        self
    }

    /// Append a declaration, builder style.
    pub fn with(mut self, property: &str, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Append every declaration of `other`.
    pub fn extend(&mut self, other: Style) {
        self.decls.extend(other.decls);
    }

    /// Insert every declaration of `other` before the existing ones.
    pub fn prepend(&mut self, other: Style) {
        let tail = std::mem::replace(&mut self.decls, other.decls);
        self.decls.extend(tail);
    }

    /// Value of the first declaration of a property.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.decls
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Drop every declaration of a property.
    pub fn remove(&mut self, property: &str) {
        self.decls.retain(|(p, _)| p != property);
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// `prop:value;` for every declaration, in order.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (property, value) in &self.decls {
            let _ = write!(css, "{property}:{value};");
        }
        css
    }
}

/// One attribute slot of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Attr {
    /// `name="value"`.
    Value(String, String),
    /// A boolean attribute written without a value.
    Flag(String),
    /// Where the `style` attribute goes.
    Style,
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<Attr>,
    pub style: Style,
    pub children: Vec<Node>,
    /// Text shown by interactive renderers when the element's media is
    /// missing. Static output ignores it.
    pub placeholder: Option<&'static str>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            style: Style::new(),
            children: Vec::new(),
            placeholder: None,
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push(Attr::Value(name.to_string(), value.into()));
        self
    }

    pub fn flag(mut self, name: &str) -> Self {
        self.attrs.push(Attr::Flag(name.to_string()));
        self
    }

    /// Set the inline style; the `style` attribute is written at this point
    /// in the attribute order.
    pub fn style(mut self, style: Style) -> Self {
        if !self.attrs.contains(&Attr::Style) {
            self.attrs.push(Attr::Style);
        }
        self.style = style;
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = Some(text);
        self
    }

    /// Void elements are written as `<tag .../>` with no children.
    pub fn is_void(&self) -> bool {
        matches!(self.tag, "img" | "br" | "hr" | "input" | "meta")
    }

    /// Serialize to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub(crate) fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for attr in &self.attrs {
            match attr {
                Attr::Value(name, value) => {
                    let _ = write!(out, " {name}=\"{}\"", escape_html(value));
                }
                Attr::Flag(name) => {
                    let _ = write!(out, " {name}");
                }
                Attr::Style => {
                    let _ = write!(out, " style=\"{}\"", escape_html(&self.style.to_css()));
                }
            }
        }
        if self.is_void() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// A node in the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Escaped text.
    Text(String),
    /// Trusted markup written verbatim.
    Raw(String),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn raw(s: impl Into<String>) -> Self {
        Node::Raw(s.into())
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub(crate) fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write_html(out),
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Raw(markup) => out.push_str(markup),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}
