//! JSON persistence format for pages.
//!
//! The persisted shape is `{ items, dark, canvasBg, showGrid }`; the export
//! shape is `{ items }`. Reading is lenient: every item goes through
//! [`normalize`](crate::items::normalize) and missing settings take defaults.

use crate::canvas::{DEFAULT_CANVAS_BG, PageDocument};
use crate::items::{Item, normalize};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from reading persisted or imported page text.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),
}

/// Serialize the full persisted state.
pub fn serialize(doc: &PageDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string(doc)
}

/// Parse persisted state, normalizing every item.
///
/// Items are used only when `items` is an array; non-object entries are
/// skipped and duplicate ids re-minted. A present `dark` is read by
/// truthiness, `showGrid` only when boolean, `canvasBg` only when a
/// non-empty string.
pub fn deserialize(text: &str) -> Result<PageDocument, ParseError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(root) = value else {
        return Err(ParseError::NotAnObject(kind_name(&value)));
    };

    let mut doc = PageDocument::new();
    match root.get("items") {
        Some(Value::Array(entries)) => {
            for (index, entry) in entries.iter().enumerate() {
                match entry {
                    Value::Object(raw) => {
                        doc.add_item(normalize(raw));
                    }
                    other => {
                        log::warn!(
                            "Skipping item {index}: expected an object, found {}",
                            kind_name(other)
                        );
                    }
                }
            }
        }
        Some(other) => log::warn!("Ignoring items: expected an array, found {}", kind_name(other)),
        None => {}
    }
    apply_settings(&mut doc, &root);
    Ok(doc)
}

fn apply_settings(doc: &mut PageDocument, root: &Map<String, Value>) {
    if let Some(dark) = root.get("dark") {
        doc.dark = truthy(dark);
    }
    if let Some(show_grid) = root.get("showGrid").and_then(Value::as_bool) {
        doc.show_grid = show_grid;
    }
    doc.canvas_bg = match root.get("canvasBg").and_then(Value::as_str) {
        Some(bg) if !bg.is_empty() => bg.to_string(),
        _ => DEFAULT_CANVAS_BG.to_string(),
    };
}

/// Script truthiness: `false`, `null`, zero and `""` are false.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parse persisted state, falling back to an empty default page.
pub fn deserialize_or_default(text: &str) -> PageDocument {
    deserialize(text).unwrap_or_else(|err| {
        log::warn!("Discarding unreadable page: {err}");
        PageDocument::new()
    })
}

#[derive(Serialize)]
struct ItemsExport<'a> {
    items: &'a [Item],
}

/// Pretty-printed `{ items }` for the downloadable JSON file.
pub fn export_items_json(doc: &PageDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ItemsExport { items: &doc.items })
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
