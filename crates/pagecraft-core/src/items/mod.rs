//! Item definitions for the page canvas.
//!
//! An item is one placed component: a kind, an axis-aligned rectangle and a
//! kind-specific property bag. The set of kinds is closed; untrusted data is
//! mapped onto it by [`normalize`], which is the only place a missing type
//! falls back to text.

mod button;
mod card;
mod image;
mod text;
mod video;

pub use button::{ButtonProps, ButtonVariant};
pub use card::CardProps;
pub use image::{ImageProps, ObjectFit};
pub use text::{TextAlign, TextProps};
pub use video::VideoProps;

use crate::snap::MIN_SIZE;
use kurbo::{Point, Rect, Size};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for items.
pub type ItemId = String;

/// A shallow props patch: keys to overwrite in an item's property bag.
pub type PropsPatch = Map<String, Value>;

/// Item model errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("Invalid item type: {0}")]
    InvalidType(String),
}

/// The closed set of component kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Text,
    Image,
    Button,
    Card,
    Video,
}

impl ItemKind {
    /// Palette order.
    pub const ALL: [ItemKind; 5] = [
        ItemKind::Text,
        ItemKind::Image,
        ItemKind::Button,
        ItemKind::Card,
        ItemKind::Video,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Text => "text",
            ItemKind::Image => "image",
            ItemKind::Button => "button",
            ItemKind::Card => "card",
            ItemKind::Video => "video",
        }
    }

    /// Size of a freshly dropped item.
    pub fn default_size(self) -> Size {
        match self {
            ItemKind::Text => TextProps::DEFAULT_SIZE,
            ItemKind::Image => ImageProps::DEFAULT_SIZE,
            ItemKind::Button => ButtonProps::DEFAULT_SIZE,
            ItemKind::Card => CardProps::DEFAULT_SIZE,
            ItemKind::Video => VideoProps::DEFAULT_SIZE,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ItemError::InvalidType(s.to_string()))
    }
}

/// Common trait for the per-kind property structs.
pub trait Component: Default + Clone + Serialize + DeserializeOwned {
    /// The kind these props belong to.
    const KIND: ItemKind;
    /// Size of a freshly dropped item of this kind.
    const DEFAULT_SIZE: Size;
}

/// Kind-tagged property bag.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemProps {
    Text(TextProps),
    Image(ImageProps),
    Button(ButtonProps),
    Card(CardProps),
    Video(VideoProps),
}

impl ItemProps {
    /// Default props for a kind.
    pub fn defaults_for(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Text => ItemProps::Text(TextProps::default()),
            ItemKind::Image => ItemProps::Image(ImageProps::default()),
            ItemKind::Button => ItemProps::Button(ButtonProps::default()),
            ItemKind::Card => ItemProps::Card(CardProps::default()),
            ItemKind::Video => ItemProps::Video(VideoProps::default()),
        }
    }

    /// Build props for a kind from an untrusted bag, backfilling defaults.
    pub fn from_bag(kind: ItemKind, bag: &Map<String, Value>) -> Self {
        Self::build(kind, bag).0
    }

    /// Like [`from_bag`](Self::from_bag), also returning the keys that were
    /// dropped.
    fn build(kind: ItemKind, bag: &Map<String, Value>) -> (Self, Vec<String>) {
        match kind {
            ItemKind::Text => backfill_into(bag, ItemProps::Text),
            ItemKind::Image => backfill_into(bag, ItemProps::Image),
            ItemKind::Button => backfill_into(bag, ItemProps::Button),
            ItemKind::Card => backfill_into(bag, ItemProps::Card),
            ItemKind::Video => backfill_into(bag, ItemProps::Video),
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            ItemProps::Text(_) => ItemKind::Text,
            ItemProps::Image(_) => ItemKind::Image,
            ItemProps::Button(_) => ItemKind::Button,
            ItemProps::Card(_) => ItemKind::Card,
            ItemProps::Video(_) => ItemKind::Video,
        }
    }

    /// The props as a JSON object with camelCase keys.
    pub fn to_bag(&self) -> Map<String, Value> {
        let value = match self {
            ItemProps::Text(p) => serde_json::to_value(p),
            ItemProps::Image(p) => serde_json::to_value(p),
            ItemProps::Button(p) => serde_json::to_value(p),
            ItemProps::Card(p) => serde_json::to_value(p),
            ItemProps::Video(p) => serde_json::to_value(p),
        };
        match value {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Shallow-merge a patch into these props.
    ///
    /// Keys the kind does not know, and values of the wrong shape, are
    /// skipped and returned. The kind never changes.
    pub fn merge(&mut self, patch: &PropsPatch) -> Vec<String> {
        let mut bag = self.to_bag();
        for (key, value) in patch {
            bag.insert(key.clone(), value.clone());
        }
        let (merged, rejected) = ItemProps::build(self.kind(), &bag);
        *self = merged;
        rejected
    }

    /// Keys of `patch` that [`merge`](Self::merge) would skip.
    pub fn rejected_keys(&self, patch: &PropsPatch) -> Vec<String> {
        self.clone().merge(patch)
    }
}

fn backfill_into<T: Component>(
    bag: &Map<String, Value>,
    wrap: fn(T) -> ItemProps,
) -> (ItemProps, Vec<String>) {
    let (props, rejected) = backfill::<T>(bag);
    (wrap(props), rejected)
}

/// Overlay `bag` onto `T::default()`, keeping only keys and values `T` accepts.
///
/// Returns the props and the keys that were dropped.
fn backfill<T: Component>(bag: &Map<String, Value>) -> (T, Vec<String>) {
    let mut merged = match serde_json::to_value(T::default()) {
        Ok(Value::Object(map)) => map,
        _ => return (T::default(), bag.keys().cloned().collect()),
    };
    let mut rejected = Vec::new();
    for (key, value) in bag {
        if !merged.contains_key(key) {
            rejected.push(key.clone());
            continue;
        }
        let previous = merged.insert(key.clone(), value.clone());
        if serde_json::from_value::<T>(Value::Object(merged.clone())).is_err() {
            log::debug!("Ignoring invalid {} prop {key}: {value}", T::KIND);
            rejected.push(key.clone());
            if let Some(previous) = previous {
                merged.insert(key.clone(), previous);
            }
        }
    }
    let props = serde_json::from_value(Value::Object(merged)).unwrap_or_default();
    (props, rejected)
}

/// A placed component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "StoredItem")]
pub struct Item {
    /// Stable, unique identifier.
    pub id: ItemId,
    /// Left edge relative to the canvas origin.
    pub x: f64,
    /// Top edge relative to the canvas origin.
    pub y: f64,
    /// Width in pixels.
    pub w: f64,
    /// Height in pixels.
    pub h: f64,
    /// Kind-specific properties; also determines the kind.
    pub props: ItemProps,
}

impl Item {
    /// Create an item of `kind` at `(x, y)` with default size and props.
    pub fn new(kind: ItemKind, x: f64, y: f64) -> Self {
        let size = kind.default_size();
        Self {
            id: mint_id(),
            x,
            y,
            w: size.width,
            h: size.height,
            props: ItemProps::defaults_for(kind),
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.props.kind()
    }

    /// Bounding rectangle in canvas coordinates.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(Point::new(self.x, self.y), Size::new(self.w, self.h))
    }

    /// Overwrite the geometry from a rectangle.
    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x0;
        self.y = rect.y0;
        self.w = rect.width();
        self.h = rect.height();
    }

    /// Check if a canvas point lies inside this item.
    pub fn hit_test(&self, point: Point) -> bool {
        self.rect().contains(point)
    }

    /// Give this item a fresh identifier.
    pub fn regenerate_id(&mut self) {
        self.id = mint_id();
    }
}

impl From<Value> for Item {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => normalize(&map),
            _ => normalize(&Map::new()),
        }
    }
}

/// Serialized shape of an item: `{ id, type, x, y, w, h, props }`.
#[derive(Serialize)]
struct StoredItem {
    id: ItemId,
    #[serde(rename = "type")]
    kind: ItemKind,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    props: Map<String, Value>,
}

impl From<Item> for StoredItem {
    fn from(item: Item) -> Self {
        Self {
            kind: item.kind(),
            props: item.props.to_bag(),
            id: item.id,
            x: item.x,
            y: item.y,
            w: item.w,
            h: item.h,
        }
    }
}

fn mint_id() -> ItemId {
    format!("it-{}", Uuid::new_v4().simple())
}

/// Create an item from a palette type name.
///
/// Fails only when `kind` is outside the closed set of kinds.
pub fn create_item(kind: &str, x: f64, y: f64) -> Result<Item, ItemError> {
    let kind: ItemKind = kind.parse()?;
    Ok(Item::new(kind, x, y))
}

/// Default props for a kind.
pub fn default_props_for(kind: ItemKind) -> ItemProps {
    ItemProps::defaults_for(kind)
}

/// Infer a kind from which property keys are present.
///
/// Priority: `html` (text), `src` (image), `label` (button), `img` with
/// `title` (card), `url` (video); anything else is text.
pub fn infer_type(props: Option<&Map<String, Value>>) -> ItemKind {
    let Some(props) = props else {
        return ItemKind::Text;
    };
    if props.contains_key("html") {
        ItemKind::Text
    } else if props.contains_key("src") {
        ItemKind::Image
    } else if props.contains_key("label") {
        ItemKind::Button
    } else if props.contains_key("img") && props.contains_key("title") {
        ItemKind::Card
    } else if props.contains_key("url") {
        ItemKind::Video
    } else {
        ItemKind::Text
    }
}

/// Turn an untrusted stored item into a fully populated [`Item`].
///
/// An explicit, known `type` wins; otherwise the kind is inferred from the
/// props. Missing ids are minted, missing geometry falls back to the origin
/// and the kind's default size, and sizes are floored at the minimum.
pub fn normalize(raw: &Map<String, Value>) -> Item {
    let props = raw.get("props").and_then(Value::as_object);
    let kind = match raw.get("type").and_then(Value::as_str) {
        Some(name) => name.parse().unwrap_or_else(|_| {
            log::warn!("Unknown item type {name:?}, inferring from props");
            infer_type(props)
        }),
        None => infer_type(props),
    };

    let id = match raw.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => mint_id(),
    };

    let number = |key: &str| raw.get(key).and_then(Value::as_f64);
    let size = kind.default_size();

    Item {
        id,
        x: number("x").unwrap_or(0.0),
        y: number("y").unwrap_or(0.0),
        w: number("w").unwrap_or(size.width).max(MIN_SIZE),
        h: number("h").unwrap_or(size.height).max(MIN_SIZE),
        props: match props {
            Some(bag) => ItemProps::from_bag(kind, bag),
            None => ItemProps::defaults_for(kind),
        },
    }
}
