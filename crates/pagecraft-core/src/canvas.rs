//! Page document and canvas interaction state.

use crate::data_url::{image_data_url, is_remote_image_url};
use crate::items::{Item, ItemId, ItemKind, ItemProps, PropsPatch};
use crate::selection::{
    Gesture, GestureKind, Handle, PressTarget, ResizeDir, get_handles, hit_test_handles,
};
use crate::snap::{UNBOUNDED, snap};
use kurbo::{Point, Rect, Size};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Why a props patch was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("No item with id {0}")]
    UnknownItem(ItemId),
    #[error("Props must be a JSON object")]
    NotAnObject,
    #[error("Unknown or invalid {kind} props: {}", .keys.join(", "))]
    Rejected { kind: ItemKind, keys: Vec<String> },
}

/// Canvas background used when none is stored.
pub const DEFAULT_CANVAS_BG: &str = "#ffffff";

/// The page being edited: ordered items plus canvas settings.
///
/// Items are kept back to front, so later items paint on top.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument {
    /// Items in paint order (back to front).
    pub items: Vec<Item>,
    /// Dark editor chrome.
    pub dark: bool,
    /// Canvas background color.
    pub canvas_bg: String,
    /// Show the dot grid on the canvas.
    pub show_grid: bool,
}

impl Default for PageDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Geometry fields to overwrite; `None` leaves a field as is.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeometryPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
}

impl GeometryPatch {
    /// Overwrite all four fields from a rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x: Some(rect.x0),
            y: Some(rect.y0),
            w: Some(rect.width()),
            h: Some(rect.height()),
        }
    }

    fn apply(&self, item: &mut Item) {
        if let Some(x) = self.x {
            item.x = x;
        }
        if let Some(y) = self.y {
            item.y = y;
        }
        if let Some(w) = self.w {
            item.w = w;
        }
        if let Some(h) = self.h {
            item.h = h;
        }
    }
}

impl PageDocument {
    /// Create an empty page with default settings.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            dark: true,
            canvas_bg: DEFAULT_CANVAS_BG.to_string(),
            show_grid: true,
        }
    }

    /// Add an item on top of the others.
    ///
    /// An item whose id is already taken gets a fresh one. Returns the id the
    /// item was stored under.
    pub fn add_item(&mut self, mut item: Item) -> ItemId {
        while self.contains(&item.id) {
            log::debug!("Item id {} already in use, minting a new one", item.id);
            item.regenerate_id();
        }
        let id = item.id.clone();
        self.items.push(item);
        id
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Get an item by ID.
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Get a mutable reference to an item by ID.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Overwrite the given geometry and shallow-merge the given props.
    ///
    /// Returns false, changing nothing, when no item has this id.
    pub fn patch_item(
        &mut self,
        id: &str,
        geometry: Option<GeometryPatch>,
        props: Option<&PropsPatch>,
    ) -> bool {
        let Some(item) = self.get_mut(id) else {
            return false;
        };
        if let Some(geometry) = geometry {
            geometry.apply(item);
        }
        if let Some(props) = props {
            item.props.merge(props);
        }
        true
    }

    /// Remove an item, returning it if it existed.
    pub fn remove_item(&mut self, id: &str) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Remove every item. Canvas settings are kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Bring an item to the front (topmost).
    pub fn bring_to_front(&mut self, id: &str) {
        if let Some(item) = self.remove_item(id) {
            self.items.push(item);
        }
    }

    /// Send an item to the back (bottommost).
    pub fn send_to_back(&mut self, id: &str) {
        if let Some(item) = self.remove_item(id) {
            self.items.insert(0, item);
        }
    }

    /// Get the bounding box of all items.
    pub fn bounds(&self) -> Option<Rect> {
        self.items
            .iter()
            .map(Item::rect)
            .reduce(|acc, rect| acc.union(rect))
    }

    /// Find items at a canvas point, front to back.
    pub fn items_at_point(&self, point: Point) -> Vec<ItemId> {
        self.items
            .iter()
            .rev()
            .filter(|item| item.hit_test(point))
            .map(|item| item.id.clone())
            .collect()
    }

    /// The front-most item under a canvas point.
    pub fn item_at_point(&self, point: Point) -> Option<&Item> {
        self.items.iter().rev().find(|item| item.hit_test(point))
    }

    /// Point an image's `src` or a card's `img` at `source`.
    ///
    /// Returns false for other kinds and unknown ids.
    pub fn set_image_source(&mut self, id: &str, source: &str) -> bool {
        let Some(item) = self.get_mut(id) else {
            return false;
        };
        match &mut item.props {
            ItemProps::Image(props) => props.src = source.to_string(),
            ItemProps::Card(props) => props.img = source.to_string(),
            ItemProps::Text(_) | ItemProps::Button(_) | ItemProps::Video(_) => return false,
        }
        true
    }

    /// Set a video's url from user input, normalizing share links.
    pub fn set_video_url(&mut self, id: &str, input: &str) -> bool {
        match self.get_mut(id).map(|item| &mut item.props) {
            Some(ItemProps::Video(props)) => {
                props.set_url(input);
                true
            }
            _ => false,
        }
    }

    pub fn set_canvas_bg(&mut self, color: impl Into<String>) {
        self.canvas_bg = color.into();
    }

    pub fn toggle_dark(&mut self) {
        self.dark = !self.dark;
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    /// Check if the page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Items can be selected, moved, resized and edited.
    #[default]
    Design,
    /// Read-only rendering; no selection or gestures.
    Preview,
}

/// UI state of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemState {
    #[default]
    Idle,
    /// Selected: shows the ring and resize handles.
    Selected,
    /// Selected text item whose rich-text surface is live.
    Editing,
}

impl ItemState {
    pub fn is_selected(self) -> bool {
        matches!(self, ItemState::Selected | ItemState::Editing)
    }
}

/// Interaction controller for the canvas.
///
/// Owns the document and mediates every pointer event into document
/// mutations. Methods that change the document return whether they did, so
/// the host knows when to persist.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The page being edited.
    pub document: PageDocument,
    /// Client size of the canvas element, used for clamping.
    pub container_size: Size,
    /// Client position of the canvas element's top-left corner.
    pub canvas_origin: Point,
    selected: Option<ItemId>,
    mode: Mode,
    gesture: Option<Gesture>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a canvas with an empty document.
    pub fn new() -> Self {
        Self::with_document(PageDocument::new())
    }

    /// Create a canvas with an existing document.
    pub fn with_document(document: PageDocument) -> Self {
        Self {
            document,
            container_size: UNBOUNDED,
            canvas_origin: Point::ZERO,
            selected: None,
            mode: Mode::Design,
            gesture: None,
        }
    }

    /// Set the canvas element's client size.
    pub fn set_container_size(&mut self, width: f64, height: f64) {
        self.container_size = Size::new(width, height);
    }

    /// Set the canvas element's client position.
    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.canvas_origin = origin;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch modes. Entering preview drops the selection and any gesture.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == Mode::Preview {
            self.gesture = None;
            self.selected = None;
        }
        self.mode = mode;
    }

    /// The selected item's id, if any.
    pub fn selected(&self) -> Option<&ItemId> {
        self.selected.as_ref()
    }

    /// The selected item, if any.
    pub fn selected_item(&self) -> Option<&Item> {
        self.selected.as_deref().and_then(|id| self.document.get(id))
    }

    /// Select an item. Ignored in preview mode or for unknown ids.
    pub fn select(&mut self, id: &str) {
        if self.mode == Mode::Design && self.document.contains(id) {
            self.selected = Some(id.to_string());
        }
    }

    /// Clear selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Check if an item is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Get the UI state for an item.
    pub fn item_state(&self, id: &str) -> ItemState {
        if self.mode != Mode::Design || !self.is_selected(id) {
            return ItemState::Idle;
        }
        match self.document.get(id).map(Item::kind) {
            Some(ItemKind::Text) => ItemState::Editing,
            Some(_) => ItemState::Selected,
            None => ItemState::Idle,
        }
    }

    /// Whether a gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    /// Press on the empty canvas: clears the selection in design mode.
    pub fn pointer_down_canvas(&mut self) {
        if self.mode == Mode::Design {
            self.clear_selection();
        }
    }

    /// Press on an item at a canvas point.
    ///
    /// Selects the item and, unless the press landed on an editable or
    /// interactive target, starts a move gesture. Returns whether a gesture
    /// started.
    pub fn pointer_down_item(&mut self, id: &str, target: PressTarget, point: Point) -> bool {
        if self.mode != Mode::Design {
            return false;
        }
        let Some(rect) = self.document.get(id).map(Item::rect) else {
            return false;
        };
        self.selected = Some(id.to_string());
        if target.suppresses_drag() {
            return false;
        }
        self.gesture = Some(Gesture::new(id.to_string(), GestureKind::Move, point, rect));
        true
    }

    /// Press on a resize handle of the selected item. Returns whether a
    /// gesture started.
    pub fn pointer_down_handle(&mut self, dir: ResizeDir, point: Point) -> bool {
        if self.mode != Mode::Design {
            return false;
        }
        let Some(item) = self.selected_item() else {
            return false;
        };
        let gesture = Gesture::new(item.id.clone(), GestureKind::Resize(dir), point, item.rect());
        self.gesture = Some(gesture);
        true
    }

    /// Press at a canvas point, routed to a handle, an item or the canvas.
    ///
    /// Items are hit front-most first. Returns whether a gesture started.
    pub fn pointer_down(&mut self, point: Point, target: PressTarget) -> bool {
        if let Some(dir) = self.handle_at(point) {
            return self.pointer_down_handle(dir, point);
        }
        match self.document.item_at_point(point).map(|item| item.id.clone()) {
            Some(id) => self.pointer_down_item(&id, target, point),
            None => {
                self.pointer_down_canvas();
                false
            }
        }
    }

    /// Pointer moved. Recomputes the gesture's rectangle from its start and
    /// writes it to the document.
    pub fn pointer_move(&mut self, point: Point) -> Option<Rect> {
        let gesture = self.gesture.as_mut()?;
        let rect = gesture.update(point, self.container_size);
        let id = gesture.item_id.clone();
        if !self.document.patch_item(&id, Some(GeometryPatch::from_rect(rect)), None) {
            // The item vanished mid-gesture.
            self.gesture = None;
            return None;
        }
        Some(rect)
    }

    /// Pointer released. Ends the gesture; returns whether one was active.
    pub fn pointer_up(&mut self) -> bool {
        self.gesture.take().is_some()
    }

    /// Abandon the gesture, restoring the item's rectangle from its start.
    pub fn cancel_gesture(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            let patch = GeometryPatch::from_rect(gesture.start_rect);
            self.document.patch_item(&gesture.item_id, Some(patch), None);
        }
    }

    /// Resize handles for the selected item (design mode only).
    pub fn handles(&self) -> Vec<Handle> {
        match (self.mode, self.selected_item()) {
            (Mode::Design, Some(item)) => get_handles(item.rect()),
            _ => Vec::new(),
        }
    }

    /// The handle of the selected item under a canvas point.
    pub fn handle_at(&self, point: Point) -> Option<ResizeDir> {
        match (self.mode, self.selected_item()) {
            (Mode::Design, Some(item)) => hit_test_handles(item.rect(), point),
            _ => None,
        }
    }

    /// Convert a client point to canvas coordinates.
    pub fn client_to_canvas(&self, client: Point) -> Point {
        Point::new(client.x - self.canvas_origin.x, client.y - self.canvas_origin.y)
    }

    /// Drop a palette entry at a client point: creates a snapped item with
    /// default size and props and selects it.
    pub fn drop_palette(&mut self, kind: ItemKind, client: Point) -> Option<ItemId> {
        if self.mode != Mode::Design {
            return None;
        }
        let point = self.client_to_canvas(client);
        let item = Item::new(kind, snap(point.x), snap(point.y));
        let id = self.document.add_item(item);
        log::debug!("Dropped {kind} item {id}");
        self.selected = Some(id.clone());
        Some(id)
    }

    /// Shallow-merge props into the selected item.
    pub fn patch_selected(&mut self, props: &PropsPatch) -> bool {
        match self.selected.clone() {
            Some(id) => self.document.patch_item(&id, None, Some(props)),
            None => false,
        }
    }

    /// Delete the selected item.
    pub fn delete_selected(&mut self) -> Option<Item> {
        let id = self.selected.take()?;
        if self.gesture.as_ref().is_some_and(|g| g.item_id == id) {
            self.gesture = None;
        }
        self.document.remove_item(&id)
    }

    /// Remove every item, keeping canvas settings.
    pub fn clear_all(&mut self) {
        self.gesture = None;
        self.selected = None;
        self.document.clear();
    }

    /// Attach image file bytes to an image or card item as a data URL.
    ///
    /// Returns false when the bytes are not a recognized image or the item
    /// cannot hold one.
    pub fn attach_image(&mut self, id: &str, data: &[u8], name: Option<&Path>) -> bool {
        let Some(url) = image_data_url(data, name) else {
            log::warn!("Ignoring attachment for {id}: not a recognized image");
            return false;
        };
        self.document.set_image_source(id, &url)
    }

    /// Use pasted text as an image source if it is a remote URL.
    pub fn paste_image_url(&mut self, id: &str, text: &str) -> bool {
        let text = text.trim();
        if !is_remote_image_url(text) {
            return false;
        }
        self.document.set_image_source(id, text)
    }

    /// Apply a props patch given as a JSON value.
    ///
    /// All or nothing: if any key is unknown to the item's kind or has a value
    /// of the wrong shape, the item is left unchanged.
    pub fn patch_props_value(&mut self, id: &str, value: Value) -> Result<(), PatchError> {
        let Value::Object(props) = value else {
            return Err(PatchError::NotAnObject);
        };
        let item = self
            .document
            .get(id)
            .ok_or_else(|| PatchError::UnknownItem(id.to_string()))?;
        let rejected = item.props.rejected_keys(&props);
        if !rejected.is_empty() {
            return Err(PatchError::Rejected {
                kind: item.kind(),
                keys: rejected,
            });
        }
        self.document.patch_item(id, None, Some(&props));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ButtonVariant, ImageProps};
    use serde_json::json;

    fn canvas_with(kind: ItemKind, x: f64, y: f64) -> (Canvas, ItemId) {
        let mut canvas = Canvas::new();
        let id = canvas.document.add_item(Item::new(kind, x, y));
        (canvas, id)
    }

    #[test]
    fn test_new_document_defaults() {
        let doc = PageDocument::new();
        assert!(doc.is_empty());
        assert!(doc.dark);
        assert!(doc.show_grid);
        assert_eq!(doc.canvas_bg, "#ffffff");
    }

    #[test]
    fn test_drop_palette_snaps_and_selects() {
        let mut canvas = Canvas::new();
        canvas.set_canvas_origin(Point::new(20.0, 20.0));
        let id = canvas
            .drop_palette(ItemKind::Button, Point::new(140.0, 100.0))
            .unwrap();

        let item = canvas.document.get(&id).unwrap();
        assert_eq!((item.x, item.y, item.w, item.h), (120.0, 80.0, 160.0, 56.0));
        match &item.props {
            ItemProps::Button(props) => assert_eq!(props.variant, ButtonVariant::Primary),
            other => panic!("Expected button props, got {other:?}"),
        }
        assert!(canvas.is_selected(&id));
    }

    #[test]
    fn test_add_item_reassigns_duplicate_id() {
        let mut doc = PageDocument::new();
        let mut a = Item::new(ItemKind::Text, 0.0, 0.0);
        a.id = "same".to_string();
        let b = a.clone();
        assert_eq!(doc.add_item(a), "same");
        assert_ne!(doc.add_item(b), "same");
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_patch_item() {
        let (mut canvas, id) = canvas_with(ItemKind::Button, 0.0, 0.0);
        let props = match json!({"label": "Buy"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let geometry = GeometryPatch { x: Some(64.0), ..Default::default() };
        assert!(canvas.document.patch_item(&id, Some(geometry), Some(&props)));

        let item = canvas.document.get(&id).unwrap();
        assert_eq!(item.x, 64.0);
        assert_eq!(item.w, 160.0);
        match &item.props {
            ItemProps::Button(props) => {
                assert_eq!(props.label, "Buy");
                assert_eq!(props.href, "#");
            }
            other => panic!("Expected button props, got {other:?}"),
        }
    }

    #[test]
    fn test_patch_unknown_id_is_noop() {
        let (mut canvas, _) = canvas_with(ItemKind::Text, 0.0, 0.0);
        let before = canvas.document.clone();
        assert!(!canvas.document.patch_item("missing", Some(GeometryPatch::default()), None));
        assert_eq!(canvas.document, before);
        assert!(canvas.document.remove_item("missing").is_none());
    }

    #[test]
    fn test_move_gesture() {
        let (mut canvas, id) = canvas_with(ItemKind::Button, 120.0, 80.0);
        canvas.set_container_size(800.0, 600.0);

        assert!(canvas.pointer_down_item(&id, PressTarget::Surface, Point::new(130.0, 90.0)));
        assert!(canvas.is_dragging());
        canvas.pointer_move(Point::new(150.0, 95.0));
        let rect = canvas.pointer_move(Point::new(143.0, 85.0)).unwrap();
        assert!(canvas.pointer_up());

        assert_eq!((rect.x0, rect.y0), (136.0, 72.0));
        let item = canvas.document.get(&id).unwrap();
        assert_eq!((item.x, item.y, item.w, item.h), (136.0, 72.0, 160.0, 56.0));
        assert!(!canvas.is_dragging());
        assert!(!canvas.pointer_up());
    }

    #[test]
    fn test_resize_gesture_through_handle() {
        let (mut canvas, id) = canvas_with(ItemKind::Card, 0.0, 0.0);
        canvas.set_container_size(1200.0, 800.0);
        canvas.select(&id);

        let corner = Point::new(420.0, 260.0);
        assert_eq!(canvas.handle_at(corner), Some(ResizeDir::Se));
        assert!(canvas.pointer_down(corner, PressTarget::Surface));
        canvas.pointer_move(Point::new(433.0, 257.0));
        canvas.pointer_up();

        let item = canvas.document.get(&id).unwrap();
        assert_eq!((item.x, item.y, item.w, item.h), (0.0, 0.0, 432.0, 256.0));
    }

    #[test]
    fn test_editable_press_selects_without_drag() {
        let (mut canvas, id) = canvas_with(ItemKind::Text, 0.0, 0.0);
        assert!(!canvas.pointer_down_item(&id, PressTarget::Editable, Point::new(10.0, 10.0)));
        assert!(canvas.is_selected(&id));
        assert!(!canvas.is_dragging());
        assert_eq!(canvas.item_state(&id), ItemState::Editing);
    }

    #[test]
    fn test_press_on_empty_canvas_clears_selection() {
        let (mut canvas, id) = canvas_with(ItemKind::Image, 0.0, 0.0);
        canvas.select(&id);
        assert!(!canvas.pointer_down(Point::new(700.0, 500.0), PressTarget::Surface));
        assert!(canvas.selected().is_none());
    }

    #[test]
    fn test_preview_mode_blocks_interaction() {
        let (mut canvas, id) = canvas_with(ItemKind::Image, 0.0, 0.0);
        canvas.select(&id);
        canvas.set_mode(Mode::Preview);

        assert!(canvas.selected().is_none());
        assert!(!canvas.pointer_down_item(&id, PressTarget::Surface, Point::new(10.0, 10.0)));
        canvas.select(&id);
        assert!(canvas.selected().is_none());
        assert!(canvas.handles().is_empty());
        assert_eq!(canvas.item_state(&id), ItemState::Idle);
        assert!(canvas.drop_palette(ItemKind::Text, Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_handles_only_for_selected_item() {
        let (mut canvas, id) = canvas_with(ItemKind::Video, 0.0, 0.0);
        assert!(canvas.handles().is_empty());
        canvas.select(&id);
        assert_eq!(canvas.handles().len(), 8);
        assert_eq!(canvas.item_state(&id), ItemState::Selected);
    }

    #[test]
    fn test_cancel_gesture_restores_start() {
        let (mut canvas, id) = canvas_with(ItemKind::Button, 40.0, 40.0);
        canvas.pointer_down_item(&id, PressTarget::Surface, Point::new(50.0, 50.0));
        canvas.pointer_move(Point::new(250.0, 250.0));
        canvas.cancel_gesture();
        let item = canvas.document.get(&id).unwrap();
        assert_eq!((item.x, item.y), (40.0, 40.0));
        assert!(!canvas.is_dragging());
    }

    #[test]
    fn test_delete_selected() {
        let (mut canvas, id) = canvas_with(ItemKind::Text, 0.0, 0.0);
        canvas.select(&id);
        let removed = canvas.delete_selected().unwrap();
        assert_eq!(removed.id, id);
        assert!(canvas.document.is_empty());
        assert!(canvas.selected().is_none());
        assert!(canvas.delete_selected().is_none());
    }

    #[test]
    fn test_clear_all_keeps_settings() {
        let (mut canvas, id) = canvas_with(ItemKind::Text, 0.0, 0.0);
        canvas.document.toggle_dark();
        canvas.document.set_canvas_bg("#000000");
        canvas.select(&id);
        canvas.clear_all();

        assert!(canvas.document.is_empty());
        assert!(canvas.selected().is_none());
        assert!(!canvas.document.dark);
        assert_eq!(canvas.document.canvas_bg, "#000000");
    }

    #[test]
    fn test_z_order() {
        let mut doc = PageDocument::new();
        let back = doc.add_item(Item::new(ItemKind::Image, 0.0, 0.0));
        let front = doc.add_item(Item::new(ItemKind::Image, 40.0, 40.0));
        let inside_both = Point::new(60.0, 60.0);

        assert_eq!(doc.item_at_point(inside_both).unwrap().id, front);
        assert_eq!(doc.items_at_point(inside_both), vec![front.clone(), back.clone()]);

        doc.bring_to_front(&back);
        assert_eq!(doc.item_at_point(inside_both).unwrap().id, back);
        doc.send_to_back(&back);
        assert_eq!(doc.items[0].id, back);
        assert!(doc.item_at_point(Point::new(900.0, 900.0)).is_none());
    }

    #[test]
    fn test_bounds() {
        let mut doc = PageDocument::new();
        assert!(doc.bounds().is_none());
        doc.add_item(Item::new(ItemKind::Button, 40.0, 40.0));
        doc.add_item(Item::new(ItemKind::Button, 400.0, 200.0));
        assert_eq!(doc.bounds(), Some(Rect::new(40.0, 40.0, 560.0, 256.0)));
    }

    #[test]
    fn test_attach_image_to_card_and_image() {
        let mut canvas = Canvas::new();
        let card = canvas.document.add_item(Item::new(ItemKind::Card, 0.0, 0.0));
        let image = canvas.document.add_item(Item::new(ItemKind::Image, 0.0, 0.0));
        let button = canvas.document.add_item(Item::new(ItemKind::Button, 0.0, 0.0));
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

        assert!(canvas.attach_image(&card, &png, None));
        assert!(canvas.attach_image(&image, &png, None));
        assert!(!canvas.attach_image(&button, &png, None));
        assert!(!canvas.attach_image(&image, b"plain text", None));

        match &canvas.document.get(&card).unwrap().props {
            ItemProps::Card(props) => assert!(props.img.starts_with("data:image/png;base64,")),
            other => panic!("Expected card props, got {other:?}"),
        }
    }

    #[test]
    fn test_paste_image_url_requires_http() {
        let (mut canvas, id) = canvas_with(ItemKind::Image, 0.0, 0.0);
        assert!(!canvas.paste_image_url(&id, "file:///etc/passwd"));
        assert!(canvas.paste_image_url(&id, " https://example.com/cat.png "));
        assert_eq!(
            canvas.document.get(&id).unwrap().props,
            ItemProps::Image(ImageProps {
                src: "https://example.com/cat.png".to_string(),
                ..ImageProps::default()
            })
        );
    }

    #[test]
    fn test_patch_props_value_is_all_or_nothing() {
        let (mut canvas, id) = canvas_with(ItemKind::Text, 0.0, 0.0);
        let before = canvas.document.clone();

        let result = canvas.patch_props_value(&id, json!({"fontSize": "24", "padding": 20}));
        assert_eq!(
            result,
            Err(PatchError::Rejected {
                kind: ItemKind::Text,
                keys: vec!["fontSize".to_string()]
            })
        );
        assert_eq!(canvas.document, before);

        assert_eq!(canvas.patch_props_value(&id, json!([1])), Err(PatchError::NotAnObject));
        assert_eq!(
            canvas.patch_props_value("missing", json!({})),
            Err(PatchError::UnknownItem("missing".to_string()))
        );

        assert_eq!(canvas.patch_props_value(&id, json!({"fontSize": 24})), Ok(()));
        match &canvas.document.get(&id).unwrap().props {
            ItemProps::Text(props) => assert_eq!(props.font_size, 24.0),
            other => panic!("Expected text props, got {other:?}"),
        }
    }

    #[test]
    fn test_set_video_url() {
        let (mut canvas, id) = canvas_with(ItemKind::Video, 0.0, 0.0);
        assert!(canvas.document.set_video_url(&id, "https://youtu.be/dQw4w9WgXcQ"));
        match &canvas.document.get(&id).unwrap().props {
            ItemProps::Video(props) => {
                assert_eq!(props.url, "https://www.youtube.com/embed/dQw4w9WgXcQ")
            }
            other => panic!("Expected video props, got {other:?}"),
        }
    }
}
