//! Selection handles and pointer gestures.
//!
//! A gesture captures the item's rectangle once, on press. Every pointer move
//! recomputes the result from that start rectangle plus the cumulative delta,
//! so snapping never accumulates drift.

use crate::items::ItemId;
use crate::snap::{clamp_to_container, snap, snap_size};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Handle size in screen pixels.
pub const HANDLE_SIZE: f64 = 12.0;

/// Direction a resize handle drags in.
///
/// Each letter names an active edge: `N` and `W` are the leading edges and
/// move the origin, `S` and `E` only change the size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeDir {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl ResizeDir {
    /// All directions, corners first.
    pub const ALL: [ResizeDir; 8] = [
        ResizeDir::Nw,
        ResizeDir::Ne,
        ResizeDir::Se,
        ResizeDir::Sw,
        ResizeDir::N,
        ResizeDir::E,
        ResizeDir::S,
        ResizeDir::W,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResizeDir::N => "n",
            ResizeDir::S => "s",
            ResizeDir::E => "e",
            ResizeDir::W => "w",
            ResizeDir::Ne => "ne",
            ResizeDir::Nw => "nw",
            ResizeDir::Se => "se",
            ResizeDir::Sw => "sw",
        }
    }

    fn has_north(self) -> bool {
        matches!(self, ResizeDir::N | ResizeDir::Ne | ResizeDir::Nw)
    }

    fn has_south(self) -> bool {
        matches!(self, ResizeDir::S | ResizeDir::Se | ResizeDir::Sw)
    }

    fn has_east(self) -> bool {
        matches!(self, ResizeDir::E | ResizeDir::Ne | ResizeDir::Se)
    }

    fn has_west(self) -> bool {
        matches!(self, ResizeDir::W | ResizeDir::Nw | ResizeDir::Sw)
    }

    /// CSS cursor shown over this handle.
    pub fn cursor(self) -> &'static str {
        match self {
            ResizeDir::Nw | ResizeDir::Se => "nwse-resize",
            ResizeDir::Ne | ResizeDir::Sw => "nesw-resize",
            ResizeDir::N | ResizeDir::S => "ns-resize",
            ResizeDir::E | ResizeDir::W => "ew-resize",
        }
    }

    /// Handle anchor as fractions of the item's width and height.
    fn anchor(self) -> (f64, f64) {
        match self {
            ResizeDir::Nw => (0.0, 0.0),
            ResizeDir::N => (0.5, 0.0),
            ResizeDir::Ne => (1.0, 0.0),
            ResizeDir::E => (1.0, 0.5),
            ResizeDir::Se => (1.0, 1.0),
            ResizeDir::S => (0.5, 1.0),
            ResizeDir::Sw => (0.0, 1.0),
            ResizeDir::W => (0.0, 0.5),
        }
    }
}

impl fmt::Display for ResizeDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized resize direction string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown resize direction: {0}")]
pub struct UnknownResizeDir(pub String);

impl FromStr for ResizeDir {
    type Err = UnknownResizeDir;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResizeDir::ALL
            .into_iter()
            .find(|dir| dir.as_str() == s)
            .ok_or_else(|| UnknownResizeDir(s.to_string()))
    }
}

/// What a gesture does to its item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Drag the whole item.
    Move,
    /// Drag one resize handle.
    Resize(ResizeDir),
}

/// A resize handle with its position in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub position: Point,
    pub dir: ResizeDir,
}

impl Handle {
    pub fn new(position: Point, dir: ResizeDir) -> Self {
        Self { position, dir }
    }

    /// Check if a canvas point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point.x - self.position.x).abs() <= tolerance
            && (point.y - self.position.y).abs() <= tolerance
    }
}

/// Handles for an item's rectangle, one per resize direction.
pub fn get_handles(rect: Rect) -> Vec<Handle> {
    ResizeDir::ALL
        .into_iter()
        .map(|dir| {
            let (fx, fy) = dir.anchor();
            let position = Point::new(rect.x0 + rect.width() * fx, rect.y0 + rect.height() * fy);
            Handle::new(position, dir)
        })
        .collect()
}

/// Find which handle (if any) is under a canvas point.
pub fn hit_test_handles(rect: Rect, point: Point) -> Option<ResizeDir> {
    get_handles(rect)
        .into_iter()
        .find(|handle| handle.hit_test(point, HANDLE_SIZE / 2.0))
        .map(|handle| handle.dir)
}

/// Apply a gesture to a start rectangle.
///
/// Pure: the same inputs always give the same rectangle. The result is snapped
/// to the grid, at least [`crate::snap::MIN_SIZE`] in each dimension, and
/// clamped into `container`.
pub fn apply_gesture(start: Rect, kind: GestureKind, delta: Vec2, container: Size) -> Rect {
    let proposed = match kind {
        GestureKind::Move => Rect::from_origin_size(
            Point::new(snap(start.x0 + delta.x), snap(start.y0 + delta.y)),
            start.size(),
        ),
        GestureKind::Resize(dir) => {
            let (mut x, mut y) = (start.x0, start.y0);
            let (mut w, mut h) = (start.width(), start.height());
            if dir.has_east() {
                w = start.width() + delta.x;
            }
            if dir.has_south() {
                h = start.height() + delta.y;
            }
            if dir.has_west() {
                w = start.width() - delta.x;
                x = start.x0 + delta.x;
            }
            if dir.has_north() {
                h = start.height() - delta.y;
                y = start.y0 + delta.y;
            }
            Rect::from_origin_size(Point::new(snap(x), snap(y)), snap_size(w, h))
        }
    };
    clamp_to_container(proposed, container)
}

/// Where a press landed inside an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressTarget {
    /// The item's own surface.
    #[default]
    Surface,
    /// An editable region, such as the rich-text surface.
    Editable,
    /// An interactive control: link, button, input, file picker.
    Control,
}

impl PressTarget {
    /// Presses on editable or interactive targets never start a drag.
    pub fn suppresses_drag(self) -> bool {
        !matches!(self, PressTarget::Surface)
    }
}

/// An active pointer gesture on one item.
///
/// Owned by the canvas from press to release; at most one exists at a time.
#[derive(Debug, Clone)]
pub struct Gesture {
    /// The item being manipulated.
    pub item_id: ItemId,
    /// Move or resize.
    pub kind: GestureKind,
    /// Pointer position at press.
    pub start_point: Point,
    /// Latest pointer position.
    pub current_point: Point,
    /// Item rectangle at press.
    pub start_rect: Rect,
}

impl Gesture {
    pub fn new(item_id: ItemId, kind: GestureKind, start_point: Point, start_rect: Rect) -> Self {
        Self {
            item_id,
            kind,
            start_point,
            current_point: start_point,
            start_rect,
        }
    }

    /// Cumulative pointer delta since press.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }

    /// Record a new pointer position and compute the item's rectangle for it.
    pub fn update(&mut self, point: Point, container: Size) -> Rect {
        self.current_point = point;
        apply_gesture(self.start_rect, self.kind, self.delta(), container)
    }
}
