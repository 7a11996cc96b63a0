//! Pagecraft Core Library
//!
//! Platform-agnostic document model, geometry and persistence for the
//! Pagecraft page builder.

pub mod canvas;
pub mod color;
pub mod data_url;
pub mod items;
pub mod json;
pub mod selection;
pub mod snap;
pub mod storage;
pub mod video;

pub use canvas::{Canvas, GeometryPatch, ItemState, Mode, PageDocument, PatchError};
pub use color::to_six_hex;
pub use items::{Item, ItemError, ItemId, ItemKind, ItemProps, PropsPatch, create_item, normalize};
pub use json::ParseError;
pub use selection::{Gesture, GestureKind, Handle, PressTarget, ResizeDir};
pub use snap::{GRID_SIZE, MIN_SIZE, clamp_to_container, snap};
pub use video::normalize_video_url;
