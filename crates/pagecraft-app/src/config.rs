//! Application configuration.

use crate::cli::Cli;
use kurbo::{Point, Size};
use pagecraft_core::storage::STORAGE_KEY;
use std::path::PathBuf;

/// Settings for one run of the app.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory for the saved page; `None` uses the platform default.
    pub store_dir: Option<PathBuf>,
    /// Storage key of the saved page.
    pub storage_key: String,
    /// Canvas client size, used to clamp gestures.
    pub container: Size,
    /// Canvas client position, used for drop coordinates.
    pub canvas_origin: Point,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_dir: None,
            storage_key: STORAGE_KEY.to_string(),
            container: Size::new(1280.0, 800.0),
            canvas_origin: Point::ZERO,
        }
    }
}

impl From<&Cli> for AppConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            store_dir: cli.store.clone(),
            container: Size::new(cli.width, cli.height),
            canvas_origin: Point::new(cli.origin_x, cli.origin_y),
            ..Self::default()
        }
    }
}
