//! Core application state and command handling.

use crate::cli::{Command, ExportFormat};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use kurbo::{Point, Vec2};
use pagecraft_core::canvas::{Canvas, Mode};
use pagecraft_core::color::to_six_hex;
use pagecraft_core::items::{ItemKind, ItemProps};
use pagecraft_core::selection::{PressTarget, ResizeDir, get_handles};
use pagecraft_core::storage::{AutoSave, FileStorage, Storage};
use pagecraft_core::{PatchError, json, normalize_video_url};
use pagecraft_render::{CanvasMarkupRenderer, RenderContext, Renderer, StaticHtmlRenderer};
use std::fmt::Write;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Main application struct.
///
/// Holds the canvas and persists the page after every command that changes
/// it.
pub struct App<S: Storage> {
    canvas: Canvas,
    autosave: AutoSave<S>,
    config: AppConfig,
}

impl App<FileStorage> {
    /// Open the page stored in the configured directory.
    pub fn open(config: AppConfig) -> AppResult<Self> {
        let storage = match &config.store_dir {
            Some(dir) => FileStorage::new(dir.clone())?,
            None => FileStorage::default_location()?,
        };
        log::info!("Using page store at {}", storage.base_path().display());
        Ok(Self::with_storage(config, Arc::new(storage)))
    }
}

impl<S: Storage> App<S> {
    /// Create an app over any storage backend, restoring the saved page.
    pub fn with_storage(config: AppConfig, storage: Arc<S>) -> Self {
        let autosave = AutoSave::with_key(storage, config.storage_key.clone());
        let mut canvas = Canvas::with_document(autosave.restore());
        canvas.container_size = config.container;
        canvas.canvas_origin = config.canvas_origin;
        Self {
            canvas,
            autosave,
            config,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Record a mutation; the page is written once the command finishes.
    fn commit(&mut self) {
        self.autosave.mark_dirty();
    }

    fn require_item(&self, id: &str) -> AppResult<()> {
        if self.canvas.document.contains(id) {
            Ok(())
        } else {
            Err(AppError::UnknownItem(id.to_string()))
        }
    }

    /// Run one command and return what it prints.
    ///
    /// A changed page is persisted even when the command fails part way.
    /// Persistence failures are logged, never returned.
    pub fn execute(&mut self, command: Command) -> AppResult<String> {
        let result = self.dispatch(command);
        self.autosave.persist_if_dirty(&self.canvas.document);
        result
    }

    fn dispatch(&mut self, command: Command) -> AppResult<String> {
        match command {
            Command::Show {
                json,
                canvas,
                preview,
                select,
            } => {
                if json {
                    Ok(json::serialize(&self.canvas.document)? + "\n")
                } else if canvas {
                    self.canvas_markup(preview, select.as_deref())
                } else {
                    Ok(self.summary())
                }
            }
            Command::Add { kind, x, y } => self.add(kind, Point::new(x, y)),
            Command::Move { id, dx, dy } => self.move_item(&id, Vec2::new(dx, dy)),
            Command::Resize { id, dir, dx, dy } => self.resize_item(&id, dir, Vec2::new(dx, dy)),
            Command::Set { id, props } => self.set_props(&id, &props),
            Command::Delete { id } => {
                self.require_item(&id)?;
                self.canvas.select(&id);
                self.canvas.delete_selected();
                self.commit();
                Ok(format!("Deleted {id}\n"))
            }
            Command::Front { id } => {
                self.require_item(&id)?;
                self.canvas.document.bring_to_front(&id);
                self.commit();
                Ok(format!("Brought {id} to front\n"))
            }
            Command::Back { id } => {
                self.require_item(&id)?;
                self.canvas.document.send_to_back(&id);
                self.commit();
                Ok(format!("Sent {id} to back\n"))
            }
            Command::Clear => {
                let count = self.canvas.document.len();
                self.canvas.clear_all();
                self.commit();
                Ok(format!("Removed {count} items\n"))
            }
            Command::Settings { dark, grid, bg } => {
                self.settings(dark, grid, bg);
                Ok(self.settings_summary())
            }
            Command::AttachImage { id, file, url } => self.attach_image(&id, file.as_deref(), url),
            Command::Import { file } => self.import(&file),
            Command::Export { format, out } => {
                let path = out.unwrap_or_else(|| format.default_file_name().into());
                self.export(format, &path)
            }
            Command::VideoUrl { url, id } => self.video_url(&url, id.as_deref()),
        }
    }

    fn add(&mut self, kind: ItemKind, client: Point) -> AppResult<String> {
        let id = self
            .canvas
            .drop_palette(kind, client)
            .ok_or_else(|| AppError::InvalidArgument("Canvas is in preview mode".to_string()))?;
        self.commit();
        Ok(format!("{id}\n"))
    }

    /// Press on the item's surface, drag by `delta`, release.
    fn move_item(&mut self, id: &str, delta: Vec2) -> AppResult<String> {
        let start = self
            .canvas
            .document
            .get(id)
            .map(|item| item.rect().center())
            .ok_or_else(|| AppError::UnknownItem(id.to_string()))?;
        self.canvas.pointer_down_item(id, PressTarget::Surface, start);
        self.drag(start + delta, id)
    }

    /// Select the item, press its handle, drag by `delta`, release.
    fn resize_item(&mut self, id: &str, dir: ResizeDir, delta: Vec2) -> AppResult<String> {
        let rect = self
            .canvas
            .document
            .get(id)
            .map(|item| item.rect())
            .ok_or_else(|| AppError::UnknownItem(id.to_string()))?;
        let start = get_handles(rect)
            .into_iter()
            .find(|handle| handle.dir == dir)
            .map(|handle| handle.position)
            .unwrap_or_else(|| rect.center());
        self.canvas.select(id);
        self.canvas.pointer_down_handle(dir, start);
        self.drag(start + delta, id)
    }

    fn drag(&mut self, to: Point, id: &str) -> AppResult<String> {
        self.canvas.pointer_move(to);
        if self.canvas.pointer_up() {
            self.commit();
        }
        let item = self
            .canvas
            .document
            .get(id)
            .ok_or_else(|| AppError::UnknownItem(id.to_string()))?;
        Ok(format!("{} {} {} {} {}\n", item.id, item.x, item.y, item.w, item.h))
    }

    fn set_props(&mut self, id: &str, props: &str) -> AppResult<String> {
        self.require_item(id)?;
        let value: serde_json::Value = serde_json::from_str(props)?;
        self.canvas
            .patch_props_value(id, value)
            .map_err(|err| match err {
                PatchError::UnknownItem(id) => AppError::UnknownItem(id),
                other => AppError::InvalidArgument(other.to_string()),
            })?;
        self.commit();
        Ok(format!("Updated {id}\n"))
    }

    fn settings(&mut self, dark: Option<bool>, grid: Option<bool>, bg: Option<String>) {
        let doc = &mut self.canvas.document;
        let mut changed = false;
        if let Some(dark) = dark {
            changed |= doc.dark != dark;
            doc.dark = dark;
        }
        if let Some(grid) = grid {
            changed |= doc.show_grid != grid;
            doc.show_grid = grid;
        }
        if let Some(bg) = bg {
            changed |= doc.canvas_bg != bg;
            doc.set_canvas_bg(bg);
        }
        if changed {
            self.commit();
        }
    }

    fn attach_image(
        &mut self,
        id: &str,
        file: Option<&Path>,
        url: Option<String>,
    ) -> AppResult<String> {
        self.require_item(id)?;
        let attached = match (file, url) {
            (_, Some(url)) => self.canvas.paste_image_url(id, &url),
            (Some(file), None) => {
                let data = fs::read(file)?;
                self.canvas.attach_image(id, &data, Some(file))
            }
            (None, None) => false,
        };
        if !attached {
            return Err(AppError::InvalidArgument(format!(
                "Could not attach image to {id}: needs an image or card item \
                 and a PNG, JPEG, GIF, WebP, SVG or http(s) source"
            )));
        }
        self.commit();
        Ok(format!("Attached image to {id}\n"))
    }

    fn import(&mut self, file: &Path) -> AppResult<String> {
        let text = fs::read_to_string(file)?;
        let doc = json::deserialize(&text)?;
        let count = doc.len();
        self.canvas = Canvas::with_document(doc);
        self.canvas.container_size = self.config.container;
        self.canvas.canvas_origin = self.config.canvas_origin;
        self.commit();
        Ok(format!("Imported {count} items from {}\n", file.display()))
    }

    fn export(&self, format: ExportFormat, path: &Path) -> AppResult<String> {
        let content = match format {
            ExportFormat::Html => {
                let mut renderer = StaticHtmlRenderer::new();
                renderer.build_scene(&RenderContext::new(&self.canvas))?;
                renderer.take_markup()
            }
            ExportFormat::Json => json::export_items_json(&self.canvas.document)?,
        };
        fs::write(path, content)?;
        log::info!("Exported page to {}", path.display());
        Ok(format!("Wrote {}\n", path.display()))
    }

    fn video_url(&mut self, url: &str, id: Option<&str>) -> AppResult<String> {
        let Some(id) = id else {
            return Ok(format!("{}\n", normalize_video_url(url)));
        };
        self.require_item(id)?;
        if !self.canvas.document.set_video_url(id, url) {
            return Err(AppError::InvalidArgument(format!("{id} is not a video item")));
        }
        self.commit();
        match self.canvas.document.get(id).map(|item| &item.props) {
            Some(ItemProps::Video(props)) => Ok(format!("{}\n", props.url)),
            _ => Err(AppError::UnknownItem(id.to_string())),
        }
    }

    fn canvas_markup(&self, preview: bool, select: Option<&str>) -> AppResult<String> {
        let mut canvas = self.canvas.clone();
        if let Some(id) = select {
            self.require_item(id)?;
            canvas.select(id);
        }
        if preview {
            canvas.set_mode(Mode::Preview);
        }
        let mut renderer = CanvasMarkupRenderer::new();
        renderer.build_scene(&RenderContext::new(&canvas))?;
        Ok(renderer.take_markup() + "\n")
    }

    fn summary(&self) -> String {
        let mut out = String::new();
        for item in &self.canvas.document.items {
            let _ = writeln!(
                out,
                "{:<40} {:<6} x={} y={} w={} h={}",
                item.id,
                item.kind(),
                item.x,
                item.y,
                item.w,
                item.h
            );
        }
        if self.canvas.document.is_empty() {
            out.push_str("(no items)\n");
        }
        out.push_str(&self.settings_summary());
        out
    }

    fn settings_summary(&self) -> String {
        let doc = &self.canvas.document;
        format!(
            "dark={} grid={} bg={} ({})\n",
            doc.dark,
            doc.show_grid,
            doc.canvas_bg,
            to_six_hex(&doc.canvas_bg)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_core::storage::{MemoryStorage, STORAGE_KEY};
    use tempfile::tempdir;

    fn new_app() -> (App<MemoryStorage>, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let config = AppConfig {
            canvas_origin: Point::new(20.0, 20.0),
            ..AppConfig::default()
        };
        (App::with_storage(config, storage.clone()), storage)
    }

    fn add(app: &mut App<MemoryStorage>, kind: ItemKind, x: f64, y: f64) -> String {
        app.execute(Command::Add { kind, x, y }).unwrap().trim().to_string()
    }

    fn set(app: &mut App<MemoryStorage>, id: &str, props: &str) -> AppResult<String> {
        app.execute(Command::Set {
            id: id.to_string(),
            props: props.to_string(),
        })
    }

    #[test]
    fn test_add_persists() {
        let (mut app, storage) = new_app();
        let id = add(&mut app, ItemKind::Button, 140.0, 100.0);

        let item = app.canvas().document.get(&id).unwrap();
        assert_eq!((item.x, item.y, item.w, item.h), (120.0, 80.0, 160.0, 56.0));

        let saved = storage.load(STORAGE_KEY).unwrap();
        assert_eq!(saved, app.canvas().document);
    }

    #[test]
    fn test_read_only_commands_do_not_write() {
        let (mut app, storage) = new_app();
        app.execute(Command::Show {
            json: true,
            canvas: false,
            preview: false,
            select: None,
        })
        .unwrap();
        assert!(storage.raw(STORAGE_KEY).unwrap().is_none());

        let result = app.execute(Command::Delete {
            id: "nope".to_string(),
        });
        assert!(result.is_err());
        assert!(storage.raw(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_restores_on_start() {
        let (mut app, storage) = new_app();
        let id = add(&mut app, ItemKind::Card, 20.0, 20.0);
        let reopened = App::with_storage(AppConfig::default(), storage);
        assert!(reopened.canvas().document.contains(&id));
    }

    #[test]
    fn test_move_and_resize() {
        let (mut app, _) = new_app();
        let id = add(&mut app, ItemKind::Card, 20.0, 20.0);

        let out = app
            .execute(Command::Resize {
                id: id.clone(),
                dir: ResizeDir::Se,
                dx: 13.0,
                dy: -3.0,
            })
            .unwrap();
        assert_eq!(out, format!("{id} 0 0 432 256\n"));

        let out = app
            .execute(Command::Move {
                id: id.clone(),
                dx: 13.0,
                dy: 29.0,
            })
            .unwrap();
        assert_eq!(out, format!("{id} 16 32 432 256\n"));
    }

    #[test]
    fn test_unknown_item() {
        let (mut app, _) = new_app();
        let result = app.execute(Command::Delete {
            id: "nope".to_string(),
        });
        assert!(matches!(result, Err(AppError::UnknownItem(_))));
    }

    #[test]
    fn test_set_props_and_delete() {
        let (mut app, storage) = new_app();
        let id = add(&mut app, ItemKind::Button, 20.0, 20.0);
        set(&mut app, &id, r#"{"label":"Buy","variant":"ghost"}"#).unwrap();
        match &app.canvas().document.get(&id).unwrap().props {
            ItemProps::Button(props) => assert_eq!(props.label, "Buy"),
            other => panic!("Expected button props, got {other:?}"),
        }

        let result = set(&mut app, &id, "[1]");
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));

        app.execute(Command::Delete { id: id.clone() }).unwrap();
        assert!(storage.load(STORAGE_KEY).unwrap().is_empty());
    }

    #[test]
    fn test_set_props_rejects_invalid_keys() {
        let (mut app, storage) = new_app();
        let id = add(&mut app, ItemKind::Text, 20.0, 20.0);
        let before = app.canvas().document.clone();

        let result = set(&mut app, &id, r#"{"fontSize":"24","align":"middle","colour":"red"}"#);
        match result {
            Err(AppError::InvalidArgument(message)) => {
                assert!(message.contains("fontSize"), "{message}");
                assert!(message.contains("align"), "{message}");
                assert!(message.contains("colour"), "{message}");
            }
            other => panic!("Expected invalid argument, got {other:?}"),
        }
        assert_eq!(app.canvas().document, before);
        assert_eq!(storage.load(STORAGE_KEY).unwrap(), before);

        let result = set(&mut app, "nope", r#"{"fontSize":24}"#);
        assert!(matches!(result, Err(AppError::UnknownItem(_))));
    }

    #[test]
    fn test_clear_and_settings() {
        let (mut app, storage) = new_app();
        add(&mut app, ItemKind::Text, 20.0, 20.0);
        app.execute(Command::Settings {
            dark: Some(false),
            grid: None,
            bg: Some("#ffffffcc".to_string()),
        })
        .unwrap();
        let out = app.execute(Command::Clear).unwrap();
        assert_eq!(out, "Removed 1 items\n");

        let saved = storage.load(STORAGE_KEY).unwrap();
        assert!(saved.is_empty());
        assert!(!saved.dark);
        assert_eq!(saved.canvas_bg, "#ffffffcc");

        let out = app
            .execute(Command::Settings {
                dark: None,
                grid: None,
                bg: None,
            })
            .unwrap();
        assert_eq!(out, "dark=false grid=true bg=#ffffffcc (#ffffff)\n");
    }

    #[test]
    fn test_export_and_import() {
        let dir = tempdir().unwrap();
        let (mut app, _) = new_app();
        add(&mut app, ItemKind::Video, 20.0, 20.0);
        add(&mut app, ItemKind::Text, 20.0, 320.0);
        app.execute(Command::Settings {
            dark: None,
            grid: None,
            bg: Some("#18181b".to_string()),
        })
        .unwrap();

        let html_path = dir.path().join("page.html");
        app.execute(Command::Export {
            format: ExportFormat::Html,
            out: Some(html_path.clone()),
        })
        .unwrap();
        let html = fs::read_to_string(&html_path).unwrap();
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("<iframe"));
        assert!(html.contains("body{background:#18181b;"));

        let json_path = dir.path().join("page.json");
        app.execute(Command::Export {
            format: ExportFormat::Json,
            out: Some(json_path.clone()),
        })
        .unwrap();

        let (mut other, _) = new_app();
        let out = other.execute(Command::Import { file: json_path }).unwrap();
        assert!(out.starts_with("Imported 2 items"));
        assert_eq!(other.canvas().document.items, app.canvas().document.items);
    }

    #[test]
    fn test_import_malformed_keeps_page() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();

        let (mut app, _) = new_app();
        let id = add(&mut app, ItemKind::Text, 20.0, 20.0);
        let result = app.execute(Command::Import { file: path });
        assert!(matches!(result, Err(AppError::Parse(_))));
        assert!(app.canvas().document.contains(&id));
    }

    #[test]
    fn test_attach_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        fs::write(&path, [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]).unwrap();

        let (mut app, _) = new_app();
        let image = add(&mut app, ItemKind::Image, 20.0, 20.0);
        let button = add(&mut app, ItemKind::Button, 20.0, 300.0);

        app.execute(Command::AttachImage {
            id: image.clone(),
            file: Some(path.clone()),
            url: None,
        })
        .unwrap();
        match &app.canvas().document.get(&image).unwrap().props {
            ItemProps::Image(props) => assert!(props.src.starts_with("data:image/png;base64,")),
            other => panic!("Expected image props, got {other:?}"),
        }

        let result = app.execute(Command::AttachImage {
            id: button,
            file: Some(path),
            url: None,
        });
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));

        let result = app.execute(Command::AttachImage {
            id: image,
            file: None,
            url: Some("javascript:alert(1)".to_string()),
        });
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn test_video_url() {
        let (mut app, _) = new_app();
        let out = app
            .execute(Command::VideoUrl {
                url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
                id: None,
            })
            .unwrap();
        assert_eq!(out, "https://www.youtube.com/embed/dQw4w9WgXcQ\n");

        let id = add(&mut app, ItemKind::Video, 20.0, 20.0);
        let out = app
            .execute(Command::VideoUrl {
                url: "https://vimeo.com/76979871".to_string(),
                id: Some(id),
            })
            .unwrap();
        assert_eq!(out, "https://player.vimeo.com/video/76979871\n");
    }

    #[test]
    fn test_show_canvas_markup() {
        let (mut app, _) = new_app();
        let id = add(&mut app, ItemKind::Image, 20.0, 20.0);
        let out = app
            .execute(Command::Show {
                json: false,
                canvas: true,
                preview: false,
                select: Some(id),
            })
            .unwrap();
        assert!(out.contains("No image. Use toolbar to upload or paste URL."));
        assert!(out.contains("pc-handle"));

        let summary = app
            .execute(Command::Show {
                json: false,
                canvas: false,
                preview: false,
                select: None,
            })
            .unwrap();
        assert!(summary.contains("image"));
        assert!(summary.ends_with("dark=true grid=true bg=#ffffff (#ffffff)\n"));
    }
}
