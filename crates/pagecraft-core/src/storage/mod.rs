//! Storage abstraction for persistence.

mod autosave;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use autosave::AutoSave;
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use crate::canvas::PageDocument;
use thiserror::Error;

/// Key the page state is persisted under.
pub const STORAGE_KEY: &str = "modern-builder-v1";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Page not found: {0}")]
    NotFound(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for page storage backends.
///
/// Each key holds one full snapshot of the page state; `save` overwrites it.
pub trait Storage {
    /// Save a page.
    fn save(&self, key: &str, page: &PageDocument) -> StorageResult<()>;

    /// Load a page.
    fn load(&self, key: &str) -> StorageResult<PageDocument>;
}

/// Serialize a page for a text-based backend.
pub(crate) fn encode(page: &PageDocument) -> StorageResult<String> {
    crate::json::serialize(page).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Parse a page read from a text-based backend.
pub(crate) fn decode(key: &str, text: &str) -> StorageResult<PageDocument> {
    crate::json::deserialize(text)
        .map_err(|e| StorageError::Serialization(format!("Failed to parse {key}: {e}")))
}
