//! Browser localStorage backend for WASM.

use super::{Storage, StorageError, StorageResult, decode, encode};
use crate::canvas::PageDocument;

/// Stores each page as a JSON string in `window.localStorage`.
#[derive(Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> StorageResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("No window object".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("localStorage error: {e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))
    }
}

impl Storage for LocalStorage {
    fn save(&self, key: &str, page: &PageDocument) -> StorageResult<()> {
        let json = encode(page)?;
        self.storage()?
            .set_item(key, &json)
            .map_err(|e| StorageError::Io(format!("Failed to write {key}: {e:?}")))
    }

    fn load(&self, key: &str) -> StorageResult<PageDocument> {
        let json = self
            .storage()?
            .get_item(key)
            .map_err(|e| StorageError::Io(format!("Failed to read {key}: {e:?}")))?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        decode(key, &json)
    }
}
