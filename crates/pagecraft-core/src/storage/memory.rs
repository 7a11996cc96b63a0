//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult, decode, encode};
use crate::canvas::PageDocument;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
///
/// Pages are kept as serialized text, so loads go through the same lenient
/// parsing as the persistent backends.
#[derive(Default)]
pub struct MemoryStorage {
    pages: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text under a key, bypassing serialization.
    pub fn insert_raw(&self, key: &str, text: impl Into<String>) -> StorageResult<()> {
        let mut pages = self.pages.write().map_err(lock_error)?;
        pages.insert(key.to_string(), text.into());
        Ok(())
    }

    /// Raw text stored under a key.
    pub fn raw(&self, key: &str) -> StorageResult<Option<String>> {
        let pages = self.pages.read().map_err(lock_error)?;
        Ok(pages.get(key).cloned())
    }
}

fn lock_error<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Unavailable(format!("Lock error: {e}"))
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, page: &PageDocument) -> StorageResult<()> {
        let text = encode(page)?;
        self.insert_raw(key, text)
    }

    fn load(&self, key: &str) -> StorageResult<PageDocument> {
        match self.raw(key)? {
            Some(text) => decode(key, &text),
            None => Err(StorageError::NotFound(key.to_string())),
        }
    }

}
