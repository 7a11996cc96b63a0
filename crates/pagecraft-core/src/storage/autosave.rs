//! Save-on-every-mutation persistence for the page state.
//!
//! Persistence is best effort: failures are logged and the in-memory page
//! keeps working.

use crate::canvas::PageDocument;
use crate::storage::{STORAGE_KEY, Storage, StorageError};
use std::sync::Arc;

/// Persists full page snapshots under one key.
pub struct AutoSave<S: Storage> {
    /// Storage backend.
    storage: Arc<S>,
    /// Key the snapshot lives under.
    key: String,
    /// Whether the page has changes that have not been persisted.
    dirty: bool,
}

impl<S: Storage> AutoSave<S> {
    /// Create an auto-saver writing under [`STORAGE_KEY`].
    pub fn new(storage: Arc<S>) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    /// Create an auto-saver writing under a custom key.
    pub fn with_key(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            dirty: false,
        }
    }

    /// Mark the page as having unsaved changes.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check if the page has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write a full snapshot. Returns whether the write succeeded.
    pub fn persist(&mut self, page: &PageDocument) -> bool {
        match self.storage.save(&self.key, page) {
            Ok(()) => {
                self.dirty = false;
                log::debug!("Saved page to {}", self.key);
                true
            }
            Err(err) => {
                self.dirty = true;
                log::warn!("Could not save page: {err}");
                false
            }
        }
    }

    /// Persist only if there are unsaved changes.
    pub fn persist_if_dirty(&mut self, page: &PageDocument) -> bool {
        self.dirty && self.persist(page)
    }

    /// Load the stored page, or an empty default page when there is none or
    /// it cannot be read.
    pub fn restore(&self) -> PageDocument {
        match self.storage.load(&self.key) {
            Ok(page) => {
                log::info!("Restored {} items from {}", page.len(), self.key);
                page
            }
            Err(StorageError::NotFound(_)) => {
                log::info!("No saved page, starting empty");
                PageDocument::new()
            }
            Err(err) => {
                log::warn!("Discarding saved page: {err}");
                PageDocument::new()
            }
        }
    }
}
