//! File-based storage implementation for native platforms.

use super::{Storage, StorageError, StorageResult, decode, encode};
use crate::canvas::PageDocument;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage for native platforms.
///
/// Stores each key as a JSON file in a specified directory.
pub struct FileStorage {
    /// Base directory for page storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {e}"))
            })?;
        }
        Ok(Self { base_path })
    }

    /// The default storage directory.
    ///
    /// On Unix: `~/.local/share/pagecraft/`
    /// On Windows: `%LOCALAPPDATA%\pagecraft\`
    pub fn default_path() -> StorageResult<PathBuf> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                StorageError::Unavailable("Could not determine home directory".to_string())
            })?;
        Ok(base.join("pagecraft"))
    }

    /// Create file storage in the default location.
    pub fn default_location() -> StorageResult<Self> {
        Self::new(Self::default_path()?)
    }

    /// Get the file path for a key.
    fn page_path(&self, key: &str) -> PathBuf {
        // Sanitize key to be safe for filenames
        let safe_key: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{safe_key}.json"))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, key: &str, page: &PageDocument) -> StorageResult<()> {
        let path = self.page_path(key);
        let json = encode(page)?;
        fs::write(&path, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {e}", path.display())))
    }

    fn load(&self, key: &str) -> StorageResult<PageDocument> {
        let path = self.page_path(key);
        if !path.exists() {
            return Err(StorageError::NotFound(key.to_string()));
        }
        let json = fs::read_to_string(&path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {e}", path.display())))?;
        decode(key, &json)
    }
}
