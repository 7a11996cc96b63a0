//! Application errors.

use pagecraft_core::ParseError;
use pagecraft_core::storage::StorageError;
use pagecraft_render::RendererError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not read page: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Render(#[from] RendererError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No item has the given id.
    #[error("No item with id {0}")]
    UnknownItem(String),

    /// A command argument was well-formed but unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type AppResult<T> = Result<T, AppError>;
