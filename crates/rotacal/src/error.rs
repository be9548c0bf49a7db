//! Application error type.

use thiserror::Error;

use rotacal_core::cache::FetchError;
use rotacal_core::calendar::CalendarError;
use rotacal_core::feeds::CatalogError;
use rotacal_core::notes::NoteError;
use rotacal_core::storage::RepositoryError;

/// Result type alias for the application layer.
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors surfaced by the services and the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Note(#[from] NoteError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
