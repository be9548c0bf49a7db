use thiserror::Error;

/// Errors raised when building or querying a feed catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Feed catalog has no sources")]
    NoSources,
    #[error("Unknown feed source: {0}")]
    UnknownSource(String),
    #[error("Invalid feed source definition: {0}")]
    InvalidSource(String),
}
