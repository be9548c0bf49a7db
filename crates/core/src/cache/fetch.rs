//! The resource fetch collaborator.
//!
//! A fetcher turns a URL into a parsed payload. Results are `Clone` so a
//! single in-flight fetch can be handed to every caller waiting on it.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while fetching or parsing a remote resource.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("No articles found at {0}")]
    Empty(String),
}

/// Fetches and parses the resource behind a URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Parsed payload produced for one URL.
    type Output: Send + Sync + 'static;

    async fn fetch(&self, url: &str) -> Result<Self::Output, FetchError>;
}
