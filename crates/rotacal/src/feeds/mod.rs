//! Feed fetching: HTTP bodies, the TTL proxy cache and RSS parsing.

mod http;
mod parse;
mod proxy;

use std::sync::Arc;

use async_trait::async_trait;

use rotacal_core::cache::{FetchError, Fetcher};
use rotacal_core::feeds::Feed;

pub use http::{parse_http_url, HttpFetcher};
pub use parse::parse_feed;
pub use proxy::ProxyFetcher;

/// Turns the body produced by `inner` into a parsed [`Feed`].
pub struct FeedFetcher<F>
where
    F: Fetcher<Output = String>,
{
    inner: Arc<F>,
}

impl<F> FeedFetcher<F>
where
    F: Fetcher<Output = String>,
{
    pub fn new(inner: Arc<F>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<F> Fetcher for FeedFetcher<F>
where
    F: Fetcher<Output = String> + 'static,
{
    type Output = Feed;

    async fn fetch(&self, url: &str) -> Result<Feed, FetchError> {
        let body = self.inner.fetch(url).await?;
        let feed = parse_feed(&body, url)?;
        tracing::debug!(url, items = feed.len(), "Parsed feed");
        Ok(feed)
    }
}
