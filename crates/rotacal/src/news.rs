//! News reader: a feed catalog with one active source, backed by the
//! resource cache.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use rotacal_core::cache::Fetcher;
use rotacal_core::feeds::{Feed, FeedCatalog, FeedSource};

use crate::cache::{PrewarmReport, ResourceCache};
use crate::error::Result;

/// A feed together with the source it was loaded from.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedFeed {
    pub source: FeedSource,
    pub feed: Arc<Feed>,
}

pub struct NewsService<F>
where
    F: Fetcher<Output = Feed> + 'static,
{
    catalog: Arc<RwLock<FeedCatalog>>,
    cache: ResourceCache<F>,
}

impl<F> Clone for NewsService<F>
where
    F: Fetcher<Output = Feed> + 'static,
{
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            cache: self.cache.clone(),
        }
    }
}

impl<F> NewsService<F>
where
    F: Fetcher<Output = Feed> + 'static,
{
    pub fn new(catalog: FeedCatalog, fetcher: F) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            cache: ResourceCache::new(fetcher),
        }
    }

    pub fn cache(&self) -> &ResourceCache<F> {
        &self.cache
    }

    pub async fn sources(&self) -> Vec<FeedSource> {
        self.catalog.read().await.sources().to_vec()
    }

    pub async fn active(&self) -> FeedSource {
        self.catalog.read().await.active().clone()
    }

    /// Makes `name` the active source without loading it.
    pub async fn activate(&self, name: &str) -> Result<FeedSource> {
        let source = self.catalog.write().await.select(name)?.clone();
        tracing::info!(source = %source.name, "Selected news source");
        Ok(source)
    }

    /// Makes `name` the active source and loads it, from cache when possible.
    pub async fn select(&self, name: &str) -> Result<LoadedFeed> {
        let source = self.activate(name).await?;
        self.load(source, false).await
    }

    /// Loads the active source. With `force`, the cached copy is dropped
    /// first and a failed fetch leaves nothing cached.
    pub async fn show_active(&self, force: bool) -> Result<LoadedFeed> {
        let source = self.active().await;
        self.load(source, force).await
    }

    /// Fetches every inactive source not already cached.
    pub async fn prewarm_inactive(&self) -> PrewarmReport {
        let urls = self.inactive_urls().await;
        self.cache.prewarm(urls).await
    }

    /// Runs [`prewarm_inactive`](Self::prewarm_inactive) in the background.
    pub async fn spawn_prewarm_inactive(&self) -> JoinHandle<PrewarmReport> {
        let urls = self.inactive_urls().await;
        self.cache.spawn_prewarm(urls)
    }

    async fn inactive_urls(&self) -> Vec<String> {
        self.catalog
            .read()
            .await
            .inactive()
            .map(|source| source.url.clone())
            .collect()
    }

    async fn load(&self, source: FeedSource, force: bool) -> Result<LoadedFeed> {
        let feed = if force {
            tracing::info!(source = %source.name, "Force reloading feed");
            self.cache.refresh(&source.url).await?
        } else {
            self.cache.load(&source.url).await?
        };
        Ok(LoadedFeed { source, feed })
    }
}
