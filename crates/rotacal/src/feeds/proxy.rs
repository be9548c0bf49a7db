//! TTL cache in front of a body fetcher.
//!
//! Mirrors a feed proxy: responses are cached by URL for a fixed TTL and
//! refetched once expired. This cache is independent of the client-side
//! [`ResourceCache`](crate::cache::ResourceCache), which never expires.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use rotacal_core::cache::{feed_key, Cache, FetchError, Fetcher};

/// Cache-aside decorator over a fetcher producing response bodies.
pub struct ProxyFetcher<F, C>
where
    F: Fetcher<Output = String>,
    C: Cache,
{
    inner: Arc<F>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<F, C> ProxyFetcher<F, C>
where
    F: Fetcher<Output = String>,
    C: Cache,
{
    pub fn new(inner: Arc<F>, cache: Arc<C>, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }
}

#[async_trait]
impl<F, C> Fetcher for ProxyFetcher<F, C>
where
    F: Fetcher<Output = String> + 'static,
    C: Cache + 'static,
{
    type Output = String;

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let key = feed_key(url);

        match self.cache.get(&key).await {
            Ok(Some(bytes)) => match String::from_utf8(bytes) {
                Ok(body) => {
                    tracing::trace!(url, "Proxy cache hit");
                    return Ok(body);
                }
                Err(_) => tracing::warn!(url, "Cached feed body is not valid UTF-8"),
            },
            Ok(None) => {}
            Err(err) => tracing::warn!(url, error = %err, "Failed to read cached feed body"),
        }

        tracing::trace!(url, "Proxy cache miss");
        let body = self.inner.fetch(url).await?;

        if let Err(err) = self.cache.set(&key, body.as_bytes(), Some(self.ttl)).await {
            tracing::warn!(url, error = %err, "Failed to cache feed body");
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rotacal_core::cache::CacheError;

    use crate::cache::MemoryCache;

    #[derive(Default)]
    struct CountingFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Fetcher for CountingFetcher {
        type Output = String;

        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            if url.contains("down") {
                return Err(FetchError::Status {
                    status: 503,
                    url: url.to_string(),
                });
            }
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!("<rss>{n}</rss>"))
        }
    }

    fn proxy(ttl: Duration) -> (ProxyFetcher<CountingFetcher, MemoryCache>, Arc<CountingFetcher>) {
        let inner = Arc::new(CountingFetcher::default());
        let cache = Arc::new(MemoryCache::new(100));
        (ProxyFetcher::new(Arc::clone(&inner), cache, ttl), inner)
    }

    #[tokio::test]
    async fn test_serves_from_cache_within_ttl() {
        let (proxy, inner) = proxy(Duration::from_secs(180));

        assert_eq!(proxy.fetch("https://a/rss").await.unwrap(), "<rss>1</rss>");
        assert_eq!(proxy.fetch("https://a/rss").await.unwrap(), "<rss>1</rss>");
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refetches_after_ttl() {
        let (proxy, inner) = proxy(Duration::from_millis(30));

        proxy.fetch("https://a/rss").await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(proxy.fetch("https://a/rss").await.unwrap(), "<rss>2</rss>");
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_keys_are_per_url() {
        let (proxy, inner) = proxy(Duration::from_secs(180));

        proxy.fetch("https://a/rss").await.unwrap();
        proxy.fetch("https://b/rss").await.unwrap();

        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let (proxy, _) = proxy(Duration::from_secs(180));

        assert!(proxy.fetch("https://down/rss").await.is_err());
        assert!(proxy.fetch("https://down/rss").await.is_err());
    }

    /// Backend whose every operation fails.
    struct BrokenCache;

    #[async_trait]
    impl Cache for BrokenCache {
        async fn get(&self, _key: &str) -> rotacal_core::cache::Result<Option<Vec<u8>>> {
            Err(CacheError::OperationFailed("backend down".to_string()))
        }

        async fn set(
            &self,
            _key: &str,
            _value: &[u8],
            _ttl: Option<Duration>,
        ) -> rotacal_core::cache::Result<()> {
            Err(CacheError::OperationFailed("backend down".to_string()))
        }

        async fn delete(&self, _key: &str) -> rotacal_core::cache::Result<()> {
            Err(CacheError::OperationFailed("backend down".to_string()))
        }

        async fn delete_pattern(&self, _pattern: &str) -> rotacal_core::cache::Result<()> {
            Err(CacheError::OperationFailed("backend down".to_string()))
        }
    }

    #[tokio::test]
    async fn test_cache_failures_fall_through_to_fetch() {
        let inner = Arc::new(CountingFetcher::default());
        let proxy = ProxyFetcher::new(
            Arc::clone(&inner),
            Arc::new(BrokenCache),
            Duration::from_secs(180),
        );

        assert_eq!(proxy.fetch("https://a/rss").await.unwrap(), "<rss>1</rss>");
        assert_eq!(proxy.fetch("https://a/rss").await.unwrap(), "<rss>2</rss>");
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }
}
