use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Byte-oriented key/value cache.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value by key. Expired values are reported as missing.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;

    /// Deletes all values whose key matches a glob pattern (e.g. `"feed:*"`).
    async fn delete_pattern(&self, pattern: &str) -> Result<()>;
}
