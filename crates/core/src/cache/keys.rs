/// Returns the cache key for a fetched feed.
pub fn feed_key(url: &str) -> String {
    format!("feed:{url}")
}
