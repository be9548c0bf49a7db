mod error;
mod fetch;
mod keys;
mod patterns;
mod traits;

pub use error::{CacheError, Result};
pub use fetch::{FetchError, Fetcher};
pub use keys::feed_key;
pub use patterns::pattern_matches;
pub use traits::Cache;
