//! Cache implementations.
//!
//! `memory` is the byte cache behind the feed proxy (LRU with TTL);
//! `resource` is the client-side payload cache with force refresh and
//! prewarm.

pub mod memory;
pub mod resource;

pub use memory::MemoryCache;
pub use resource::{PrewarmFailure, PrewarmReport, ResourceCache};
