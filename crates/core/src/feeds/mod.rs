//! News feed model: parsed feeds and the catalog of sources.

mod catalog;
mod error;
mod item;

pub use catalog::{default_sources, parse_sources, FeedCatalog, FeedSource};
pub use error::CatalogError;
pub use item::{first_image_src, strip_markup, summary_text, Feed, FeedItem, UNTITLED};
