//! Pure core of the rotating shift calendar.
//!
//! Everything here is I/O free: shift rotation, lunar conversion, month
//! grids and summaries, the note book, notification cutoffs, the feed model
//! and the contracts (caches, fetchers, repositories) the shell implements.

pub mod cache;
pub mod calendar;
pub mod feeds;
pub mod notes;
pub mod serde;
pub mod settings;
pub mod storage;
