mod book;
mod error;
mod merge;

pub use book::NoteBook;
pub use error::NoteError;
pub use merge::{merge_updates, MergeReport, NoteUpdate, SkippedUpdate};
