use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur when editing the note book.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NoteError {
    #[error("Note text cannot be empty")]
    EmptyNote,
    #[error("No note #{index} on {date}")]
    NoteNotFound { date: NaiveDate, index: usize },
    #[error("Invalid date key: {0}")]
    InvalidDateKey(String),
}
