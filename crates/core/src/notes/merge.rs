//! Folding externally parsed `{date, note}` pairs into a note book.
//!
//! The pairs come from a text-parsing service and are not trusted: a pair
//! with an unparsable date or an empty note is skipped and reported, the
//! rest are appended in order.

use serde::{Deserialize, Serialize};

use crate::calendar::parse_date_key;

use super::book::NoteBook;
use super::error::NoteError;

/// One note produced by the parsing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteUpdate {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub note: String,
}

impl NoteUpdate {
    pub fn new(date: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            note: note.into(),
        }
    }
}

/// Outcome of [`merge_updates`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub applied: usize,
    pub skipped: Vec<SkippedUpdate>,
}

/// An update that could not be applied, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedUpdate {
    pub update: NoteUpdate,
    pub reason: String,
}

/// Appends every valid update to `book`.
pub fn merge_updates(book: &mut NoteBook, updates: &[NoteUpdate]) -> MergeReport {
    let mut report = MergeReport::default();

    for update in updates {
        let applied = parse_date_key(&update.date)
            .map_err(|_| NoteError::InvalidDateKey(update.date.clone()))
            .and_then(|date| book.add(date, &update.note));

        match applied {
            Ok(()) => report.applied += 1,
            Err(err) => report.skipped.push(SkippedUpdate {
                update: update.clone(),
                reason: err.to_string(),
            }),
        }
    }

    report
}
