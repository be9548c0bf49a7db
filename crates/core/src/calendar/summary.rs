//! Monthly note summaries.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::notes::NoteBook;

use super::error::CalendarError;
use super::grid::{first_of_month, last_of_month};
use super::shift::{ShiftKind, ShiftScheduler};

/// One in-month date that carries notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateSummary {
    pub date: NaiveDate,
    /// English weekday name, e.g. `"Monday"`.
    pub weekday: String,
    /// Short `d/m` display, e.g. `"26/10"`.
    pub display: String,
    pub shift: ShiftKind,
    pub notes: Vec<String>,
}

/// All days of a month on which the same note text occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteSummary {
    pub note: String,
    /// Days of month in ascending order, once per occurrence.
    pub days: Vec<u32>,
}

/// Lists the in-month dates of `year`/`month` with notes, in date order.
pub fn summarize_by_date(
    year: i32,
    month: u32,
    scheduler: &ShiftScheduler,
    notes: &NoteBook,
) -> Result<Vec<DateSummary>, CalendarError> {
    let start = first_of_month(year, month)?;
    let end = last_of_month(year, month)?;

    Ok(notes
        .range(start, end)
        .map(|(date, day_notes)| DateSummary {
            date,
            weekday: date.format("%A").to_string(),
            display: format!("{}/{}", date.day(), date.month()),
            shift: scheduler.shift_for(date),
            notes: day_notes.to_vec(),
        })
        .collect())
}

/// Groups the notes of `year`/`month` by their trimmed text.
///
/// Groups are ordered case-insensitively by text; exact duplicates of text
/// differing only in case stay separate groups.
pub fn summarize_by_note(
    year: i32,
    month: u32,
    notes: &NoteBook,
) -> Result<Vec<NoteSummary>, CalendarError> {
    let start = first_of_month(year, month)?;
    let end = last_of_month(year, month)?;

    let mut groups: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    for (date, day_notes) in notes.range(start, end) {
        for note in day_notes {
            let text = note.trim();
            if text.is_empty() {
                continue;
            }
            groups.entry(text.to_string()).or_default().push(date.day());
        }
    }

    let mut summaries: Vec<NoteSummary> = groups
        .into_iter()
        .map(|(note, days)| NoteSummary { note, days })
        .collect();
    summaries.sort_by(|a, b| {
        a.note
            .to_lowercase()
            .cmp(&b.note.to_lowercase())
            .then_with(|| a.note.cmp(&b.note))
    });

    Ok(summaries)
}
