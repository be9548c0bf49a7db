use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::NoteError;

/// Free-text notes keyed by calendar date.
///
/// Serialized as a JSON object whose keys are ISO `YYYY-MM-DD` strings.
/// Notes within a date keep insertion order, which is the display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteBook {
    dates: BTreeMap<NaiveDate, Vec<String>>,
}

impl NoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notes of `date`, empty when there are none.
    pub fn notes_for(&self, date: NaiveDate) -> &[String] {
        self.dates.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    /// Appends a note to `date`. The text is trimmed; empty text is rejected.
    pub fn add(&mut self, date: NaiveDate, text: &str) -> Result<(), NoteError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(NoteError::EmptyNote);
        }
        self.dates.entry(date).or_default().push(text.to_string());
        Ok(())
    }

    /// Replaces note `index` of `date` with the trimmed `text`.
    pub fn edit(&mut self, date: NaiveDate, index: usize, text: &str) -> Result<(), NoteError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(NoteError::EmptyNote);
        }
        let note = self
            .dates
            .get_mut(&date)
            .and_then(|notes| notes.get_mut(index))
            .ok_or(NoteError::NoteNotFound { date, index })?;
        *note = text.to_string();
        Ok(())
    }

    /// Removes and returns note `index` of `date`.
    ///
    /// The date may be left with an empty sequence; [`NoteBook::prune`]
    /// drops it before persistence.
    pub fn remove(&mut self, date: NaiveDate, index: usize) -> Result<String, NoteError> {
        match self.dates.get_mut(&date) {
            Some(notes) if index < notes.len() => Ok(notes.remove(index)),
            _ => Err(NoteError::NoteNotFound { date, index }),
        }
    }

    /// Removes every note of `date`, returning how many were dropped.
    pub fn clear(&mut self, date: NaiveDate) -> usize {
        self.dates.remove(&date).map(|notes| notes.len()).unwrap_or(0)
    }

    /// Drops dates whose note sequence is empty.
    pub fn prune(&mut self) {
        self.dates.retain(|_, notes| !notes.is_empty());
    }

    /// Returns a pruned copy, the shape written to persistence.
    pub fn pruned(&self) -> Self {
        let mut copy = self.clone();
        copy.prune();
        copy
    }

    /// Iterates dates in ascending order with their notes.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[String])> {
        self.dates.iter().map(|(date, notes)| (*date, notes.as_slice()))
    }

    /// Iterates the dates in `start..=end` that have at least one note.
    pub fn range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = (NaiveDate, &[String])> {
        self.dates
            .range(start..=end)
            .filter(|(_, notes)| !notes.is_empty())
            .map(|(date, notes)| (*date, notes.as_slice()))
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.dates.contains_key(&date)
    }

    /// Number of dates with an entry, empty sequences included.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
