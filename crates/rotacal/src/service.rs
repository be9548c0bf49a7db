//! Calendar service: the renderer state with an injected note store.
//!
//! The service owns the loaded [`NoteBook`] and the [`ShiftScheduler`].
//! Every mutation is applied to a copy, persisted through the repository
//! and only then committed, so a failed save leaves the in-memory notes
//! unchanged.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use tokio::sync::RwLock;

use rotacal_core::calendar::{
    build_day_cell, build_month_grid, summarize_by_date, summarize_by_note, DateSummary,
    DayCell, MonthGrid, NoteSummary, ShiftKind, ShiftScheduler,
};
use rotacal_core::notes::{merge_updates, MergeReport, NoteBook, NoteError, NoteUpdate};
use rotacal_core::settings::{NotificationSettings, Reminder};
use rotacal_core::storage::{NoteRepository, SettingsRepository};

use crate::error::Result;

/// The reminder cutoff that applies on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cutoff {
    pub date: NaiveDate,
    pub shift: ShiftKind,
    #[serde(serialize_with = "rotacal_core::serde::serialize_time_of_day")]
    pub time: NaiveTime,
}

/// Notes of one date, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayNotes {
    pub date: NaiveDate,
    pub notes: Vec<String>,
}

pub struct CalendarService<R> {
    repository: Arc<R>,
    scheduler: ShiftScheduler,
    notes: Arc<RwLock<NoteBook>>,
}

impl<R> Clone for CalendarService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            scheduler: self.scheduler.clone(),
            notes: Arc::clone(&self.notes),
        }
    }
}

impl<R> CalendarService<R>
where
    R: NoteRepository + SettingsRepository,
{
    /// Loads the stored notes and builds the service around them.
    pub async fn load(repository: Arc<R>, scheduler: ShiftScheduler) -> Result<Self> {
        let notes = repository.load_notes().await?;
        tracing::info!(dates = notes.len(), "Loaded notes");
        Ok(Self {
            repository,
            scheduler,
            notes: Arc::new(RwLock::new(notes)),
        })
    }

    pub fn scheduler(&self) -> &ShiftScheduler {
        &self.scheduler
    }

    pub fn shift_for(&self, date: NaiveDate) -> ShiftKind {
        self.scheduler.shift_for(date)
    }

    /// Returns a snapshot of the current notes.
    pub async fn notes(&self) -> NoteBook {
        self.notes.read().await.clone()
    }

    /// Lists every date with notes in `start..=end`.
    pub async fn notes_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<DayNotes> {
        self.notes
            .read()
            .await
            .range(start, end)
            .map(|(date, notes)| DayNotes {
                date,
                notes: notes.to_vec(),
            })
            .collect()
    }

    pub async fn month_grid(&self, year: i32, month: u32, today: NaiveDate) -> Result<MonthGrid> {
        let notes = self.notes.read().await;
        Ok(build_month_grid(year, month, today, &self.scheduler, &notes)?)
    }

    /// Builds the cell of `date` as seen from its own month.
    pub async fn day_cell(&self, date: NaiveDate, today: NaiveDate) -> Result<DayCell> {
        let notes = self.notes.read().await;
        Ok(build_day_cell(
            date,
            date.year(),
            date.month(),
            today,
            &self.scheduler,
            &notes,
        )?)
    }

    pub async fn summary_by_date(&self, year: i32, month: u32) -> Result<Vec<DateSummary>> {
        let notes = self.notes.read().await;
        Ok(summarize_by_date(year, month, &self.scheduler, &notes)?)
    }

    pub async fn summary_by_note(&self, year: i32, month: u32) -> Result<Vec<NoteSummary>> {
        let notes = self.notes.read().await;
        Ok(summarize_by_note(year, month, &notes)?)
    }

    pub async fn add_note(&self, date: NaiveDate, text: &str) -> Result<()> {
        self.mutate(|book| book.add(date, text)).await?;
        tracing::info!(%date, "Added note");
        Ok(())
    }

    pub async fn edit_note(&self, date: NaiveDate, index: usize, text: &str) -> Result<()> {
        self.mutate(|book| book.edit(date, index, text)).await?;
        tracing::info!(%date, index, "Edited note");
        Ok(())
    }

    /// Removes note `index` of `date` and returns its text.
    pub async fn remove_note(&self, date: NaiveDate, index: usize) -> Result<String> {
        let removed = self.mutate(|book| book.remove(date, index)).await?;
        tracing::info!(%date, index, "Removed note");
        Ok(removed)
    }

    /// Removes every note of `date`, returning how many were dropped.
    pub async fn clear_notes(&self, date: NaiveDate) -> Result<usize> {
        let cleared = self.mutate(|book| Ok(book.clear(date))).await?;
        tracing::info!(%date, cleared, "Cleared notes");
        Ok(cleared)
    }

    /// Appends parsed `{date, note}` pairs, skipping the invalid ones.
    pub async fn import_updates(&self, updates: &[NoteUpdate]) -> Result<MergeReport> {
        let report = self
            .mutate(|book| Ok(merge_updates(book, updates)))
            .await?;
        if !report.skipped.is_empty() {
            tracing::warn!(skipped = report.skipped.len(), "Skipped invalid note updates");
        }
        tracing::info!(applied = report.applied, "Imported notes");
        Ok(report)
    }

    pub async fn settings(&self) -> Result<NotificationSettings> {
        Ok(self.repository.load_settings().await?)
    }

    pub async fn update_settings(&self, settings: NotificationSettings) -> Result<()> {
        self.repository.save_settings(&settings).await?;
        tracing::info!(
            day = %settings.day,
            night = %settings.night,
            off = %settings.off,
            "Saved notification settings"
        );
        Ok(())
    }

    /// Returns the reminder cutoff of `date`.
    pub async fn cutoff_for(&self, date: NaiveDate) -> Result<Cutoff> {
        let settings = self.settings().await?;
        let shift = self.scheduler.shift_for(date);
        Ok(Cutoff {
            date,
            shift,
            time: settings.cutoff_for(shift),
        })
    }

    /// Returns the reminder due at local time `now`, if any.
    pub async fn reminder_at(&self, now: NaiveDateTime) -> Result<Option<Reminder>> {
        let settings = self.settings().await?;
        Ok(settings.reminder_at(&self.scheduler, now))
    }

    async fn mutate<T, F>(&self, apply: F) -> Result<T>
    where
        F: FnOnce(&mut NoteBook) -> std::result::Result<T, NoteError>,
    {
        let mut notes = self.notes.write().await;
        let mut updated = notes.clone();
        let value = apply(&mut updated)?;
        updated.prune();
        self.repository.save_notes(&updated).await?;
        *notes = updated;
        Ok(value)
    }
}
