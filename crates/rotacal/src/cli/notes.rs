//! Note CLI commands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Note management commands.
#[derive(Debug, Parser)]
pub struct NotesCommand {
    #[command(subcommand)]
    pub action: NotesAction,
}

/// Available note actions.
#[derive(Debug, Subcommand)]
pub enum NotesAction {
    /// List notes, optionally within a date range.
    List {
        /// First date (YYYY-MM-DD).
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last date (YYYY-MM-DD).
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Append a note to a date.
    Add {
        /// Date (YYYY-MM-DD).
        date: NaiveDate,
        /// Note text.
        text: String,
    },
    /// Replace a note.
    Edit {
        /// Date (YYYY-MM-DD).
        date: NaiveDate,
        /// Position of the note within the date, starting at 0.
        index: usize,
        /// New text.
        text: String,
    },
    /// Remove one note.
    Remove {
        /// Date (YYYY-MM-DD).
        date: NaiveDate,
        /// Position of the note within the date, starting at 0.
        index: usize,
    },
    /// Remove every note of a date.
    Clear {
        /// Date (YYYY-MM-DD).
        date: NaiveDate,
    },
    /// Append `{date, note}` pairs from a JSON array.
    Import {
        /// JSON file, `-` reads standard input.
        file: PathBuf,
    },
}
