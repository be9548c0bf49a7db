//! CLI command definitions.

pub mod feeds;
pub mod notes;
pub mod settings;

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};

/// Rotating shift calendar with lunar dates, notes and news.
#[derive(Debug, Parser)]
#[command(name = "rotacal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Note store path.
    #[arg(long, env = "ROTACAL_NOTES_PATH")]
    pub notes_path: Option<PathBuf>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// How a monthly summary is grouped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SummaryKind {
    /// One row per date with notes.
    #[default]
    Date,
    /// One row per distinct note text.
    Note,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the 6-week grid of a month.
    Month {
        /// Year, defaults to the current year.
        #[arg(long)]
        year: Option<i32>,
        /// Month (1-12), defaults to the current month.
        #[arg(long)]
        month: Option<u32>,
    },
    /// Summarize the notes of a month.
    Summary {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
        /// Grouping.
        #[arg(long, value_enum, default_value = "date")]
        by: SummaryKind,
    },
    /// Show shift, lunar date and notes of one date.
    Day {
        /// Date (YYYY-MM-DD), defaults to today.
        date: Option<NaiveDate>,
    },
    /// Note management.
    Notes(notes::NotesCommand),
    /// News feeds.
    Feeds(feeds::FeedsCommand),
    /// Show the reminder cutoff of a date.
    Cutoff {
        /// Date (YYYY-MM-DD), defaults to today.
        date: Option<NaiveDate>,
        /// Also check whether the reminder is due at this time (HH:MM).
        #[arg(long, value_parser = parse_time)]
        at: Option<NaiveTime>,
    },
    /// Notification settings.
    Settings(settings::SettingsCommand),
}

/// Parses an `HH:MM` argument.
pub fn parse_time(value: &str) -> Result<NaiveTime, String> {
    rotacal_core::serde::parse_time_of_day(value)
        .ok_or_else(|| format!("expected HH:MM, got {value:?}"))
}
