//! Rotating shift calculation anchored to an epoch date.
//!
//! Day counts are derived from the `(year, month, day)` triple through
//! `NaiveDate`, so there is no wall-clock or timezone involvement and the
//! result is stable across DST transitions.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::CalendarError;

/// The kind of duty assigned to a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    Day,
    Night,
    Split,
    /// Not part of the default rotation; only produced when a configured
    /// pattern contains it.
    Off,
}

impl ShiftKind {
    /// Returns the short label used in configuration and JSON output.
    pub fn label(&self) -> &'static str {
        match self {
            ShiftKind::Day => "day",
            ShiftKind::Night => "night",
            ShiftKind::Split => "split",
            ShiftKind::Off => "off",
        }
    }

    /// Returns the human readable name used in summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            ShiftKind::Day => "day shift",
            ShiftKind::Night => "night shift",
            ShiftKind::Split => "split",
            ShiftKind::Off => "off",
        }
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShiftKind {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(ShiftKind::Day),
            "night" => Ok(ShiftKind::Night),
            "split" => Ok(ShiftKind::Split),
            "off" => Ok(ShiftKind::Off),
            other => Err(CalendarError::UnknownShift(other.to_string())),
        }
    }
}

/// An ordered, cyclic, non-empty sequence of shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ShiftKind>", into = "Vec<ShiftKind>")]
pub struct ShiftPattern(Vec<ShiftKind>);

impl ShiftPattern {
    /// Creates a pattern, rejecting an empty sequence.
    pub fn new(shifts: Vec<ShiftKind>) -> Result<Self, CalendarError> {
        if shifts.is_empty() {
            return Err(CalendarError::EmptyPattern);
        }
        Ok(Self(shifts))
    }

    /// Parses a comma separated list of labels, e.g. `"day,night,split"`.
    pub fn parse(labels: &str) -> Result<Self, CalendarError> {
        let shifts = labels
            .split(',')
            .filter(|label| !label.trim().is_empty())
            .map(ShiftKind::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(shifts)
    }

    /// Number of days in one rotation.
    pub fn period(&self) -> usize {
        self.0.len()
    }

    pub fn shifts(&self) -> &[ShiftKind] {
        &self.0
    }
}

impl Default for ShiftPattern {
    fn default() -> Self {
        Self(vec![ShiftKind::Day, ShiftKind::Night, ShiftKind::Split])
    }
}

impl TryFrom<Vec<ShiftKind>> for ShiftPattern {
    type Error = CalendarError;

    fn try_from(shifts: Vec<ShiftKind>) -> Result<Self, Self::Error> {
        Self::new(shifts)
    }
}

impl From<ShiftPattern> for Vec<ShiftKind> {
    fn from(pattern: ShiftPattern) -> Self {
        pattern.0
    }
}

/// Returns the number of days between 1970-01-01 and `date`.
pub fn days_since_unix_epoch(date: NaiveDate) -> i64 {
    // `NaiveDate::default()` is 1970-01-01.
    date.signed_duration_since(NaiveDate::default()).num_days()
}

/// Builds a date from a `(day, month, year)` triple, failing instead of clamping.
pub fn date_from_dmy(day: u32, month: u32, year: i32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| CalendarError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
}

/// Parses an ISO `YYYY-MM-DD` date key.
pub fn parse_date_key(key: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidDate(key.to_string()))
}

/// Formats a date as the ISO `YYYY-MM-DD` key used by the note store.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Maps calendar dates to shifts of a repeating pattern.
///
/// The epoch date is day index 0, so `shift_for(epoch)` is the first
/// element of the pattern. Floor-modulo keeps dates before the epoch on
/// the same cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftScheduler {
    epoch: NaiveDate,
    epoch_days: i64,
    pattern: ShiftPattern,
}

impl ShiftScheduler {
    pub fn new(epoch: NaiveDate, pattern: ShiftPattern) -> Self {
        Self {
            epoch,
            epoch_days: days_since_unix_epoch(epoch),
            pattern,
        }
    }

    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    pub fn pattern(&self) -> &ShiftPattern {
        &self.pattern
    }

    /// Position of `date` within the rotation, in `0..period`.
    pub fn index_for(&self, date: NaiveDate) -> usize {
        let diff = days_since_unix_epoch(date) - self.epoch_days;
        diff.rem_euclid(self.pattern.period() as i64) as usize
    }

    /// Returns the shift assigned to `date`. Total over all dates.
    pub fn shift_for(&self, date: NaiveDate) -> ShiftKind {
        self.pattern.shifts()[self.index_for(date)]
    }
}

impl Default for ShiftScheduler {
    fn default() -> Self {
        let epoch = NaiveDate::from_ymd_opt(2025, 10, 26).unwrap_or_default();
        Self::new(epoch, ShiftPattern::default())
    }
}
