//! Month grid and day-cell view-models.
//!
//! A viewed month is always laid out as 6 weeks of 7 days starting on the
//! Monday on or before the first of the month. Each cell bundles the shift,
//! lunar date and notes of its date; rendering is left to the consumer.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::notes::NoteBook;

use super::error::CalendarError;
use super::lunar::{lunar_from_date, LunarDate};
use super::shift::{ShiftKind, ShiftScheduler};

/// Number of cells in a month grid (6 weeks x 7 days).
pub const GRID_CELLS: usize = 42;

/// Visual emphasis of an in-month cell. Today wins over a lunar month start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellHighlight {
    None,
    LunarMonthStart,
    Today,
}

/// Derived view-model for one date. Recomputed on every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Gregorian day of month.
    pub day: u32,
    pub lunar: LunarDate,
    pub lunar_label: String,
    pub shift: ShiftKind,
    pub notes: Vec<String>,
    /// False for leading/trailing days of the neighbouring months.
    pub in_month: bool,
    pub is_today: bool,
    pub highlight: CellHighlight,
}

impl DayCell {
    /// Cells outside the viewed month are rendered dimmed.
    pub fn is_dimmed(&self) -> bool {
        !self.in_month
    }

    pub fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }
}

/// All 42 cells of a viewed month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Returns the grid split into its 6 weeks.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }

    /// Returns the cell of `date` when it is visible in this grid.
    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }
}

/// Returns the first day of `year`/`month`.
pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CalendarError::InvalidDate(format!("{year:04}-{month:02}")))
}

/// Returns the last day of `year`/`month`.
pub fn last_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_of_month(year, month)?;
    first_of_month(next_year, next_month)?
        .pred_opt()
        .ok_or_else(|| CalendarError::InvalidDate(format!("{year:04}-{month:02}")))
}

/// Returns the Monday that opens the grid of `year`/`month`.
pub fn grid_start(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    let first = first_of_month(year, month)?;
    // Monday = 1 .. Sunday = 7, so a month opening on Sunday backs up six days.
    let weekday = first.weekday().number_from_monday();
    Ok(first - Duration::days(i64::from(weekday - 1)))
}

/// Returns the 42 consecutive dates shown for `year`/`month`.
pub fn grid_dates(year: i32, month: u32) -> Result<Vec<NaiveDate>, CalendarError> {
    let start = grid_start(year, month)?;
    Ok((0..GRID_CELLS as i64)
        .map(|offset| start + Duration::days(offset))
        .collect())
}

/// Builds the cell for `date` as seen from the viewed `year`/`month`.
pub fn build_day_cell(
    date: NaiveDate,
    year: i32,
    month: u32,
    today: NaiveDate,
    scheduler: &ShiftScheduler,
    notes: &NoteBook,
) -> Result<DayCell, CalendarError> {
    let lunar = lunar_from_date(date)?;
    let in_month = date.year() == year && date.month() == month;
    let is_today = date == today;

    let highlight = if !in_month {
        CellHighlight::None
    } else if is_today {
        CellHighlight::Today
    } else if lunar.is_month_start() {
        CellHighlight::LunarMonthStart
    } else {
        CellHighlight::None
    };

    Ok(DayCell {
        date,
        day: date.day(),
        lunar_label: lunar.label(),
        lunar,
        shift: scheduler.shift_for(date),
        notes: notes.notes_for(date).to_vec(),
        in_month,
        is_today,
        highlight,
    })
}

/// Builds the full 6x7 grid for `year`/`month`.
pub fn build_month_grid(
    year: i32,
    month: u32,
    today: NaiveDate,
    scheduler: &ShiftScheduler,
    notes: &NoteBook,
) -> Result<MonthGrid, CalendarError> {
    let cells = grid_dates(year, month)?
        .into_iter()
        .map(|date| build_day_cell(date, year, month, today, scheduler, notes))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MonthGrid { year, month, cells })
}
