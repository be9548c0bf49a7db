use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::error::CalendarError;
use super::super::shift::date_from_dmy;
use super::table::{
    is_supported_year, lunar_leap_days, lunar_leap_month, lunar_month_days, lunar_year_days,
    END_YEAR, FIRST_YEAR,
};

/// A date in the lunar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LunarDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    /// True when the date falls within the inserted leap month.
    pub is_leap: bool,
}

impl LunarDate {
    /// Returns true on the first day of a lunar month.
    pub fn is_month_start(&self) -> bool {
        self.day == 1
    }

    /// Short label shown in a day cell: `"1/9"` on the first day of a
    /// month, `"6"` otherwise, with an `"N"` suffix inside a leap month.
    pub fn label(&self) -> String {
        let mut label = if self.is_month_start() {
            format!("{}/{}", self.day, self.month)
        } else {
            self.day.to_string()
        };
        if self.is_leap {
            label.push('N');
        }
        label
    }
}

/// Gregorian date of lunar 1900-01-01.
fn base_date() -> Result<NaiveDate, CalendarError> {
    date_from_dmy(31, 1, 1900)
}

/// Converts a Gregorian `(day, month, year)` triple to its lunar date.
///
/// Fails with [`CalendarError::InvalidDate`] for impossible triples and
/// [`CalendarError::UnsupportedYear`] outside lunar years 1900-2049.
pub fn to_lunar(day: u32, month: u32, year: i32) -> Result<LunarDate, CalendarError> {
    lunar_from_date(date_from_dmy(day, month, year)?)
}

/// Converts a Gregorian date to its lunar date.
pub fn lunar_from_date(date: NaiveDate) -> Result<LunarDate, CalendarError> {
    let mut offset = date.signed_duration_since(base_date()?).num_days();
    if offset < 0 {
        return Err(CalendarError::UnsupportedYear(FIRST_YEAR - 1));
    }

    // Walk whole lunar years until the offset goes negative, then back up one.
    let mut year = FIRST_YEAR;
    let mut year_days = 0;
    while year < END_YEAR && offset > 0 {
        year_days = i64::from(lunar_year_days(year)?);
        offset -= year_days;
        year += 1;
    }
    if offset < 0 {
        offset += year_days;
        year -= 1;
    }
    if !is_supported_year(year) {
        return Err(CalendarError::UnsupportedYear(year));
    }

    // Walk months, inserting the leap month right after its regular month.
    let leap = lunar_leap_month(year)?;
    let mut is_leap = false;
    let mut month: u32 = 1;
    let mut month_days = 0;
    while month < 13 && offset > 0 {
        if leap > 0 && month == leap + 1 && !is_leap {
            month -= 1;
            is_leap = true;
            month_days = i64::from(lunar_leap_days(year)?);
        } else {
            month_days = i64::from(lunar_month_days(year, month)?);
        }
        if is_leap && month == leap + 1 {
            is_leap = false;
        }
        offset -= month_days;
        month += 1;
    }

    // Landing exactly on the leap seam toggles the leap flag instead of
    // advancing the month.
    if offset == 0 && leap > 0 && month == leap + 1 {
        if is_leap {
            is_leap = false;
        } else {
            is_leap = true;
            month -= 1;
        }
    }
    if offset < 0 {
        offset += month_days;
        month -= 1;
    }

    Ok(LunarDate {
        day: (offset + 1) as u32,
        month,
        year,
        is_leap,
    })
}
