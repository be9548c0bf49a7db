//! Per-year lunar calendar encodings for lunar years 1900 through 2049.
//!
//! Each entry packs one lunar year:
//!
//! - bits 4..=15: month lengths for months 1..=12, high bit first
//!   (`1` = 30 days, `0` = 29 days)
//! - bits 0..=3: the leap month number, `0` when the year has none
//! - bit 16: `1` when the leap month has 30 days

use super::super::error::CalendarError;

/// First lunar year covered by [`LUNAR_INFO`].
pub const FIRST_YEAR: i32 = 1900;

/// One past the last lunar year covered by [`LUNAR_INFO`].
pub const END_YEAR: i32 = 2050;

#[rustfmt::skip]
pub const LUNAR_INFO: [u32; 150] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
];

/// Returns true when `year` has an encoding.
pub fn is_supported_year(year: i32) -> bool {
    (FIRST_YEAR..END_YEAR).contains(&year)
}

fn encoding(year: i32) -> Result<u32, CalendarError> {
    if !is_supported_year(year) {
        return Err(CalendarError::UnsupportedYear(year));
    }
    Ok(LUNAR_INFO[(year - FIRST_YEAR) as usize])
}

/// Number of days (29 or 30) in regular lunar month `month` (1..=12) of `year`.
pub fn lunar_month_days(year: i32, month: u32) -> Result<u32, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidDate(format!(
            "lunar month {month} of {year}"
        )));
    }
    let info = encoding(year)?;
    Ok(if info & (0x10000 >> month) != 0 { 30 } else { 29 })
}

/// The leap month number of `year` (1..=12), or 0 when there is none.
pub fn lunar_leap_month(year: i32) -> Result<u32, CalendarError> {
    Ok(encoding(year)? & 0xf)
}

/// Number of days in the leap month of `year`: 0, 29 or 30.
pub fn lunar_leap_days(year: i32) -> Result<u32, CalendarError> {
    let info = encoding(year)?;
    if info & 0xf == 0 {
        return Ok(0);
    }
    Ok(if info & 0x10000 != 0 { 30 } else { 29 })
}

/// Total number of days in lunar `year`, leap month included.
pub fn lunar_year_days(year: i32) -> Result<u32, CalendarError> {
    let info = encoding(year)?;
    let long_months = (info & 0xfff0).count_ones();
    Ok(348 + long_months + lunar_leap_days(year)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_150_years() {
        assert_eq!(LUNAR_INFO.len(), (END_YEAR - FIRST_YEAR) as usize);
        assert!(is_supported_year(1900));
        assert!(is_supported_year(2049));
        assert!(!is_supported_year(1899));
        assert!(!is_supported_year(2050));
    }

    #[test]
    fn test_month_days_bounds() {
        for year in FIRST_YEAR..END_YEAR {
            for month in 1..=12 {
                let days = lunar_month_days(year, month).unwrap();
                assert!(days == 29 || days == 30, "{year}/{month}: {days}");
            }
        }
    }

    #[test]
    fn test_leap_days_bounds() {
        for year in FIRST_YEAR..END_YEAR {
            let days = lunar_leap_days(year).unwrap();
            assert!(matches!(days, 0 | 29 | 30), "{year}: {days}");
            assert_eq!(days == 0, lunar_leap_month(year).unwrap() == 0);
        }
    }

    #[test]
    fn test_year_days_range() {
        for year in FIRST_YEAR..END_YEAR {
            let days = lunar_year_days(year).unwrap();
            assert!((348..=390).contains(&days), "{year}: {days}");
        }
    }

    #[test]
    fn test_known_years() {
        // 2025 has a 29-day leap sixth month.
        assert_eq!(lunar_leap_month(2025), Ok(6));
        assert_eq!(lunar_leap_days(2025), Ok(29));
        assert_eq!(lunar_year_days(2025), Ok(384));
        assert_eq!(lunar_month_days(2025, 1), Ok(30));
        assert_eq!(lunar_month_days(2025, 12), Ok(29));

        assert_eq!(lunar_leap_month(2024), Ok(0));
        assert_eq!(lunar_year_days(2024), Ok(354));
        assert_eq!(lunar_year_days(1900), Ok(384));
        assert_eq!(lunar_leap_month(2033), Ok(11));
    }

    #[test]
    fn test_out_of_range_year_fails() {
        assert_eq!(
            lunar_year_days(1899),
            Err(CalendarError::UnsupportedYear(1899))
        );
        assert_eq!(
            lunar_leap_month(2050),
            Err(CalendarError::UnsupportedYear(2050))
        );
        assert!(lunar_month_days(2050, 1).is_err());
    }

    #[test]
    fn test_month_out_of_range_fails() {
        assert!(matches!(
            lunar_month_days(2025, 0),
            Err(CalendarError::InvalidDate(_))
        ));
        assert!(lunar_month_days(2025, 13).is_err());
    }
}
