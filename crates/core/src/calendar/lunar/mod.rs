//! Gregorian to lunar conversion, table driven.

mod convert;
mod table;

pub use convert::{lunar_from_date, to_lunar, LunarDate};
pub use table::{
    is_supported_year, lunar_leap_days, lunar_leap_month, lunar_month_days, lunar_year_days,
    END_YEAR, FIRST_YEAR,
};
