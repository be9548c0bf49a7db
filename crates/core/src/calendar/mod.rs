mod error;
mod grid;
mod lunar;
mod shift;
mod summary;

pub use error::CalendarError;
pub use grid::{
    build_day_cell, build_month_grid, first_of_month, grid_dates, grid_start, last_of_month,
    CellHighlight, DayCell, MonthGrid, GRID_CELLS,
};
pub use lunar::{
    is_supported_year, lunar_from_date, lunar_leap_days, lunar_leap_month, lunar_month_days,
    lunar_year_days, to_lunar, LunarDate, END_YEAR, FIRST_YEAR,
};
pub use shift::{
    date_from_dmy, date_key, days_since_unix_epoch, parse_date_key, ShiftKind, ShiftPattern,
    ShiftScheduler,
};
pub use summary::{summarize_by_date, summarize_by_note, DateSummary, NoteSummary};
