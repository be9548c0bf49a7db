use thiserror::Error;

/// Errors raised by the pure calendar computations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Unsupported date range: lunar year {0} is outside 1900-2049")]
    UnsupportedYear(i32),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Shift pattern cannot be empty")]
    EmptyPattern,
    #[error("Unknown shift label: {0}")]
    UnknownShift(String),
}
