//! Serde helpers for `HH:MM` time-of-day strings.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

/// Parses `HH:MM`, also accepting `HH:MM:SS`.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Serialize a time as `HH:MM`.
pub fn serialize_time_of_day<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&time.format("%H:%M").to_string())
}

/// Deserialize a time from `HH:MM` or `HH:MM:SS`.
pub fn deserialize_time_of_day<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_time_of_day(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day: {s}")))
}
