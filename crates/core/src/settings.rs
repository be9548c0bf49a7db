//! Notification cutoffs per shift.
//!
//! Only the selection of which cutoff applies lives here; scheduling and
//! delivery of notifications are outside this crate.

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::calendar::{ShiftKind, ShiftScheduler};
use crate::serde::{deserialize_time_of_day, serialize_time_of_day};

/// Title carried by every shift reminder.
pub const REMINDER_TITLE: &str = "Rotating shift calendar";

/// Time of day at which the reminder for each shift is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(
        serialize_with = "serialize_time_of_day",
        deserialize_with = "deserialize_time_of_day"
    )]
    pub day: NaiveTime,
    #[serde(
        serialize_with = "serialize_time_of_day",
        deserialize_with = "deserialize_time_of_day"
    )]
    pub night: NaiveTime,
    /// Used for every non-working shift.
    #[serde(
        serialize_with = "serialize_time_of_day",
        deserialize_with = "deserialize_time_of_day"
    )]
    pub off: NaiveTime,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            day: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or_default(),
            night: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
            off: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
        }
    }
}

/// A reminder ready to hand to a delivery channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub title: String,
    pub body: String,
    pub shift: ShiftKind,
}

impl NotificationSettings {
    /// Returns the cutoff that applies on a day with `shift`.
    pub fn cutoff_for(&self, shift: ShiftKind) -> NaiveTime {
        match shift {
            ShiftKind::Day => self.day,
            ShiftKind::Night => self.night,
            ShiftKind::Split | ShiftKind::Off => self.off,
        }
    }

    /// True when `now` falls in the same minute as the cutoff of `shift`.
    pub fn is_due(&self, shift: ShiftKind, now: NaiveTime) -> bool {
        let cutoff = self.cutoff_for(shift);
        cutoff.hour() == now.hour() && cutoff.minute() == now.minute()
    }

    /// Returns the reminder due at local time `now`, if any.
    pub fn reminder_at(&self, scheduler: &ShiftScheduler, now: NaiveDateTime) -> Option<Reminder> {
        let shift = scheduler.shift_for(now.date());
        self.is_due(shift, now.time()).then(|| Reminder {
            title: REMINDER_TITLE.to_string(),
            body: shift.display_name().to_string(),
            shift,
        })
    }
}
