//! Time utilities: parsing HH:MM, local→UTC conversion, weekday numbering.

use crate::errors::{AppError, AppResult};
use chrono::offset::LocalResult;
use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

pub fn parse_hhmm(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

/// Parse a timezone name from config ("Europe/Amsterdam", "UTC", ...).
pub fn parse_timezone(name: &str) -> AppResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| AppError::InvalidTimezone(name.to_string()))
}

/// Interpret a naive local timestamp in `tz` and convert it to UTC.
///
/// A nonexistent local time (DST gap) is an error; an ambiguous one
/// (DST fold) resolves to the earlier instant.
pub fn local_to_utc(naive: NaiveDateTime, tz: Tz) -> AppResult<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _later) => Ok(earlier.with_timezone(&Utc)),
        LocalResult::None => Err(AppError::Validation(format!(
            "local time {} does not exist in timezone {}",
            naive, tz
        ))),
    }
}

/// Weekday name → 1-7 (Monday-Sunday), the numbering PagerDuty
/// weekly restrictions use.
pub fn weekday_number(name: &str) -> Option<u8> {
    let n = match name.trim().to_lowercase().as_str() {
        "monday" => 1,
        "tuesday" => 2,
        "wednesday" => 3,
        "thursday" => 4,
        "friday" => 5,
        "saturday" => 6,
        "sunday" => 7,
        _ => return None,
    };
    Some(n)
}
