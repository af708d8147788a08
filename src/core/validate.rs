//! Row validation and timezone normalization.

use chrono::NaiveDateTime;
use chrono_tz::Tz;

use crate::errors::{AppError, AppResult};
use crate::models::{ShiftRecord, ShiftRow};
use crate::utils::time::local_to_utc;

fn require_field<'a>(value: &'a str, name: &str) -> AppResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("empty field '{}'", name)));
    }
    Ok(trimmed)
}

fn parse_local(value: &str, format: &str, tz: Tz, name: &str) -> AppResult<chrono::DateTime<chrono::Utc>> {
    let naive = NaiveDateTime::parse_from_str(value, format).map_err(|_| {
        AppError::Validation(format!(
            "unparsable {} timestamp '{}' (expected format '{}')",
            name, value, format
        ))
    })?;
    local_to_utc(naive, tz)
}

/// Turn one raw CSV row into a validated, UTC-normalized shift.
pub fn normalize(row: &ShiftRow, tz: Tz, timestamp_format: &str) -> AppResult<ShiftRecord> {
    let attendee = require_field(&row.attendee, "attendee")?;
    let schedule = require_field(&row.schedule, "schedule")?;
    let start_raw = require_field(&row.start, "start")?;
    let end_raw = require_field(&row.end, "end")?;

    let start = parse_local(start_raw, timestamp_format, tz, "start")?;
    let end = parse_local(end_raw, timestamp_format, tz, "end")?;

    if start >= end {
        return Err(AppError::Validation(format!(
            "shift end ({}) is not after its start ({})",
            end_raw, start_raw
        )));
    }

    Ok(ShiftRecord {
        attendee: attendee.to_string(),
        schedule: schedule.to_string(),
        start,
        end,
    })
}
