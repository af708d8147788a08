use chrono::{DateTime, Utc};
use serde::Serialize;

/// One raw line of the upload CSV, untouched except for field extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftRow {
    pub line: u64,        // ⇔ 1-based line number in the source file
    pub attendee: String, // ⇔ user id ("PXXXXXX") or email
    pub start: String,    // ⇔ local timestamp, format from config
    pub end: String,      // ⇔ local timestamp, format from config
    pub schedule: String, // ⇔ PagerDuty schedule id
}

/// A validated shift, timezone-normalized to UTC.
/// Invariant: `start` is strictly before `end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftRecord {
    pub attendee: String,
    pub schedule: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// One row of the weekly-restriction CSV used by the `schedule` command.
#[derive(Debug, Clone)]
pub struct WeeklyShift {
    pub line: u64,
    pub attendee: String, // email, matched against PagerDuty users
    pub weekday: String,  // "Monday".."Sunday", case-insensitive
    pub start: String,    // HH:MM time of day
    pub end: String,      // HH:MM time of day
}
