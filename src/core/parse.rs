//! CSV readers for the upload and schedule commands.
//!
//! Malformed input (missing file, unknown header, wrong field count) is
//! fatal; nothing row-level is decided here.

use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};

use crate::config::Columns;
use crate::errors::{AppError, AppResult};
use crate::models::{ShiftRow, WeeklyShift};

/// Header names of the weekly-restriction CSV (the `schedule` command).
const WEEKLY_HEADERS: [&str; 4] = ["attendee", "weekday", "start", "end"];

struct ColumnIndex {
    attendee: usize,
    start: usize,
    end: usize,
    schedule: usize,
}

fn open_reader(path: &Path) -> AppResult<Reader<std::fs::File>> {
    if !path.exists() {
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("input file not found: {}", path.display()),
        )));
    }

    ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| AppError::MalformedInput(format!("{}: {}", path.display(), e)))
}

fn find_column(headers: &StringRecord, name: &str) -> AppResult<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            AppError::MalformedInput(format!(
                "missing column '{}' in header [{}]",
                name,
                headers.iter().collect::<Vec<_>>().join(",")
            ))
        })
}

fn field(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or_default().to_string()
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

/// Read the whole upload CSV into `ShiftRow`s. Columns are located by the
/// configured header names; extra columns are ignored.
pub fn read_shift_rows(path: &Path, columns: &Columns) -> AppResult<Vec<ShiftRow>> {
    let mut reader = open_reader(path)?;

    let headers = reader
        .headers()
        .map_err(|e| AppError::MalformedInput(format!("{}: {}", path.display(), e)))?
        .clone();

    let index = ColumnIndex {
        attendee: find_column(&headers, &columns.attendee)?,
        start: find_column(&headers, &columns.start)?,
        end: find_column(&headers, &columns.end)?,
        schedule: find_column(&headers, &columns.schedule)?,
    };

    let mut rows = Vec::new();
    for result in reader.records() {
        let record =
            result.map_err(|e| AppError::MalformedInput(format!("{}: {}", path.display(), e)))?;

        rows.push(ShiftRow {
            line: record_line(&record),
            attendee: field(&record, index.attendee),
            start: field(&record, index.start),
            end: field(&record, index.end),
            schedule: field(&record, index.schedule),
        });
    }

    Ok(rows)
}

/// Read the weekly-restriction CSV (`attendee,weekday,start,end`).
pub fn read_weekly_shifts(path: &Path) -> AppResult<Vec<WeeklyShift>> {
    let mut reader = open_reader(path)?;

    let headers = reader
        .headers()
        .map_err(|e| AppError::MalformedInput(format!("{}: {}", path.display(), e)))?
        .clone();

    let [attendee, weekday, start, end] = WEEKLY_HEADERS;
    let idx_attendee = find_column(&headers, attendee)?;
    let idx_weekday = find_column(&headers, weekday)?;
    let idx_start = find_column(&headers, start)?;
    let idx_end = find_column(&headers, end)?;

    let mut shifts = Vec::new();
    for result in reader.records() {
        let record =
            result.map_err(|e| AppError::MalformedInput(format!("{}: {}", path.display(), e)))?;

        shifts.push(WeeklyShift {
            line: record_line(&record),
            attendee: field(&record, idx_attendee),
            weekday: field(&record, idx_weekday),
            start: field(&record, idx_start),
            end: field(&record, idx_end),
        });
    }

    Ok(shifts)
}
