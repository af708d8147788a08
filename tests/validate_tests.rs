use chrono::{TimeZone, Utc};
use chrono_tz::Tz;

use pdrota::core::validate::normalize;
use pdrota::errors::AppError;
use pdrota::models::ShiftRow;
use pdrota::pd::types::OverrideRequest;

const FMT: &str = "%Y-%m-%d %H:%M";

fn row(attendee: &str, start: &str, end: &str, schedule: &str) -> ShiftRow {
    ShiftRow {
        line: 2,
        attendee: attendee.to_string(),
        start: start.to_string(),
        end: end.to_string(),
        schedule: schedule.to_string(),
    }
}

fn tz(name: &str) -> Tz {
    name.parse().unwrap()
}

#[test]
fn test_valid_row_start_strictly_before_end() {
    let record = normalize(
        &row("PUSR1", "2025-09-01 09:00", "2025-09-01 17:00", "PSCHED1"),
        tz("UTC"),
        FMT,
    )
    .unwrap();

    assert!(record.start < record.end);
    assert_eq!(record.attendee, "PUSR1");
    assert_eq!(record.schedule, "PSCHED1");
}

#[test]
fn test_local_timestamps_convert_to_utc() {
    // Amsterdam is UTC+2 in July
    let record = normalize(
        &row("PUSR1", "2025-07-01 09:00", "2025-07-01 17:00", "PSCHED1"),
        tz("Europe/Amsterdam"),
        FMT,
    )
    .unwrap();

    assert_eq!(record.start, Utc.with_ymd_and_hms(2025, 7, 1, 7, 0, 0).unwrap());
    assert_eq!(record.end, Utc.with_ymd_and_hms(2025, 7, 1, 15, 0, 0).unwrap());
}

#[test]
fn test_dst_gap_is_rejected() {
    // 2025-03-30 02:30 does not exist in Amsterdam (clocks jump 02:00→03:00)
    let err = normalize(
        &row("PUSR1", "2025-03-30 02:30", "2025-03-30 08:00", "PSCHED1"),
        tz("Europe/Amsterdam"),
        FMT,
    )
    .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_dst_fold_takes_earlier_instant() {
    // 2025-10-26 02:30 happens twice in Amsterdam; the first pass is CEST (+2)
    let record = normalize(
        &row("PUSR1", "2025-10-26 02:30", "2025-10-26 08:00", "PSCHED1"),
        tz("Europe/Amsterdam"),
        FMT,
    )
    .unwrap();

    assert_eq!(
        record.start,
        Utc.with_ymd_and_hms(2025, 10, 26, 0, 30, 0).unwrap()
    );
}

#[test]
fn test_empty_fields_are_rejected() {
    for bad in [
        row("", "2025-09-01 09:00", "2025-09-01 17:00", "PSCHED1"),
        row("PUSR1", "", "2025-09-01 17:00", "PSCHED1"),
        row("PUSR1", "2025-09-01 09:00", "", "PSCHED1"),
        row("PUSR1", "2025-09-01 09:00", "2025-09-01 17:00", "  "),
    ] {
        let err = normalize(&bad, tz("UTC"), FMT).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "row: {:?}", bad);
    }
}

#[test]
fn test_end_not_after_start_is_rejected() {
    let reversed = normalize(
        &row("PUSR1", "2025-09-01 17:00", "2025-09-01 09:00", "PSCHED1"),
        tz("UTC"),
        FMT,
    );
    assert!(matches!(reversed, Err(AppError::Validation(_))));

    let equal = normalize(
        &row("PUSR1", "2025-09-01 09:00", "2025-09-01 09:00", "PSCHED1"),
        tz("UTC"),
        FMT,
    );
    assert!(matches!(equal, Err(AppError::Validation(_))));
}

#[test]
fn test_override_request_round_trips_record_fields() {
    let record = normalize(
        &row("PUSR1", "2025-09-01 09:00", "2025-09-01 17:00", "PSCHED1"),
        tz("UTC"),
        FMT,
    )
    .unwrap();

    let request = OverrideRequest::from_record(&record);

    assert_eq!(request.attendee, record.attendee);
    assert_eq!(request.schedule, record.schedule);
    assert_eq!(request.start, record.start);
    assert_eq!(request.end, record.end);
}

#[test]
fn test_payload_carries_resolved_user_and_utc_stamps() {
    let record = normalize(
        &row("bob@example.com", "2025-09-01 09:00", "2025-09-01 17:00", "PSCHED1"),
        tz("UTC"),
        FMT,
    )
    .unwrap();

    let payload = OverrideRequest::from_record(&record).payload("PBOB");

    assert_eq!(payload.start, "2025-09-01T09:00:00Z");
    assert_eq!(payload.end, "2025-09-01T17:00:00Z");
    assert_eq!(payload.user.id, "PBOB");
    assert_eq!(payload.user.kind, "user_reference");
}
