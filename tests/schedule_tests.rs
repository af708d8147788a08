use chrono::{TimeZone, Utc};
use predicates::str::contains;
use tempfile::TempDir;

use pdrota::core::schedule::ScheduleBuilder;
use pdrota::errors::AppError;
use pdrota::models::{PdUser, WeeklyShift};
use pdrota::pd::PagerDutyClient;

mod common;
use common::{pdr, weekly_csv};

fn user(id: &str, name: &str, email: &str) -> PdUser {
    PdUser {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn shift(line: u64, attendee: &str, weekday: &str, start: &str, end: &str) -> WeeklyShift {
    WeeklyShift {
        line,
        attendee: attendee.to_string(),
        weekday: weekday.to_string(),
        start: start.to_string(),
        end: end.to_string(),
    }
}

fn builder() -> ScheduleBuilder {
    ScheduleBuilder::new("Primary On-Call", "Europe/Amsterdam")
}

#[test]
fn test_build_layers_and_restrictions_from_rows() {
    let users = vec![
        user("PALICE", "Alice", "alice@example.com"),
        user("PBOB", "Bob", "bob@example.com"),
    ];
    let shifts = vec![
        shift(2, "alice@example.com", "Monday", "09:00", "17:00"),
        shift(3, "alice@example.com", "Wednesday", "09:00", "12:30"),
        shift(4, "bob@example.com", "sunday", "08:00", "20:00"),
    ];

    let now = Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap();
    let payload = builder().users(users).build(&shifts, now).unwrap();

    assert_eq!(payload.name, "Primary On-Call");
    assert_eq!(payload.time_zone, "Europe/Amsterdam");
    assert_eq!(payload.schedule_layers.len(), 2);

    let alice = &payload.schedule_layers[0];
    assert_eq!(alice.name, "Layer for Alice");
    assert_eq!(alice.start, "2025-09-01T12:00:00Z");
    assert_eq!(alice.end, "2025-09-08T12:00:00Z");
    assert_eq!(alice.rotation_turn_length_seconds, 3600);
    assert_eq!(alice.users[0].user.id, "PALICE");
    assert_eq!(alice.restrictions.len(), 2);
    assert_eq!(alice.restrictions[0].start_day_of_week, 1);
    assert_eq!(alice.restrictions[0].start_time_of_day, "09:00:00");
    assert_eq!(alice.restrictions[0].duration_seconds, 8 * 3600);
    assert_eq!(alice.restrictions[1].start_day_of_week, 3);
    assert_eq!(alice.restrictions[1].duration_seconds, 3 * 3600 + 1800);

    let bob = &payload.schedule_layers[1];
    assert_eq!(bob.restrictions[0].start_day_of_week, 7);
    assert_eq!(bob.restrictions[0].duration_seconds, 12 * 3600);
}

#[test]
fn test_users_without_rows_get_default_window() {
    let users = vec![
        user("PALICE", "Alice", "alice@example.com"),
        user("PBOB", "Bob", "bob@example.com"),
    ];
    let shifts = vec![shift(2, "alice@example.com", "Monday", "09:00", "17:00")];

    let now = Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap();
    let payload = builder()
        .days(&["monday".to_string(), "friday".to_string()])
        .unwrap()
        .hours(9, 17)
        .unwrap()
        .users(users)
        .build(&shifts, now)
        .unwrap();

    let bob = &payload.schedule_layers[1];
    assert_eq!(bob.restrictions.len(), 2);
    assert_eq!(bob.restrictions[0].start_day_of_week, 1);
    assert_eq!(bob.restrictions[1].start_day_of_week, 5);
    assert_eq!(bob.restrictions[0].start_time_of_day, "09:00:00");
    assert_eq!(bob.restrictions[0].duration_seconds, 8 * 3600);
}

#[test]
fn test_unknown_attendee_is_fatal() {
    let users = vec![user("PALICE", "Alice", "alice@example.com")];
    let shifts = vec![shift(2, "nobody@example.com", "Monday", "09:00", "17:00")];

    let now = Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap();
    let err = builder().users(users).build(&shifts, now).unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.to_string().contains("nobody@example.com"));
}

#[test]
fn test_invalid_weekday_and_times_rejected() {
    let users = vec![user("PALICE", "Alice", "alice@example.com")];
    let now = Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap();

    for bad in [
        shift(2, "alice@example.com", "Funday", "09:00", "17:00"),
        shift(2, "alice@example.com", "Monday", "9am", "17:00"),
        shift(2, "alice@example.com", "Monday", "17:00", "09:00"),
    ] {
        let err = builder()
            .users(vec![user("PALICE", "Alice", "alice@example.com")])
            .build(std::slice::from_ref(&bad), now);
        assert!(err.is_err(), "shift should be rejected: {:?}", bad);
    }

    // sanity: the same user with a correct row builds fine
    let ok = builder()
        .users(users)
        .build(&[shift(2, "alice@example.com", "Monday", "09:00", "17:00")], now);
    assert!(ok.is_ok());
}

#[test]
fn test_day_and_hour_validation() {
    assert!(matches!(
        builder().days(&["Noday".to_string()]),
        Err(AppError::InvalidArgument(_))
    ));
    assert!(matches!(
        builder().hours(9, 9),
        Err(AppError::InvalidArgument(_))
    ));
    assert!(matches!(
        builder().hours(9, 24),
        Err(AppError::InvalidArgument(_))
    ));
    assert!(builder().days(&["Saturday".to_string()]).is_ok());
}

#[test]
fn test_exclude_users_drops_layers() {
    let users = vec![
        user("PALICE", "Alice", "alice@example.com"),
        user("PBOB", "Bob", "bob@example.com"),
    ];
    let shifts = vec![shift(2, "alice@example.com", "Monday", "09:00", "17:00")];

    let now = Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap();
    let payload = builder()
        .users(users)
        .exclude_users(&["PBOB".to_string()])
        .build(&shifts, now)
        .unwrap();

    assert_eq!(payload.schedule_layers.len(), 1);
    assert_eq!(payload.schedule_layers[0].users[0].user.id, "PALICE");
}

#[test]
fn test_schedule_dry_run_prints_payload() {
    let dir = TempDir::new().unwrap();
    let cfg = common::config_file_no_token(dir.path());
    let csv = weekly_csv(
        dir.path(),
        "weekly.csv",
        &["alice@example.com,Monday,09:00,17:00"],
    );

    pdr()
        .args([
            "--config",
            &cfg,
            "schedule",
            &csv,
            "--name",
            "Primary On-Call",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(contains("weekly_restriction"))
        .stdout(contains("Primary On-Call"))
        .stdout(contains("nothing submitted"));
}

#[test]
fn test_create_or_update_creates_when_absent() {
    let mut server = mockito::Server::new();
    let lookup = server
        .mock("GET", "/schedules")
        .match_query(mockito::Matcher::UrlEncoded(
            "query".into(),
            "Primary On-Call".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"schedules": [], "more": false}"#)
        .expect(1)
        .create();
    let create = server
        .mock("POST", "/schedules")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"schedule": {"id": "PSCHED9", "name": "Primary On-Call", "html_url": "https://example.pagerduty.com/schedules/PSCHED9"}}"#)
        .expect(1)
        .create();

    let client = PagerDutyClient::new("test-token", &server.url()).unwrap();
    let users = vec![user("PALICE", "Alice", "alice@example.com")];
    let shifts = vec![shift(2, "alice@example.com", "Monday", "09:00", "17:00")];
    let now = Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap();
    let payload = builder().users(users).build(&shifts, now).unwrap();

    let (schedule, updated) = client.create_or_update_schedule(payload).unwrap();

    assert!(!updated);
    assert_eq!(schedule.id, "PSCHED9");
    lookup.assert();
    create.assert();
}

#[test]
fn test_create_or_update_updates_when_present() {
    let mut server = mockito::Server::new();
    let _lookup = server
        .mock("GET", "/schedules")
        .match_query(mockito::Matcher::UrlEncoded(
            "query".into(),
            "Primary On-Call".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"schedules": [{"id": "PSCHED9", "name": "Primary On-Call"}], "more": false}"#)
        .expect(1)
        .create();
    let update = server
        .mock("PUT", "/schedules/PSCHED9")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"schedule": {"id": "PSCHED9", "name": "Primary On-Call"}}"#)
        .expect(1)
        .create();

    let client = PagerDutyClient::new("test-token", &server.url()).unwrap();
    let users = vec![user("PALICE", "Alice", "alice@example.com")];
    let shifts = vec![shift(2, "alice@example.com", "Monday", "09:00", "17:00")];
    let now = Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap();
    let payload = builder().users(users).build(&shifts, now).unwrap();

    let (schedule, updated) = client.create_or_update_schedule(payload).unwrap();

    assert!(updated);
    assert_eq!(schedule.id, "PSCHED9");
    update.assert();
}
