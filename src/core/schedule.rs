//! Weekly schedule generation: one layer per user, restrictions from the
//! weekly-shift CSV, a default availability window for everyone else.

use chrono::{DateTime, Duration, Utc};

use crate::errors::{AppError, AppResult};
use crate::models::{PdUser, WeeklyShift};
use crate::pd::types::{LayerUser, Restriction, ScheduleLayer, SchedulePayload, UserReference};
use crate::utils::time::{minutes_between, parse_hhmm, weekday_number};

const ROTATION_TURN_SECONDS: u32 = 3600; // one hour
const LAYER_SPAN_WEEKS: i64 = 1;
const WEEKLY_RESTRICTION: &str = "weekly_restriction";

pub const VALID_DAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

#[derive(Debug)]
pub struct ScheduleBuilder {
    name: String,
    description: String,
    timezone: String,
    days: Vec<String>,
    start_hour: u8,
    end_hour: u8,
    users: Vec<PdUser>,
}

impl ScheduleBuilder {
    pub fn new(name: &str, timezone: &str) -> Self {
        Self {
            name: name.to_string(),
            description: "Schedule generated automatically by pdrota.".to_string(),
            timezone: timezone.to_string(),
            days: Vec::new(),
            start_hour: 0,
            end_hour: 23,
            users: Vec::new(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Days of week for the default availability window; names must be
    /// valid weekdays.
    pub fn days(mut self, days: &[String]) -> AppResult<Self> {
        let lower: Vec<String> = days.iter().map(|d| d.trim().to_lowercase()).collect();

        let invalid: Vec<&str> = lower
            .iter()
            .filter(|d| !VALID_DAYS.contains(&d.as_str()))
            .map(String::as_str)
            .collect();
        if !invalid.is_empty() {
            return Err(AppError::InvalidArgument(format!(
                "invalid day(s): {}",
                invalid.join(", ")
            )));
        }

        self.days = lower;
        Ok(self)
    }

    pub fn hours(mut self, start_hour: u8, end_hour: u8) -> AppResult<Self> {
        if start_hour > 23 || end_hour > 23 {
            return Err(AppError::InvalidArgument(
                "hours must be between 0 and 23 (inclusive)".to_string(),
            ));
        }
        if start_hour >= end_hour {
            return Err(AppError::InvalidArgument(
                "start hour must be less than end hour".to_string(),
            ));
        }

        self.start_hour = start_hour;
        self.end_hour = end_hour;
        Ok(self)
    }

    pub fn users(mut self, users: Vec<PdUser>) -> Self {
        self.users = users;
        self
    }

    pub fn exclude_users(mut self, excluded: &[String]) -> Self {
        self.users.retain(|u| !excluded.contains(&u.id));
        self
    }

    /// Assemble the schedule payload. Every CSV row must name a selected
    /// user; the schedule is one artifact, so a bad row is fatal here.
    pub fn build(&self, shifts: &[WeeklyShift], now: DateTime<Utc>) -> AppResult<SchedulePayload> {
        if self.users.is_empty() {
            return Err(AppError::InvalidArgument(
                "no users selected for the schedule".to_string(),
            ));
        }

        let start = stamp(now);
        let end = stamp(now + Duration::weeks(LAYER_SPAN_WEEKS));

        let mut layers: Vec<ScheduleLayer> = self
            .users
            .iter()
            .map(|user| ScheduleLayer {
                name: format!("Layer for {}", user.name),
                start: start.clone(),
                end: end.clone(),
                rotation_virtual_start: start.clone(),
                rotation_turn_length_seconds: ROTATION_TURN_SECONDS,
                users: vec![LayerUser {
                    user: UserReference::new(&user.id),
                }],
                restrictions: Vec::new(),
            })
            .collect();

        for shift in shifts {
            let idx = self
                .users
                .iter()
                .position(|u| u.matches_email(&shift.attendee))
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "line {}: no selected user with email '{}'",
                        shift.line, shift.attendee
                    ))
                })?;

            layers[idx].restrictions.push(restriction_from(shift)?);
        }

        // Users without explicit rows fall back to the configured window.
        for (user, layer) in self.users.iter().zip(layers.iter_mut()) {
            if layer.restrictions.is_empty() {
                layer.restrictions = self.default_restrictions(user)?;
            }
        }

        Ok(SchedulePayload {
            name: self.name.clone(),
            time_zone: self.timezone.clone(),
            description: self.description.clone(),
            schedule_layers: layers,
        })
    }

    fn default_restrictions(&self, user: &PdUser) -> AppResult<Vec<Restriction>> {
        if self.days.is_empty() {
            return Err(AppError::Validation(format!(
                "user '{}' has no shift rows and no default days are configured",
                user.name
            )));
        }

        let duration = u32::from(self.end_hour - self.start_hour) * 3600;
        Ok(self
            .days
            .iter()
            .map(|day| Restriction {
                kind: WEEKLY_RESTRICTION.to_string(),
                // days were validated, the lookup cannot miss
                start_day_of_week: weekday_number(day).unwrap_or(1),
                start_time_of_day: format!("{:02}:00:00", self.start_hour),
                duration_seconds: duration,
            })
            .collect())
    }
}

fn restriction_from(shift: &WeeklyShift) -> AppResult<Restriction> {
    let day = weekday_number(&shift.weekday).ok_or_else(|| {
        AppError::Validation(format!(
            "line {}: invalid weekday '{}'",
            shift.line, shift.weekday
        ))
    })?;

    let start = parse_hhmm(&shift.start).ok_or_else(|| {
        AppError::Validation(format!(
            "line {}: invalid start time '{}'",
            shift.line, shift.start
        ))
    })?;
    let end = parse_hhmm(&shift.end).ok_or_else(|| {
        AppError::Validation(format!(
            "line {}: invalid end time '{}'",
            shift.line, shift.end
        ))
    })?;

    let minutes = minutes_between(start, end);
    if minutes <= 0 {
        return Err(AppError::Validation(format!(
            "line {}: shift end '{}' is not after start '{}'",
            shift.line, shift.end, shift.start
        )));
    }

    Ok(Restriction {
        kind: WEEKLY_RESTRICTION.to_string(),
        start_day_of_week: day,
        start_time_of_day: format!("{}:00", shift.start.trim()),
        duration_seconds: (minutes as u32) * 60,
    })
}

fn stamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
