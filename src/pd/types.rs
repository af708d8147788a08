//! Wire types for the PagerDuty REST API (v2).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ShiftRecord;

/// One schedule override ready for submission: the wire shape of a shift.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideRequest {
    pub schedule: String,
    pub attendee: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl OverrideRequest {
    /// Pure mapping from a validated shift; the start<end invariant is
    /// already established upstream.
    pub fn from_record(record: &ShiftRecord) -> Self {
        Self {
            schedule: record.schedule.clone(),
            attendee: record.attendee.clone(),
            start: record.start,
            end: record.end,
        }
    }

    /// JSON body, with the attendee resolved to a concrete user id.
    pub fn payload(&self, user_id: &str) -> OverridePayload {
        OverridePayload {
            start: rfc3339(self.start),
            end: rfc3339(self.end),
            user: UserReference::new(user_id),
        }
    }
}

fn rfc3339(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserReference {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl UserReference {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: "user_reference".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OverridePayload {
    pub start: String,
    pub end: String,
    pub user: UserReference,
}

/// Request body for POST /schedules/{id}/overrides.
#[derive(Debug, Serialize)]
pub struct CreateOverridesBody {
    pub overrides: Vec<OverridePayload>,
}

/// The override object PagerDuty hands back.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideObject {
    pub id: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Per-override entry of the modern bulk response.
#[derive(Debug, Deserialize)]
pub struct OverrideEntry {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(rename = "override", default)]
    pub override_obj: Option<OverrideObject>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// The overrides endpoint has answered with several shapes across API
/// revisions; accept all of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreateOverridesResponse {
    Entries(Vec<OverrideEntry>),
    Wrapped { overrides: Vec<OverrideEntry> },
    Single {
        #[serde(rename = "override")]
        override_obj: OverrideObject,
    },
}

/// A successfully created override.
#[derive(Debug, Clone)]
pub struct CreatedOverride {
    pub id: String,
    pub html_url: Option<String>,
}

// ---------------------------
// Schedules
// ---------------------------

#[derive(Debug, Serialize)]
pub struct SchedulePayload {
    pub name: String,
    pub time_zone: String,
    pub description: String,
    pub schedule_layers: Vec<ScheduleLayer>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleLayer {
    pub name: String,
    pub start: String,
    pub end: String,
    pub rotation_virtual_start: String,
    pub rotation_turn_length_seconds: u32,
    pub users: Vec<LayerUser>,
    pub restrictions: Vec<Restriction>,
}

#[derive(Debug, Serialize)]
pub struct LayerUser {
    pub user: UserReference,
}

#[derive(Debug, Serialize)]
pub struct Restriction {
    #[serde(rename = "type")]
    pub kind: String,
    pub start_day_of_week: u8,
    pub start_time_of_day: String,
    pub duration_seconds: u32,
}

#[derive(Debug, Serialize)]
pub struct CreateScheduleBody {
    pub schedule: SchedulePayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleResponse {
    pub schedule: ScheduleRef,
}

#[derive(Debug, Deserialize)]
pub struct SchedulesPage {
    #[serde(default)]
    pub schedules: Vec<ScheduleRef>,
    #[serde(default)]
    pub more: bool,
}

// ---------------------------
// Users
// ---------------------------

#[derive(Debug, Deserialize)]
pub struct UsersPage {
    #[serde(default)]
    pub users: Vec<crate::models::PdUser>,
    #[serde(default)]
    pub more: bool,
}
