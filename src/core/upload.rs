//! The upload pipeline: validate, build, submit, aggregate.

use std::collections::HashMap;

use chrono_tz::Tz;

use crate::core::report::{Report, RowOutcome, RowReport};
use crate::core::validate;
use crate::errors::AppError;
use crate::models::ShiftRow;
use crate::pd::OverrideApi;
use crate::pd::types::OverrideRequest;

/// High-level business logic for the `upload` command.
pub struct UploadLogic;

impl UploadLogic {
    /// Process rows sequentially. `api` is `None` on a dry run, which makes
    /// "no remote call is ever issued" a structural property rather than a
    /// runtime check. Per-row errors are recorded and the run continues.
    pub fn run(
        rows: &[ShiftRow],
        tz: Tz,
        timestamp_format: &str,
        api: Option<&dyn OverrideApi>,
    ) -> Report {
        let mut report = Report::default();
        // email → user id, so repeated attendees cost one lookup
        let mut resolved: HashMap<String, String> = HashMap::new();

        for row in rows {
            let record = match validate::normalize(row, tz, timestamp_format) {
                Ok(r) => r,
                Err(e) => {
                    report.push(RowReport {
                        line: row.line,
                        attendee: row.attendee.trim().to_string(),
                        schedule: row.schedule.trim().to_string(),
                        outcome: RowOutcome::Invalid {
                            reason: reason_of(e),
                        },
                    });
                    continue;
                }
            };

            let request = OverrideRequest::from_record(&record);

            let outcome = match api {
                None => RowOutcome::WouldUpload,
                Some(api) => Self::submit(api, &request, &mut resolved),
            };

            report.push(RowReport {
                line: row.line,
                attendee: record.attendee,
                schedule: record.schedule,
                outcome,
            });
        }

        report
    }

    fn submit(
        api: &dyn OverrideApi,
        request: &OverrideRequest,
        resolved: &mut HashMap<String, String>,
    ) -> RowOutcome {
        let user_id = if request.attendee.contains('@') {
            match resolved.get(&request.attendee) {
                Some(id) => id.clone(),
                None => match api.resolve_user(&request.attendee) {
                    Ok(user) => {
                        resolved.insert(request.attendee.clone(), user.id.clone());
                        user.id
                    }
                    Err(e) => {
                        return RowOutcome::Failed {
                            reason: reason_of(e),
                        };
                    }
                },
            }
        } else {
            request.attendee.clone()
        };

        match api.create_override(request, &user_id) {
            Ok(created) => RowOutcome::Uploaded {
                override_id: created.id,
            },
            Err(e) => RowOutcome::Failed {
                reason: reason_of(e),
            },
        }
    }
}

fn reason_of(e: AppError) -> String {
    match e {
        AppError::Validation(msg) => msg,
        AppError::RemoteRequest {
            message,
            status: Some(code),
        } => format!("{} (HTTP {})", message, code),
        AppError::RemoteRequest {
            message,
            status: None,
        } => message,
        other => other.to_string(),
    }
}
