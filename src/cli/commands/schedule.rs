use std::path::Path;

use chrono::Utc;

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::parse;
use crate::core::schedule::ScheduleBuilder;
use crate::errors::AppResult;
use crate::models::{PdUser, WeeklyShift};
use crate::pd::PagerDutyClient;
use crate::ui::messages;

/// Generate a weekly schedule from a CSV file and create or update it on
/// PagerDuty.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Schedule {
        file,
        name,
        description,
        days,
        start_hour,
        end_hour,
        exclude,
        dry_run,
    } = cmd
    else {
        return Ok(());
    };

    let shifts = parse::read_weekly_shifts(Path::new(file))?;
    messages::info(format!("{} shift row(s) read from {}", shifts.len(), file));

    let mut builder = ScheduleBuilder::new(name, &cfg.timezone)
        .days(days)?
        .hours(*start_hour, *end_hour)?;
    if let Some(d) = description {
        builder = builder.description(d);
    }

    if *dry_run {
        // No user fetch on a dry run: attendees stand in for themselves.
        let payload = builder
            .users(placeholder_users(&shifts))
            .build(&shifts, Utc::now())?;
        println!("{}", serde_json::to_string_pretty(&payload).unwrap_or_default());
        messages::dry_run("schedule payload built; nothing submitted");
        return Ok(());
    }

    let client = PagerDutyClient::new(cfg.require_token()?, &cfg.api_url)?;
    let users = client.list_users(None)?;
    let payload = builder
        .users(users)
        .exclude_users(exclude)
        .build(&shifts, Utc::now())?;

    let (schedule, updated) = client.create_or_update_schedule(payload)?;

    let action = if updated { "updated" } else { "created" };
    let mut line = format!("Schedule {}: id {}, name '{}'", action, schedule.id, schedule.name);
    if let Some(url) = &schedule.html_url {
        line.push_str(&format!(", see {}", url));
    }
    messages::success(line);

    Ok(())
}

/// One placeholder user per distinct attendee, in order of appearance.
fn placeholder_users(shifts: &[WeeklyShift]) -> Vec<PdUser> {
    let mut users: Vec<PdUser> = Vec::new();
    for shift in shifts {
        let email = shift.attendee.trim();
        if !users.iter().any(|u| u.matches_email(email)) {
            users.push(PdUser {
                id: email.to_string(),
                name: email.to_string(),
                email: email.to_string(),
            });
        }
    }
    users
}
