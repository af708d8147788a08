#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::fs;
use std::path::Path;

/// Binary under test, with ambient configuration stripped so runs are
/// reproducible on any machine.
pub fn pdr() -> Command {
    let mut cmd = cargo_bin_cmd!("pdrota");
    cmd.env_remove("PAGERDUTY_TOKEN");
    cmd.env_remove("PDROTA_TIMEZONE");
    cmd.env_remove("PDROTA_API_URL");
    cmd
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path.to_string_lossy().to_string()
}

/// Upload CSV with the default header and the given data lines.
pub fn upload_csv(dir: &Path, name: &str, rows: &[&str]) -> String {
    let mut content = String::from("attendee,start,end,schedule\n");
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    write_file(dir, name, &content)
}

/// Weekly-shift CSV for the schedule command.
pub fn weekly_csv(dir: &Path, name: &str, rows: &[&str]) -> String {
    let mut content = String::from("attendee,weekday,start,end\n");
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    write_file(dir, name, &content)
}

/// Config file pointing the client at a local mock server.
pub fn config_file(dir: &Path, api_url: &str) -> String {
    let yaml = format!(
        "api_url: \"{}\"\napi_token: \"test-token\"\ntimezone: \"UTC\"\n",
        api_url
    );
    write_file(dir, "pdrota.conf", &yaml)
}

/// Config file with no token, for dry-run and fatal-error tests.
pub fn config_file_no_token(dir: &Path) -> String {
    write_file(dir, "pdrota.conf", "timezone: \"UTC\"\n")
}
