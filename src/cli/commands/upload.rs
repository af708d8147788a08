use std::path::Path;

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::parse;
use crate::core::upload::UploadLogic;
use crate::errors::AppResult;
use crate::pd::PagerDutyClient;
use crate::ui::messages;
use crate::utils::time::parse_timezone;

/// Upload shift overrides from a CSV file. Returns the process exit code.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<i32> {
    let Commands::Upload { file, dry_run } = cmd else {
        return Ok(0);
    };

    let tz = parse_timezone(&cfg.timezone)?;
    let rows = parse::read_shift_rows(Path::new(file), &cfg.columns)?;

    messages::info(format!("{} row(s) read from {}", rows.len(), file));

    let report = if *dry_run {
        UploadLogic::run(&rows, tz, &cfg.timestamp_format, None)
    } else {
        let client = PagerDutyClient::new(cfg.require_token()?, &cfg.api_url)?;
        UploadLogic::run(&rows, tz, &cfg.timestamp_format, Some(&client))
    };

    report.print(*dry_run);
    Ok(report.exit_code())
}
