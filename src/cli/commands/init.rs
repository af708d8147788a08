use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages;

/// Write the default configuration file.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let file = Config::init_all(cli.config.as_deref())?;
    messages::success(format!("Config file: {}", file.display()));
    messages::info("set `api_token` (or PAGERDUTY_TOKEN) before uploading");
    Ok(())
}
