use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::pd::PagerDutyClient;
use crate::ui::messages;
use crate::utils::table::Table;

/// List PagerDuty users.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Users { query } = cmd else {
        return Ok(());
    };

    let client = PagerDutyClient::new(cfg.require_token()?, &cfg.api_url)?;
    let users = client.list_users(query.as_deref())?;

    if users.is_empty() {
        messages::warning("no users found");
        return Ok(());
    }

    let mut table = Table::new(&["ID", "NAME", "EMAIL"]);
    for user in &users {
        table.add_row(vec![
            user.id.clone(),
            user.name.clone(),
            user.email.clone(),
        ]);
    }
    print!("{}", table.render());

    messages::info(format!("{} user(s)", users.len()));
    Ok(())
}
