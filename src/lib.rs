//! pdrota library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod pd;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher. Returns the process exit code.
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<i32> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli).map(|_| 0),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg).map(|_| 0),
        Commands::Upload { .. } => cli::commands::upload::handle(&cli.command, cfg),
        Commands::Schedule { .. } => cli::commands::schedule::handle(&cli.command, cfg).map(|_| 0),
        Commands::Users { .. } => cli::commands::users::handle(&cli.command, cfg).map(|_| 0),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<i32> {
    let cli = Cli::parse();

    // load config once: file, then environment overrides
    let mut cfg = Config::load(cli.config.as_deref())?;

    // command-line flags win over file and environment
    if let Some(token) = &cli.token {
        cfg.api_token = token.clone();
    }
    if let Some(tz) = &cli.timezone {
        cfg.timezone = tz.clone();
    }

    dispatch(&cli, &cfg)
}
