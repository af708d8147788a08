use std::process::Command;

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;

/// Show or edit the configuration file.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    if *print_config {
        println!("📄 Current configuration:");
        println!(
            "{}",
            serde_yaml::to_string(cfg).map_err(|_| AppError::ConfigLoad)?
        );
    }

    if *edit_config {
        let path = Config::config_file();

        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

        let status = Command::new(&editor_to_use).arg(&path).status();
        match status {
            Ok(s) if s.success() => {
                messages::success(format!(
                    "Configuration file edited successfully with '{}'",
                    editor_to_use
                ));
            }
            Ok(_) | Err(_) => {
                messages::warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    editor_to_use, default_editor
                ));
                let fallback = Command::new(&default_editor).arg(&path).status()?;
                if !fallback.success() {
                    return Err(AppError::Config(format!(
                        "could not open an editor for {}",
                        path.display()
                    )));
                }
            }
        }
    }

    Ok(())
}
