use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "https://api.pagerduty.com";

/// Environment variables honored between the config file and CLI flags.
pub const ENV_TOKEN: &str = "PAGERDUTY_TOKEN";
pub const ENV_TIMEZONE: &str = "PDROTA_TIMEZONE";
pub const ENV_API_URL: &str = "PDROTA_API_URL";

/// Header names of the upload CSV. The defaults match the documented
/// `attendee,start,end,schedule` layout but remain configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Columns {
    #[serde(default = "default_col_attendee")]
    pub attendee: String,
    #[serde(default = "default_col_start")]
    pub start: String,
    #[serde(default = "default_col_end")]
    pub end: String,
    #[serde(default = "default_col_schedule")]
    pub schedule: String,
}

fn default_col_attendee() -> String {
    "attendee".to_string()
}
fn default_col_start() -> String {
    "start".to_string()
}
fn default_col_end() -> String {
    "end".to_string()
}
fn default_col_schedule() -> String {
    "schedule".to_string()
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            attendee: default_col_attendee(),
            start: default_col_start(),
            end: default_col_end(),
            schedule: default_col_schedule(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default)]
    pub columns: Columns,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_timezone() -> String {
    "UTC".to_string()
}
fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_token: String::new(),
            timezone: default_timezone(),
            timestamp_format: default_timestamp_format(),
            columns: Columns::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pdrota")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("pdrota.conf")
    }

    /// Load configuration from `path` (or the default location), then apply
    /// environment overrides. Missing file means defaults.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let file = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::config_file);

        let mut cfg = if file.exists() {
            let content = fs::read_to_string(&file).map_err(|_| AppError::ConfigLoad)?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("{}: {}", file.display(), e)))?
        } else {
            Config::default()
        };

        cfg.apply_env();
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Ok(token) = env::var(ENV_TOKEN) {
            self.api_token = token;
        }
        if let Ok(tz) = env::var(ENV_TIMEZONE) {
            self.timezone = tz;
        }
        if let Ok(url) = env::var(ENV_API_URL) {
            self.api_url = url;
        }
    }

    /// Write the default configuration file (the `init` command).
    pub fn init_all(path: Option<&str>) -> AppResult<PathBuf> {
        let file = match path {
            Some(p) => PathBuf::from(p),
            None => {
                fs::create_dir_all(Self::config_dir())?;
                Self::config_file()
            }
        };

        let yaml = serde_yaml::to_string(&Config::default()).map_err(|_| AppError::ConfigSave)?;
        let mut f = fs::File::create(&file).map_err(|_| AppError::ConfigSave)?;
        f.write_all(yaml.as_bytes()).map_err(|_| AppError::ConfigSave)?;

        Ok(file)
    }

    /// Token must be present for any command that talks to PagerDuty.
    pub fn require_token(&self) -> AppResult<&str> {
        let token = self.api_token.trim();
        if token.is_empty() {
            return Err(AppError::Config(format!(
                "no API token configured (set `api_token`, {} or --token)",
                ENV_TOKEN
            )));
        }
        Ok(token)
    }
}
