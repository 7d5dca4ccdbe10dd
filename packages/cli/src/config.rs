use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

use csms_drive::DriveConfig;
use csms_notify::NotifyConfig;
use csms_reminders::ReminderConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
}

/// Server configuration, assembled once at startup
///
/// All credentials and identifiers are read here and passed into
/// constructors; nothing else in the system touches the environment.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    pub data_dir: PathBuf,
    pub reminders: ReminderConfig,
    pub notify: NotifyConfig,
    pub drive: DriveConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str = env::var("PORT").unwrap_or_else(|_| "8000".to_string());

        let port = port_str.parse::<u16>()?;

        // Validate port is in valid range
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let data_dir = env::var("CSMS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| csms_core::default_data_dir());

        Ok(Config {
            port,
            cors_origin,
            data_dir,
            reminders: ReminderConfig::from_env(),
            notify: NotifyConfig::from_env(),
            drive: DriveConfig::from_env(),
        })
    }
}
