//! Application configuration
//!
//! Persisted with confy as YAML under the `simple-timer` app name. The
//! `defaults` section seeds every timer the CLI creates.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timer::TimerSettings;

const APP_NAME: &str = "simple-timer";
const CONFIG_NAME: &str = "config";

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[source] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),

    #[error("failed to resolve configuration path")]
    Path(#[source] confy::ConfyError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Settings every new timer starts from
    #[serde(default)]
    pub defaults: TimerSettings,

    /// Debug-level logging for this crate (also enabled by `DEBUG_LOGGING`)
    #[serde(default)]
    pub debug_logging: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        confy::load(APP_NAME, CONFIG_NAME).map_err(ConfigError::Load)
    }

    /// Load the stored config, falling back to defaults when it is missing
    /// or unreadable.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            eprintln!("Warning: {err}, using default configuration");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Path)
    }
}
