//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// `[preferences]` section
    #[serde(default)]
    pub preferences: PreferencesConfig,

    /// `[catalog]` section
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// `[logging]` section
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Preference store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// Preference file location
    #[serde(default = "default_preferences_path")]
    pub path: PathBuf,

    /// Maximum number of remembered search terms
    #[serde(default = "default_max_recent")]
    pub max_recent_searches: usize,

    /// Maximum number of remembered opened modules
    #[serde(default = "default_max_recent")]
    pub max_recent_modules: usize,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: default_preferences_path(),
            max_recent_searches: default_max_recent(),
            max_recent_modules: default_max_recent(),
        }
    }
}

fn default_preferences_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from(".local/share"))
        .join("studyhall")
        .join("preferences.json")
}

fn default_max_recent() -> usize {
    10
}

/// Catalog source configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// JSON catalog replacing the built-in one
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Fail at load time when a prerequisite id does not resolve
    #[serde(default)]
    pub validate_prerequisites: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
