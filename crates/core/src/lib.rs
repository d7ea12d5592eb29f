//! Core types for studyhall
//!
//! This crate provides shared functionality used by the catalog, preference
//! store, launcher and CLI crates:
//!
//! - **Error handling**: coded errors with context and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use studyhall_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("preferences live at {}", config.schema.preferences.path.display());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{exit_codes, Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{CatalogConfig, Config, ConfigSchema, LoggingConfig, PreferencesConfig};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}
