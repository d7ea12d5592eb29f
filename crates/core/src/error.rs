//! Coded error type shared by every studyhall crate
//!
//! Errors carry:
//! - A stable code for programmatic handling
//! - Optional context and a recovery suggestion
//! - The underlying source error, when there is one

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // General errors (1xxx)
    /// Unclassified failure
    Unknown = 1000,
    /// Bug or failed background task
    Internal = 1001,

    // IO errors (2xxx)
    /// Other filesystem failure
    IoError = 2000,
    /// A file that must exist does not
    FileNotFound = 2001,
    /// The OS refused access
    PermissionDenied = 2002,

    // Configuration errors (3xxx)
    /// Other configuration problem
    ConfigError = 3000,
    /// An explicitly named config file is missing
    ConfigNotFound = 3001,
    /// The config file is not valid TOML for the schema
    ConfigParseError = 3002,
    /// A config value is out of range
    InvalidConfigValue = 3003,

    // Catalog errors (4xxx)
    /// Other catalog problem
    CatalogError = 4000,
    /// Two catalog entries share an id
    DuplicateModuleId = 4001,
    /// No module has the requested id
    UnknownModule = 4002,
    /// A prerequisite names a module not in the catalog
    DanglingPrerequisite = 4003,
    /// A catalog file is not valid JSON for the schema
    CatalogParseError = 4004,

    // Storage errors (5xxx)
    /// Other preference storage problem
    StorageError = 5000,
    /// The preference file could not be read or parsed
    StorageReadError = 5001,
    /// The preference file could not be written
    StorageWriteError = 5002,
}

impl ErrorCode {
    /// Get the numeric code
    #[must_use]
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Configuration",
            4 => "Catalog",
            5 => "Storage",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {ctx}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {suggestion}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors

    /// Internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Generic configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Explicit config file does not exist
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a studyhall.toml file or drop --config to use the defaults")
    }

    /// Catalog declares `id` twice
    pub fn duplicate_module(id: &str) -> Self {
        Self::new(
            ErrorCode::DuplicateModuleId,
            format!("Module id '{id}' is declared more than once"),
        )
        .with_suggestion("Give every catalog entry a unique id")
    }

    /// No module with `id`
    pub fn unknown_module(id: &str) -> Self {
        Self::new(ErrorCode::UnknownModule, format!("No module with id '{id}'"))
            .with_suggestion("Run `studyhall list` to see the available module ids")
    }

    /// `module` lists a prerequisite missing from the catalog
    pub fn dangling_prerequisite(module: &str, missing: &str) -> Self {
        Self::new(
            ErrorCode::DanglingPrerequisite,
            format!("Module '{module}' requires '{missing}', which is not in the catalog"),
        )
    }

    /// Preference file could not be loaded
    pub fn storage_read(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageReadError, message)
    }

    /// Preference file could not be saved
    pub fn storage_write(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageWriteError, message)
            .with_suggestion("Check that the preference file's directory is writable")
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
pub mod exit_codes {
    /// Command finished
    pub const SUCCESS: i32 = 0;
    /// Any failure without a more specific code
    pub const FAILURE: i32 = 1;
    /// Unknown module id. Kept clear of 2, which clap uses for usage errors.
    pub const NOT_FOUND: i32 = 6;
    /// Configuration could not be loaded
    pub const CONFIG_ERROR: i32 = 3;
    /// Catalog could not be loaded or failed validation
    pub const CATALOG_ERROR: i32 = 4;
    /// Preferences could not be read or written
    pub const STORAGE_ERROR: i32 = 5;

    /// Map an error code onto a process exit code
    #[must_use]
    pub fn for_code(code: super::ErrorCode) -> i32 {
        use super::ErrorCode;
        match code {
            ErrorCode::UnknownModule => NOT_FOUND,
            c if c.category() == "Configuration" => CONFIG_ERROR,
            c if c.category() == "Catalog" => CATALOG_ERROR,
            c if c.category() == "Storage" => STORAGE_ERROR,
            _ => FAILURE,
        }
    }
}

// Implement From for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::CatalogParseError, format!("JSON parse error: {err}"))
            .with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {err}"))
            .with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Attach context to the error, if any
    fn context(self, context: impl Into<String>) -> Result<T>;
    /// Attach a recovery suggestion to the error, if any
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}
