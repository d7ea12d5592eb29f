//! Configuration loading and schema definitions
//!
//! Shared by the CLI and any embedding front end.

mod loader;
mod schema;

pub use loader::{Config, CONFIG_ENV_VAR};
pub use schema::*;
