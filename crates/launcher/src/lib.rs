//! Launcher view-state controller for studyhall.
//!
//! Combines the module catalog with stored preferences into one observable
//! [`LauncherState`] and exposes intent handlers for the presentation layer.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use studyhall_catalog::{Catalog, ModuleRepository};
//! use studyhall_launcher::LauncherController;
//! use studyhall_prefs::PreferenceStore;
//!
//! # async fn demo() -> studyhall_core::Result<()> {
//! let repository = Arc::new(ModuleRepository::new(Arc::new(Catalog::builtin()?)));
//! let controller = LauncherController::new(repository, PreferenceStore::in_memory()).await;
//!
//! controller.update_query("effect");
//! controller.submit_search();
//! if let Some(module) = controller.launch_module("launched_effect") {
//!     println!("open {}", module.launch_target);
//! }
//! controller.flush().await;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

mod controller;
mod state;
mod writer;

pub use controller::LauncherController;
pub use state::{LauncherState, LevelSection};
