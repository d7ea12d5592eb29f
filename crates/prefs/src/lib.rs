//! Durable, observable preferences for the studyhall launcher.
//!
//! This crate provides:
//! - The persisted [`Preferences`] record and its `|`-delimited key layout
//! - Capped move-to-front recent lists
//! - File and in-memory storage backends
//! - [`PreferenceStore`], whose reads are live subscriptions and whose
//!   writes are serialised read-modify-write cycles
//!
//! # Example
//!
//! ```rust,no_run
//! use studyhall_prefs::{PreferenceStore, StoreLimits};
//!
//! # async fn demo() -> studyhall_core::Result<()> {
//! let store = PreferenceStore::open("preferences.json", StoreLimits::default());
//! let mut searches = store.recent_searches().await;
//! store.add_recent_search("state").await?;
//! while let Some(terms) = searches.next().await {
//!     println!("{terms:?}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

mod backend;
pub mod codec;
mod recent;
mod record;
mod store;

pub use backend::{FileBackend, MemoryBackend, PreferenceBackend};
pub use recent::{push_recent, remove_recent};
pub use record::{
    Preferences, StoreLimits, DEFAULT_MAX_RECENT, KEY_COMPLETED_MODULES, KEY_EXPANDED_LEVELS,
    KEY_RECENT_MODULES, KEY_RECENT_SEARCHES,
};
pub use store::{PreferenceStore, PreferenceStream};
