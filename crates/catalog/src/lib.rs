//! Study module catalog for studyhall.
//!
//! This crate provides:
//! - Module descriptors, categories and derived levels
//! - The built-in catalog and JSON-loaded catalogs
//! - A read-only repository with filtering, keyword search and aggregates
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use studyhall_catalog::{Catalog, ModuleRepository};
//!
//! let repo = ModuleRepository::new(Arc::new(Catalog::builtin().unwrap()));
//! let effects = repo.by_level(7);
//! assert!(effects.iter().any(|m| m.id == "launched_effect"));
//! ```

#![warn(clippy::all)]

mod builtin;
mod catalog;
mod category;
mod module;
mod repository;
mod search;

pub use catalog::Catalog;
pub use category::{category_label, parse_category, Category};
pub use module::{level_label, Level, ModuleDescriptor};
pub use repository::ModuleRepository;
pub use search::{matches_query, module_keywords};
