//! Study module descriptors and difficulty levels.

use crate::category::Category;
use serde::{Deserialize, Serialize};

/// One teachable unit in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Unique key across the catalog
    pub id: String,
    /// Display name
    pub name: String,
    /// One-line summary
    pub description: String,
    /// Problem/solution write-up shown on the detail card
    #[serde(default)]
    pub long_description: String,
    /// Difficulty level
    pub level: u8,
    pub category: Category,
    /// Ids of modules worth studying first
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Route the presentation layer opens; never interpreted here
    pub launch_target: String,
}

impl ModuleDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        level: u8,
        category: Category,
    ) -> Self {
        let id = id.into();
        Self {
            launch_target: format!("study/{id}"),
            id,
            name: name.into(),
            description: String::new(),
            long_description: String::new(),
            level,
            category,
            prerequisites: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_long_description(mut self, long_description: impl Into<String>) -> Self {
        self.long_description = long_description.into();
        self
    }

    #[must_use]
    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_launch_target(mut self, target: impl Into<String>) -> Self {
        self.launch_target = target.into();
        self
    }
}

/// A difficulty grouping, derived from the catalog rather than stored.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Level {
    pub number: u8,
    pub label: String,
}

impl Level {
    #[must_use]
    pub fn new(number: u8) -> Self {
        Self {
            number,
            label: level_label(number),
        }
    }
}

/// Human label for a level number.
#[must_use]
pub fn level_label(number: u8) -> String {
    let name = match number {
        1 => "Fundamentals",
        2 => "Layout",
        3 => "State",
        4 => "Components",
        5 => "Lists",
        6 => "Theming",
        7 => "Side Effects",
        8 => "Animation",
        9 => "Navigation",
        10 => "Testing & Performance",
        _ => return format!("Level {number}"),
    };
    format!("Level {number}: {name}")
}
