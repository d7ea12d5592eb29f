//! Module categories and their display labels.

use serde::{Deserialize, Serialize};

/// Topic a study module belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Fundamentals,
    Layout,
    State,
    Components,
    Lists,
    Theming,
    Effects,
    Animation,
    Navigation,
    Gestures,
    Architecture,
    Testing,
    Performance,
}

impl Category {
    /// Every category in declaration order.
    pub const ALL: [Category; 13] = [
        Category::Fundamentals,
        Category::Layout,
        Category::State,
        Category::Components,
        Category::Lists,
        Category::Theming,
        Category::Effects,
        Category::Animation,
        Category::Navigation,
        Category::Gestures,
        Category::Architecture,
        Category::Testing,
        Category::Performance,
    ];
}

/// Display label for a category.
#[must_use]
pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::Fundamentals => "Fundamentals",
        Category::Layout => "Layout",
        Category::State => "State Management",
        Category::Components => "Components",
        Category::Lists => "Lists & Grids",
        Category::Theming => "Theming",
        Category::Effects => "Side Effects",
        Category::Animation => "Animation",
        Category::Navigation => "Navigation",
        Category::Gestures => "Gestures",
        Category::Architecture => "Architecture",
        Category::Testing => "Testing",
        Category::Performance => "Performance",
    }
}

/// Parse a category from user input.
///
/// Matches the variant name or the display label, ignoring case and
/// treating `-`, `_` and spaces alike.
#[must_use]
pub fn parse_category(input: &str) -> Option<Category> {
    let wanted = normalize(input);
    if wanted.is_empty() {
        return None;
    }
    Category::ALL.into_iter().find(|&category| {
        normalize(&format!("{category:?}")) == wanted || normalize(category_label(category)) == wanted
    })
}

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' ' | '&'))
        .flat_map(char::to_lowercase)
        .collect()
}
