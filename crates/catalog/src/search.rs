//! Keyword matching for module search.

use crate::category::category_label;
use crate::module::ModuleDescriptor;

/// Lower-cased keywords a query is matched against.
///
/// The long description is checked separately by [`matches_query`].
#[must_use]
pub fn module_keywords(module: &ModuleDescriptor) -> Vec<String> {
    vec![
        module.id.to_lowercase(),
        module.name.to_lowercase(),
        module.description.to_lowercase(),
        category_label(module.category).to_lowercase(),
    ]
}

/// Case-insensitive substring match against keywords or long description.
///
/// The query is matched as given; only the empty query matches every module.
#[must_use]
pub fn matches_query(module: &ModuleDescriptor, query: &str) -> bool {
    let query = query.to_lowercase();
    if query.is_empty() {
        return true;
    }

    module_keywords(module)
        .iter()
        .any(|keyword| keyword.contains(&query))
        || module.long_description.to_lowercase().contains(&query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    fn launched_effect() -> ModuleDescriptor {
        ModuleDescriptor::new("launched_effect", "LaunchedEffect", 7, Category::Effects)
            .with_description("Run suspend work")
            .with_long_description("Restarts when the keys change")
    }

    #[test]
    fn test_keywords() {
        let keywords = module_keywords(&launched_effect());
        assert_eq!(
            keywords,
            vec!["launched_effect", "launchedeffect", "run suspend work", "side effects"]
        );
    }

    #[test]
    fn test_matches_each_source() {
        let module = launched_effect();
        assert!(matches_query(&module, "LAUNCHED"));
        assert!(matches_query(&module, "suspend"));
        assert!(matches_query(&module, "side eff"));
        assert!(matches_query(&module, "keys change"));
        assert!(!matches_query(&module, "animation"));
    }

    #[test]
    fn test_empty_query_matches() {
        assert!(matches_query(&launched_effect(), ""));
    }

    #[test]
    fn test_surrounding_spaces_are_part_of_query() {
        let module = ModuleDescriptor::new("button", "Button", 4, Category::Components)
            .with_description("Clickable actions")
            .with_long_description("Filled and outlined variants");
        assert!(matches_query(&module, "butt"));
        assert!(!matches_query(&module, " butt"));
        assert!(!matches_query(&module, "   "));
        assert!(matches_query(&module, "and outlined "));
    }
}
