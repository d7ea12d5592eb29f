//! Query facade over the catalog.

use crate::catalog::Catalog;
use crate::category::Category;
use crate::module::{Level, ModuleDescriptor};
use crate::search::matches_query;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Read-only queries over a shared [`Catalog`].
///
/// Every result keeps catalog declaration order. Aggregates are recomputed
/// on each call.
#[derive(Debug, Clone)]
pub struct ModuleRepository {
    catalog: Arc<Catalog>,
}

impl ModuleRepository {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn all(&self) -> Vec<ModuleDescriptor> {
        self.catalog.modules().to_vec()
    }

    #[must_use]
    pub fn by_level(&self, level: u8) -> Vec<ModuleDescriptor> {
        self.filtered(|m| m.level == level)
    }

    #[must_use]
    pub fn by_category(&self, category: Category) -> Vec<ModuleDescriptor> {
        self.filtered(|m| m.category == category)
    }

    /// Modules whose keywords or long description contain `query`.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<ModuleDescriptor> {
        self.filtered(|m| matches_query(m, query))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<ModuleDescriptor> {
        self.catalog.get(id).cloned()
    }

    /// Resolve prerequisite ids, silently dropping ones not in the catalog.
    #[must_use]
    pub fn prerequisites(&self, module: &ModuleDescriptor) -> Vec<ModuleDescriptor> {
        module
            .prerequisites
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.catalog.len()
    }

    #[must_use]
    pub fn count_by_level(&self) -> BTreeMap<u8, usize> {
        let mut counts = BTreeMap::new();
        for module in self.catalog.modules() {
            *counts.entry(module.level).or_insert(0) += 1;
        }
        counts
    }

    #[must_use]
    pub fn count_by_category(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for module in self.catalog.modules() {
            *counts.entry(module.category).or_insert(0) += 1;
        }
        counts
    }

    /// Distinct levels present in the catalog, ascending.
    #[must_use]
    pub fn levels(&self) -> Vec<Level> {
        self.count_by_level().into_keys().map(Level::new).collect()
    }

    /// Modules grouped by level, ascending.
    #[must_use]
    pub fn modules_by_level(&self) -> Vec<(Level, Vec<ModuleDescriptor>)> {
        self.modules_by_level_matching("")
    }

    /// Modules matching `query` grouped by level; levels without matches are left out.
    #[must_use]
    pub fn modules_by_level_matching(&self, query: &str) -> Vec<(Level, Vec<ModuleDescriptor>)> {
        let mut groups: BTreeMap<u8, Vec<ModuleDescriptor>> = BTreeMap::new();
        for module in self.catalog.modules() {
            if matches_query(module, query) {
                groups.entry(module.level).or_default().push(module.clone());
            }
        }
        groups
            .into_iter()
            .map(|(number, modules)| (Level::new(number), modules))
            .collect()
    }

    fn filtered(&self, predicate: impl Fn(&ModuleDescriptor) -> bool) -> Vec<ModuleDescriptor> {
        self.catalog
            .modules()
            .iter()
            .filter(|m| predicate(m))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::module_keywords;
    use proptest::prelude::*;

    fn sample_repository() -> ModuleRepository {
        let catalog = Catalog::new(vec![
            ModuleDescriptor::new("launched_effect", "LaunchedEffect", 7, Category::Effects)
                .with_description("Run suspend work tied to composition")
                .with_prerequisites(["remember", "missing_id"]),
            ModuleDescriptor::new("button", "Button", 4, Category::Components)
                .with_description("Clickable actions")
                .with_long_description("Filled and outlined variants"),
            ModuleDescriptor::new("remember", "remember", 3, Category::State)
                .with_description("Keep values across recompositions"),
            ModuleDescriptor::new("lonely", "Lonely", 4, Category::Components)
                .with_prerequisites(["missing_id"]),
        ])
        .unwrap();
        ModuleRepository::new(Arc::new(catalog))
    }

    fn ids(modules: &[ModuleDescriptor]) -> Vec<&str> {
        modules.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_by_level_exact_match() {
        let repo = sample_repository();
        assert_eq!(ids(&repo.by_level(7)), ["launched_effect"]);
        assert_eq!(ids(&repo.by_level(4)), ["button", "lonely"]);
        assert!(repo.by_level(9).is_empty());
    }

    #[test]
    fn test_by_category() {
        let repo = sample_repository();
        assert_eq!(ids(&repo.by_category(Category::State)), ["remember"]);
        assert!(repo.by_category(Category::Animation).is_empty());
    }

    #[test]
    fn test_search_empty_returns_all() {
        let repo = sample_repository();
        assert_eq!(repo.search("").len(), repo.total_count());
    }

    #[test]
    fn test_search_matches_long_description_and_category() {
        let repo = sample_repository();
        assert_eq!(ids(&repo.search("OUTLINED")), ["button"]);
        assert_eq!(ids(&repo.search("side effects")), ["launched_effect"]);
        assert!(repo.search("zzz").is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let repo = sample_repository();
        assert_eq!(repo.get("button").map(|m| m.level), Some(4));
        assert!(repo.get("nope").is_none());
    }

    #[test]
    fn test_prerequisites_drop_missing() {
        let repo = sample_repository();
        let effect = repo.get("launched_effect").unwrap();
        assert_eq!(ids(&repo.prerequisites(&effect)), ["remember"]);

        let lonely = repo.get("lonely").unwrap();
        assert!(repo.prerequisites(&lonely).is_empty());
    }

    #[test]
    fn test_counts() {
        let repo = sample_repository();
        assert_eq!(repo.total_count(), 4);

        let by_level = repo.count_by_level();
        assert_eq!(by_level.get(&4), Some(&2));
        assert_eq!(by_level.get(&7), Some(&1));

        let by_category = repo.count_by_category();
        assert_eq!(by_category.get(&Category::Components), Some(&2));
        assert_eq!(by_category.get(&Category::Animation), None);
    }

    #[test]
    fn test_grouping() {
        let repo = sample_repository();
        let levels: Vec<u8> = repo.levels().iter().map(|l| l.number).collect();
        assert_eq!(levels, [3, 4, 7]);

        let groups = repo.modules_by_level_matching("button");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0.number, 4);
        assert_eq!(ids(&groups[0].1), ["button"]);
    }

    proptest! {
        #[test]
        fn prop_search_results_match_query(query in " {0,2}[a-zA-Z ]{0,6} {0,2}") {
            let repo = ModuleRepository::new(Arc::new(Catalog::builtin().unwrap()));
            let needle = query.to_lowercase();
            let results = repo.search(&query);

            if needle.is_empty() {
                prop_assert_eq!(results.len(), repo.total_count());
            }
            for module in &results {
                let hit = module_keywords(module).iter().any(|k| k.contains(&needle))
                    || module.long_description.to_lowercase().contains(&needle);
                prop_assert!(hit);
            }
            let expected = repo
                .all()
                .into_iter()
                .filter(|m| {
                    module_keywords(m).iter().any(|k| k.contains(&needle))
                        || m.long_description.to_lowercase().contains(&needle)
                })
                .count();
            prop_assert_eq!(results.len(), expected);
        }
    }
}
