//! Launcher view state.

use std::collections::BTreeSet;
use studyhall_catalog::{Level, ModuleDescriptor, ModuleRepository};
use studyhall_prefs::Preferences;

/// One level of the launcher with the modules currently shown under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSection {
    pub level: Level,
    pub modules: Vec<ModuleDescriptor>,
    /// Expanded because the user opened it or because a search is active
    pub expanded: bool,
    /// Completed modules among `modules`
    pub completed: usize,
}

/// Everything the presentation layer needs to draw the launcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LauncherState {
    pub query: String,
    pub search_active: bool,
    /// Levels in ascending order; levels without a query match are omitted
    pub sections: Vec<LevelSection>,
    pub recent_searches: Vec<String>,
    /// Resolved descriptors, most recent first; unknown ids are skipped
    pub recent_modules: Vec<ModuleDescriptor>,
    pub completed_modules: BTreeSet<String>,
    pub expanded_levels: BTreeSet<u8>,
    /// Per-card detail expansion, never persisted
    pub expanded_modules: BTreeSet<String>,
    pub total_modules: usize,
    /// Completed ids that exist in the catalog
    pub completed_count: usize,
}

impl LauncherState {
    pub(crate) fn new(repository: &ModuleRepository, prefs: &Preferences) -> Self {
        let mut state = Self {
            total_modules: repository.total_count(),
            expanded_levels: prefs.expanded_levels.clone(),
            ..Self::default()
        };
        state.apply_preferences(prefs, repository);
        state
    }

    #[must_use]
    pub fn is_completed(&self, id: &str) -> bool {
        self.completed_modules.contains(id)
    }

    #[must_use]
    pub fn is_level_expanded(&self, level: u8) -> bool {
        self.expanded_levels.contains(&level)
    }

    #[must_use]
    pub fn is_module_expanded(&self, id: &str) -> bool {
        self.expanded_modules.contains(id)
    }

    /// Modules across all sections.
    #[must_use]
    pub fn visible_module_count(&self) -> usize {
        self.sections.iter().map(|s| s.modules.len()).sum()
    }

    /// Merge persisted preferences.
    ///
    /// Expanded levels are taken from storage only when the state is built;
    /// afterwards the controller owns them and storage trails behind.
    pub(crate) fn apply_preferences(&mut self, prefs: &Preferences, repository: &ModuleRepository) {
        self.recent_searches = prefs.recent_searches.clone();
        self.recent_modules = prefs
            .recent_modules
            .iter()
            .filter_map(|id| repository.get(id))
            .collect();
        self.completed_modules = prefs.completed_modules.clone();
        self.completed_count = self
            .completed_modules
            .iter()
            .filter(|id| repository.catalog().contains(id))
            .count();
        self.refresh_sections(repository);
    }

    /// Recompute the per-level sections from the query and expansion state.
    pub(crate) fn refresh_sections(&mut self, repository: &ModuleRepository) {
        let query = self.query.trim();
        let searching = !query.is_empty();
        self.sections = repository
            .modules_by_level_matching(query)
            .into_iter()
            .map(|(level, modules)| {
                let completed = modules
                    .iter()
                    .filter(|m| self.completed_modules.contains(&m.id))
                    .count();
                LevelSection {
                    expanded: searching || self.expanded_levels.contains(&level.number),
                    level,
                    modules,
                    completed,
                }
            })
            .collect();
    }
}
