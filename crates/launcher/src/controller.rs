//! Launcher view-state controller.
//!
//! Merges the static catalog with live preferences into one observable
//! [`LauncherState`] and turns user intents into state changes and
//! fire-and-forget preference writes.

use crate::state::LauncherState;
use crate::writer::{self, PrefsCommand};
use std::collections::BTreeSet;
use std::sync::Arc;
use studyhall_catalog::{ModuleDescriptor, ModuleRepository};
use studyhall_prefs::{PreferenceStore, PreferenceStream, Preferences};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Owns the launcher state for one screen.
///
/// Intents are synchronous. Preference writes go through an ordered
/// write-behind queue; the merged state picks them up once stored.
/// Dropping the controller stops the preference sync; queued writes still drain.
pub struct LauncherController {
    repository: Arc<ModuleRepository>,
    store: PreferenceStore,
    state: Arc<watch::Sender<LauncherState>>,
    prefs: PreferenceStream<Preferences>,
    commands: mpsc::UnboundedSender<PrefsCommand>,
    sync_task: JoinHandle<()>,
}

impl LauncherController {
    /// Build the initial state from the catalog and stored preferences.
    ///
    /// Must be called inside a Tokio runtime.
    pub async fn new(repository: Arc<ModuleRepository>, store: PreferenceStore) -> Self {
        let mut prefs = store.observe().await;
        let initial = prefs.next().await.unwrap_or_default();

        let state = Arc::new(watch::channel(LauncherState::new(&repository, &initial)).0);

        let sync_task = tokio::spawn(sync_preferences(
            prefs.clone(),
            Arc::clone(&state),
            Arc::clone(&repository),
        ));

        let (commands, queue) = mpsc::unbounded_channel();
        tokio::spawn(writer::run(store.clone(), queue));

        debug!(modules = repository.total_count(), "Launcher ready");

        Self {
            repository,
            store,
            state,
            prefs,
            commands,
            sync_task,
        }
    }

    #[must_use]
    pub fn repository(&self) -> &ModuleRepository {
        &self.repository
    }

    #[must_use]
    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> LauncherState {
        self.state.borrow().clone()
    }

    /// Live view of the state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LauncherState> {
        self.state.subscribe()
    }

    /// Wait until every queued write is stored and merged into the state.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.commands.send(PrefsCommand::Flush(ack)).is_ok() {
            let _ = done.await;
        }
        self.merge_preferences();
    }

    // Search

    pub fn update_query(&self, text: &str) {
        self.modify(|state, repository| {
            state.query = text.to_string();
            state.refresh_sections(repository);
        });
    }

    /// Leaving search mode also clears the query.
    pub fn set_search_active(&self, active: bool) {
        self.modify(|state, repository| {
            state.search_active = active;
            if !active {
                state.query.clear();
            }
            state.refresh_sections(repository);
        });
    }

    /// Remember the current query if it is not blank.
    pub fn submit_search(&self) {
        let query = self.state.borrow().query.trim().to_string();
        if query.is_empty() {
            return;
        }
        self.enqueue(PrefsCommand::AddRecentSearch(query));
    }

    pub fn select_recent_search(&self, term: &str) {
        self.modify(|state, repository| {
            state.query = term.to_string();
            state.search_active = true;
            state.refresh_sections(repository);
        });
    }

    pub fn remove_recent_search(&self, term: &str) {
        self.enqueue(PrefsCommand::RemoveRecentSearch(term.to_string()));
    }

    pub fn clear_recent_searches(&self) {
        self.enqueue(PrefsCommand::ClearRecentSearches);
    }

    // Modules

    /// Record a launch and hand back the descriptor to navigate to.
    ///
    /// Unknown ids are not recorded.
    pub fn launch_module(&self, id: &str) -> Option<ModuleDescriptor> {
        let Some(module) = self.repository.get(id) else {
            warn!(module = id, "Launch requested for unknown module");
            return None;
        };
        info!(module = %module.id, target = %module.launch_target, "Launching module");
        self.enqueue(PrefsCommand::AddRecentModule(module.id.clone()));
        Some(module)
    }

    pub fn clear_recent_modules(&self) {
        self.enqueue(PrefsCommand::ClearRecentModules);
    }

    /// Show or hide a module's detail card. Not persisted.
    pub fn toggle_module_expanded(&self, id: &str) {
        self.modify(|state, _| {
            if !state.expanded_modules.remove(id) {
                state.expanded_modules.insert(id.to_string());
            }
        });
    }

    pub fn toggle_module_completion(&self, id: &str) {
        self.enqueue(PrefsCommand::ToggleCompleted(id.to_string()));
    }

    pub fn clear_completed(&self) {
        self.enqueue(PrefsCommand::ClearCompleted);
    }

    // Levels

    pub fn toggle_level_expanded(&self, level: u8) {
        self.set_expanded_levels(|levels| {
            if !levels.remove(&level) {
                levels.insert(level);
            }
        });
    }

    pub fn expand_all_levels(&self) {
        let all: BTreeSet<u8> = self.repository.levels().iter().map(|l| l.number).collect();
        self.set_expanded_levels(|levels| *levels = all);
    }

    pub fn collapse_all_levels(&self) {
        self.set_expanded_levels(BTreeSet::clear);
    }

    fn set_expanded_levels(&self, change: impl FnOnce(&mut BTreeSet<u8>)) {
        let mut saved = BTreeSet::new();
        self.modify(|state, repository| {
            change(&mut state.expanded_levels);
            state.refresh_sections(repository);
            saved.clone_from(&state.expanded_levels);
        });
        self.enqueue(PrefsCommand::SaveExpandedLevels(saved));
    }

    fn modify(&self, change: impl FnOnce(&mut LauncherState, &ModuleRepository)) {
        let repository = &self.repository;
        self.state.send_modify(|state| change(state, repository));
    }

    fn enqueue(&self, command: PrefsCommand) {
        if let Err(e) = self.commands.send(command) {
            warn!(command = ?e.0, "Preference writer is gone, dropping write");
        }
    }

    fn merge_preferences(&self) {
        merge(&self.state, &self.prefs, &self.repository);
    }
}

impl Drop for LauncherController {
    fn drop(&mut self) {
        self.sync_task.abort();
    }
}

impl std::fmt::Debug for LauncherController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LauncherController")
            .field("store", &self.store)
            .field("modules", &self.repository.total_count())
            .finish_non_exhaustive()
    }
}

/// Merge the latest stored preferences, read under the state lock so a
/// slower merge can never overwrite a newer one.
fn merge(
    state: &watch::Sender<LauncherState>,
    prefs: &PreferenceStream<Preferences>,
    repository: &ModuleRepository,
) {
    state.send_modify(|s| s.apply_preferences(&prefs.current(), repository));
}

async fn sync_preferences(
    mut prefs: PreferenceStream<Preferences>,
    state: Arc<watch::Sender<LauncherState>>,
    repository: Arc<ModuleRepository>,
) {
    // The first item is the value the state was built from.
    let _ = prefs.next().await;
    while prefs.next().await.is_some() {
        merge(&state, &prefs, &repository);
    }
}
