//! Write-behind queue between the controller and the preference store.
//!
//! Intents enqueue commands without waiting; a single task applies them to
//! the store in submission order.

use std::collections::BTreeSet;
use studyhall_core::Result;
use studyhall_prefs::PreferenceStore;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

#[derive(Debug)]
pub(crate) enum PrefsCommand {
    AddRecentSearch(String),
    RemoveRecentSearch(String),
    ClearRecentSearches,
    AddRecentModule(String),
    ClearRecentModules,
    ToggleCompleted(String),
    ClearCompleted,
    SaveExpandedLevels(BTreeSet<u8>),
    /// Acknowledged once every earlier command has been applied
    Flush(oneshot::Sender<()>),
}

impl PrefsCommand {
    fn name(&self) -> &'static str {
        match self {
            Self::AddRecentSearch(_) => "add_recent_search",
            Self::RemoveRecentSearch(_) => "remove_recent_search",
            Self::ClearRecentSearches => "clear_recent_searches",
            Self::AddRecentModule(_) => "add_recent_module",
            Self::ClearRecentModules => "clear_recent_modules",
            Self::ToggleCompleted(_) => "toggle_completed",
            Self::ClearCompleted => "clear_completed",
            Self::SaveExpandedLevels(_) => "save_expanded_levels",
            Self::Flush(_) => "flush",
        }
    }

    async fn apply(self, store: &PreferenceStore) -> Result<()> {
        match self {
            Self::AddRecentSearch(term) => store.add_recent_search(&term).await,
            Self::RemoveRecentSearch(term) => store.remove_recent_search(&term).await,
            Self::ClearRecentSearches => store.clear_recent_searches().await,
            Self::AddRecentModule(id) => store.add_recent_module(&id).await,
            Self::ClearRecentModules => store.clear_recent_modules().await,
            Self::ToggleCompleted(id) => store.toggle_completed(&id).await,
            Self::ClearCompleted => store.clear_completed().await,
            Self::SaveExpandedLevels(levels) => store.save_expanded_levels(levels).await,
            Self::Flush(ack) => {
                let _ = ack.send(());
                Ok(())
            }
        }
    }
}

/// Apply commands until every sender is gone.
pub(crate) async fn run(store: PreferenceStore, mut commands: mpsc::UnboundedReceiver<PrefsCommand>) {
    while let Some(command) = commands.recv().await {
        let op = command.name();
        if let Err(e) = command.apply(&store).await {
            warn!(op, error = %e, "Preference write failed");
        }
    }
    debug!("Preference writer stopped");
}
