//! Observable, durable preference store.
//!
//! Reads are `watch` subscriptions that yield the current value first and
//! then every later change. Writes are read-modify-write cycles serialised
//! by the store's write lock, so concurrent mutations never lose an update.

use crate::backend::{FileBackend, MemoryBackend, PreferenceBackend};
use crate::codec::sanitize_token;
use crate::recent::{push_recent, remove_recent};
use crate::record::{Preferences, StoreLimits};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;
use studyhall_core::{Error, Result};
use tokio::sync::{watch, Mutex, OnceCell};
use tracing::{debug, warn};

/// Cheaply cloneable handle to a preference store.
#[derive(Clone)]
pub struct PreferenceStore {
    inner: Arc<Inner>,
}

struct Inner {
    backend: Arc<dyn PreferenceBackend>,
    limits: StoreLimits,
    state: OnceCell<watch::Sender<Preferences>>,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("limits", &self.inner.limits)
            .field("loaded", &self.inner.state.initialized())
            .finish_non_exhaustive()
    }
}

impl PreferenceStore {
    pub fn new(backend: impl PreferenceBackend + 'static, limits: StoreLimits) -> Self {
        Self::from_backend(Arc::new(backend), limits)
    }

    pub fn from_backend(backend: Arc<dyn PreferenceBackend>, limits: StoreLimits) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend,
                limits,
                state: OnceCell::new(),
                write_lock: Mutex::new(()),
            }),
        }
    }

    /// Store backed by a preference file.
    pub fn open(path: impl Into<PathBuf>, limits: StoreLimits) -> Self {
        Self::new(FileBackend::new(path), limits)
    }

    /// Store that forgets everything when dropped.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new(), StoreLimits::default())
    }

    #[must_use]
    pub fn limits(&self) -> StoreLimits {
        self.inner.limits
    }

    // Streams

    /// Subscribe to the whole record.
    pub async fn observe(&self) -> PreferenceStream<Preferences> {
        self.stream(Preferences::clone).await
    }

    pub async fn recent_searches(&self) -> PreferenceStream<Vec<String>> {
        self.stream(|p| p.recent_searches.clone()).await
    }

    pub async fn recent_modules(&self) -> PreferenceStream<Vec<String>> {
        self.stream(|p| p.recent_modules.clone()).await
    }

    pub async fn completed_modules(&self) -> PreferenceStream<BTreeSet<String>> {
        self.stream(|p| p.completed_modules.clone()).await
    }

    pub async fn expanded_levels(&self) -> PreferenceStream<BTreeSet<u8>> {
        self.stream(|p| p.expanded_levels.clone()).await
    }

    /// Current record without subscribing.
    pub async fn snapshot(&self) -> Preferences {
        self.sender().await.borrow().clone()
    }

    // Recent searches

    pub async fn add_recent_search(&self, term: &str) -> Result<()> {
        let cap = self.inner.limits.max_recent_searches;
        self.update("add_recent_search", |p| push_recent(&mut p.recent_searches, term, cap))
            .await
    }

    pub async fn remove_recent_search(&self, term: &str) -> Result<()> {
        self.update("remove_recent_search", |p| remove_recent(&mut p.recent_searches, term))
            .await
    }

    pub async fn clear_recent_searches(&self) -> Result<()> {
        self.update("clear_recent_searches", |p| clear_vec(&mut p.recent_searches))
            .await
    }

    // Recent modules

    pub async fn add_recent_module(&self, id: &str) -> Result<()> {
        let cap = self.inner.limits.max_recent_modules;
        self.update("add_recent_module", |p| push_recent(&mut p.recent_modules, id, cap))
            .await
    }

    pub async fn clear_recent_modules(&self) -> Result<()> {
        self.update("clear_recent_modules", |p| clear_vec(&mut p.recent_modules))
            .await
    }

    // Completion

    pub async fn toggle_completed(&self, id: &str) -> Result<()> {
        let id = sanitize_token(id);
        if id.is_empty() {
            return Ok(());
        }
        self.update("toggle_completed", |p| {
            if !p.completed_modules.remove(&id) {
                p.completed_modules.insert(id.clone());
            }
            true
        })
        .await
    }

    pub async fn mark_completed(&self, id: &str) -> Result<()> {
        let id = sanitize_token(id);
        if id.is_empty() {
            return Ok(());
        }
        self.update("mark_completed", |p| p.completed_modules.insert(id.clone()))
            .await
    }

    pub async fn mark_incomplete(&self, id: &str) -> Result<()> {
        let id = sanitize_token(id);
        if id.is_empty() {
            return Ok(());
        }
        self.update("mark_incomplete", |p| p.completed_modules.remove(&id))
            .await
    }

    pub async fn clear_completed(&self) -> Result<()> {
        self.update("clear_completed", |p| {
            let changed = !p.completed_modules.is_empty();
            p.completed_modules.clear();
            changed
        })
        .await
    }

    // Expanded levels

    /// Replace the expanded-level set.
    pub async fn save_expanded_levels(&self, levels: BTreeSet<u8>) -> Result<()> {
        self.update("save_expanded_levels", |p| {
            let changed = p.expanded_levels != levels;
            p.expanded_levels = levels;
            changed
        })
        .await
    }

    async fn stream<T>(&self, project: fn(&Preferences) -> T) -> PreferenceStream<T> {
        PreferenceStream {
            rx: self.sender().await.subscribe(),
            project,
            primed: false,
        }
    }

    /// Channel holding the live record, loaded on first use.
    async fn sender(&self) -> &watch::Sender<Preferences> {
        self.inner
            .state
            .get_or_init(|| async {
                let prefs = self.load().await;
                watch::channel(prefs).0
            })
            .await
    }

    async fn load(&self) -> Preferences {
        let backend = Arc::clone(&self.inner.backend);
        let loaded = tokio::task::spawn_blocking(move || backend.load())
            .await
            .map_err(|e| Error::internal(format!("Preference load task failed: {e}")))
            .and_then(|res| res);

        match loaded {
            Ok(entries) => {
                debug!(keys = entries.len(), "Loaded preferences");
                Preferences::from_entries(&entries, self.inner.limits)
            }
            Err(e) => {
                warn!(error = %e, "Preferences unreadable, starting empty");
                Preferences::default()
            }
        }
    }

    /// Apply `mutate` under the write lock. `mutate` reports whether it
    /// changed anything; unchanged records are neither saved nor published.
    async fn update<F>(&self, op: &'static str, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Preferences) -> bool,
    {
        let sender = self.sender().await;
        let _guard = self.inner.write_lock.lock().await;

        let mut next = sender.borrow().clone();
        if !mutate(&mut next) {
            debug!(op, "Preferences unchanged");
            return Ok(());
        }

        self.persist(next.to_entries()).await?;
        sender.send_replace(next);
        debug!(op, "Preferences saved");
        Ok(())
    }

    async fn persist(&self, entries: BTreeMap<String, String>) -> Result<()> {
        let backend = Arc::clone(&self.inner.backend);
        tokio::task::spawn_blocking(move || backend.save(&entries))
            .await
            .map_err(|e| Error::internal(format!("Preference save task failed: {e}")))?
    }
}

fn clear_vec(list: &mut Vec<String>) -> bool {
    let changed = !list.is_empty();
    list.clear();
    changed
}

/// Subscription to one projection of the preferences record.
///
/// The first [`next`](Self::next) yields the current value immediately;
/// later calls wait for the next change. Ends when the store is dropped.
#[derive(Clone)]
pub struct PreferenceStream<T> {
    rx: watch::Receiver<Preferences>,
    project: fn(&Preferences) -> T,
    primed: bool,
}

impl<T> PreferenceStream<T> {
    /// Latest value without waiting.
    pub fn current(&self) -> T {
        (self.project)(&self.rx.borrow())
    }

    pub async fn next(&mut self) -> Option<T> {
        if self.primed {
            self.rx.changed().await.ok()?;
        }
        self.primed = true;
        Some((self.project)(&self.rx.borrow_and_update()))
    }
}
