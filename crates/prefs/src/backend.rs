//! Storage backends for the preference store.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use studyhall_core::{Error, Result};
use tempfile::NamedTempFile;

/// Durable key/value storage for preference entries.
///
/// Implementations replace the whole entry map on every save.
pub trait PreferenceBackend: Send + Sync {
    fn load(&self) -> Result<BTreeMap<String, String>>;
    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()>;
}

/// Preference file holding a JSON object of string values.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceBackend for FileBackend {
    fn load(&self) -> Result<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(Error::storage_read(format!(
                    "Failed to read preferences {}: {e}",
                    self.path.display()
                ))
                .with_source(e))
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let raw: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(&content).map_err(|e| {
                Error::storage_read(format!(
                    "Malformed preferences {}: {e}",
                    self.path.display()
                ))
                .with_source(e)
            })?;

        // Non-string values are dropped like any other malformed token.
        Ok(raw
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(s) => Some((key, s)),
                _ => None,
            })
            .collect())
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let write_err = |e: std::io::Error| {
            Error::storage_write(format!(
                "Failed to write preferences {}: {e}",
                self.path.display()
            ))
            .with_source(e)
        };

        fs::create_dir_all(&dir).map_err(write_err)?;
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| Error::internal(format!("Failed to encode preferences: {e}")))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

/// In-process backend for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<BTreeMap<String, String>>,
    saves: AtomicUsize,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entries(entries: BTreeMap<String, String>) -> Self {
        Self {
            entries: Mutex::new(entries),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of completed saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl PreferenceBackend for MemoryBackend {
    fn load(&self) -> Result<BTreeMap<String, String>> {
        self.entries
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| Error::storage_read("Memory backend lock poisoned"))
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| Error::storage_write("Memory backend lock poisoned"))?;
        *guard = entries.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studyhall_core::ErrorCode;
    use tempfile::TempDir;

    fn entries() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("recent_searches".to_string(), "state|lazy".to_string()),
            ("expanded_levels".to_string(), "1|7".to_string()),
        ])
    }

    #[test]
    fn test_file_missing_loads_empty() {
        let temp = TempDir::new().unwrap();
        let backend = FileBackend::new(temp.path().join("absent.json"));
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_round_trip_creates_parents() {
        let temp = TempDir::new().unwrap();
        let backend = FileBackend::new(temp.path().join("nested/dir/preferences.json"));

        backend.save(&entries()).unwrap();
        assert!(backend.path().exists());
        assert_eq!(backend.load().unwrap(), entries());
    }

    #[test]
    fn test_file_malformed_is_read_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("preferences.json");
        fs::write(&path, "{ broken").unwrap();

        let err = FileBackend::new(&path).load().unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageReadError);
    }

    #[test]
    fn test_file_drops_non_string_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("preferences.json");
        fs::write(&path, r#"{"recent_modules": "button", "expanded_levels": [1, 2]}"#).unwrap();

        let loaded = FileBackend::new(&path).load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["recent_modules"], "button");
    }

    #[test]
    fn test_memory_backend_counts_saves() {
        let backend = MemoryBackend::new();
        backend.save(&entries()).unwrap();
        backend.save(&entries()).unwrap();
        assert_eq!(backend.save_count(), 2);
        assert_eq!(backend.load().unwrap(), entries());
    }
}
