//! The persisted preferences record and its key layout.

use crate::codec::{decode_levels, decode_list, encode_levels, encode_list};
use crate::recent::normalize_recent;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub const KEY_RECENT_SEARCHES: &str = "recent_searches";
pub const KEY_RECENT_MODULES: &str = "recent_modules";
pub const KEY_COMPLETED_MODULES: &str = "completed_modules";
pub const KEY_EXPANDED_LEVELS: &str = "expanded_levels";

/// Default length of both recent lists.
pub const DEFAULT_MAX_RECENT: usize = 10;

/// Everything the launcher remembers between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Preferences {
    /// Most recent first
    pub recent_searches: Vec<String>,
    /// Most recent first
    pub recent_modules: Vec<String>,
    pub completed_modules: BTreeSet<String>,
    pub expanded_levels: BTreeSet<u8>,
}

/// Caps applied to the recent lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLimits {
    pub max_recent_searches: usize,
    pub max_recent_modules: usize,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            max_recent_searches: DEFAULT_MAX_RECENT,
            max_recent_modules: DEFAULT_MAX_RECENT,
        }
    }
}

impl Preferences {
    /// Decode from stored key/value entries. Missing keys read as empty.
    #[must_use]
    pub fn from_entries(entries: &BTreeMap<String, String>, limits: StoreLimits) -> Self {
        let raw = |key: &str| entries.get(key).map_or("", String::as_str);

        let mut recent_searches = decode_list(raw(KEY_RECENT_SEARCHES));
        normalize_recent(&mut recent_searches, limits.max_recent_searches);
        let mut recent_modules = decode_list(raw(KEY_RECENT_MODULES));
        normalize_recent(&mut recent_modules, limits.max_recent_modules);

        Self {
            recent_searches,
            recent_modules,
            completed_modules: decode_list(raw(KEY_COMPLETED_MODULES)).into_iter().collect(),
            expanded_levels: decode_levels(raw(KEY_EXPANDED_LEVELS)),
        }
    }

    #[must_use]
    pub fn to_entries(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (KEY_RECENT_SEARCHES.to_string(), encode_list(&self.recent_searches)),
            (KEY_RECENT_MODULES.to_string(), encode_list(&self.recent_modules)),
            (KEY_COMPLETED_MODULES.to_string(), encode_list(&self.completed_modules)),
            (KEY_EXPANDED_LEVELS.to_string(), encode_levels(&self.expanded_levels)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_entries() {
        let prefs = Preferences::from_entries(&BTreeMap::new(), StoreLimits::default());
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_entries_round_trip() {
        let prefs = Preferences {
            recent_searches: vec!["state".into(), "lazy".into()],
            recent_modules: vec!["button".into()],
            completed_modules: ["text".to_string(), "row".to_string()].into_iter().collect(),
            expanded_levels: [7, 1].into_iter().collect(),
        };

        let entries = prefs.to_entries();
        assert_eq!(entries[KEY_RECENT_SEARCHES], "state|lazy");
        assert_eq!(entries[KEY_EXPANDED_LEVELS], "1|7");
        assert_eq!(Preferences::from_entries(&entries, StoreLimits::default()), prefs);
    }

    #[test]
    fn test_malformed_entries_degrade() {
        let entries = BTreeMap::from([
            (KEY_RECENT_SEARCHES.to_string(), "a|a|b||".to_string()),
            (KEY_EXPANDED_LEVELS.to_string(), "two|3|999".to_string()),
        ]);
        let limits = StoreLimits {
            max_recent_searches: 1,
            max_recent_modules: 10,
        };

        let prefs = Preferences::from_entries(&entries, limits);
        assert_eq!(prefs.recent_searches, vec!["a".to_string()]);
        assert_eq!(prefs.expanded_levels.into_iter().collect::<Vec<_>>(), vec![3]);
        assert!(prefs.completed_modules.is_empty());
    }
}
