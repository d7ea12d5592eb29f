//! Capped, move-to-front, deduplicated most-recently-used lists.

use crate::codec::sanitize_token;

/// Put `item` at the front of `list`, dropping any older copy and
/// truncating to `cap`. Blank items are ignored.
///
/// Returns whether the list changed.
pub fn push_recent(list: &mut Vec<String>, item: &str, cap: usize) -> bool {
    let item = sanitize_token(item);
    if item.is_empty() {
        return false;
    }
    if list.first() == Some(&item) && list.len() <= cap {
        return false;
    }

    list.retain(|existing| existing != &item);
    list.insert(0, item);
    list.truncate(cap);
    true
}

/// Remove every copy of `item`. Returns whether the list changed.
pub fn remove_recent(list: &mut Vec<String>, item: &str) -> bool {
    let item = sanitize_token(item);
    let before = list.len();
    list.retain(|existing| existing != &item);
    list.len() != before
}

/// Restore the recent-list invariants on data read back from storage.
pub(crate) fn normalize_recent(list: &mut Vec<String>, cap: usize) {
    let mut seen = std::collections::HashSet::new();
    list.retain(|item| seen.insert(item.clone()));
    list.truncate(cap);
}
