//! Multi-select state for bulk operations
//!
//! Tracks which of the currently-loaded items are checked. Selection never
//! outlives the page it was made on: the controller clears it on page or
//! page-size changes, after deletions, and prunes it after every refetch so
//! it can never reference an item that is no longer loaded.

use std::collections::HashSet;

/// Set of selected item identifiers.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present.
    pub fn toggle(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Replace the selection with exactly the given ids.
    ///
    /// Used by the "select all visible" checkbox; it is a replacement, not a
    /// union, so unchecking rows that were filtered out works as expected.
    pub fn select_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn remove(&mut self, id: &str) {
        self.ids.remove(id);
    }

    /// Drop every selected id not present in `existing`.
    pub fn retain_within<'a, I>(&mut self, existing: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let existing: HashSet<&str> = existing.into_iter().collect();
        self.ids.retain(|id| existing.contains(id.as_str()));
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Snapshot of the selected ids, in no particular order.
    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = SelectionSet::new();
        selection.toggle("a");
        assert!(selection.is_selected("a"));
        selection.toggle("a");
        assert!(!selection.is_selected("a"));
    }

    #[test]
    fn test_select_all_replaces() {
        let mut selection = SelectionSet::new();
        selection.toggle("a");
        selection.select_all(["b", "c"]);
        assert!(!selection.is_selected("a"));
        assert!(selection.is_selected("b"));
        assert!(selection.is_selected("c"));
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_retain_within_drops_missing() {
        let mut selection = SelectionSet::new();
        selection.select_all(["a", "b", "c"]);
        selection.retain_within(["b"]);
        assert_eq!(selection.ids(), vec!["b".to_string()]);
    }

    #[test]
    fn test_clear() {
        let mut selection = SelectionSet::new();
        selection.select_all(["a", "b"]);
        selection.clear();
        assert!(selection.is_empty());
    }
}
