//! Client-side filtering over the loaded page
//!
//! Filtering is pure and derived: it is recomputed from the current items
//! and filter state on every render, never mutates the items, and never
//! touches the network. Server-side filtering (page, limit, category) is the
//! controller's concern; this module only narrows what is already loaded.

use crate::models::{Record, Searchable};
use serde::{Deserialize, Serialize};

/// Active-flag filter applied alongside the search term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    fn matches(&self, record: &impl Record) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => record.is_active(),
            StatusFilter::Inactive => !record.is_active(),
        }
    }
}

/// The screen's current search and status filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Case-insensitive substring matched against the record's search terms.
    pub search: String,
    /// Active-flag narrowing.
    pub status: StatusFilter,
}

impl FilterState {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }
}

/// Narrow `items` to those matching the filter state and an extra predicate.
///
/// The search term matches when any of the record's
/// [`search_terms`](Searchable::search_terms) contains it, ignoring case; an
/// empty term matches everything. The status filter and `extra` predicate
/// are AND-ed on top. Returns references into `items` in their original
/// order.
///
/// # Examples
///
/// ```
/// use core_catalog::filter::{apply, FilterState};
/// use core_catalog::models::Category;
///
/// let items = vec![
///     Category { name: "Jazz".into(), ..Default::default() },
///     Category { name: "Rock".into(), ..Default::default() },
/// ];
///
/// let filter = FilterState::default().with_search("ja");
/// let visible = apply(&items, &filter, |_| true);
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].name, "Jazz");
/// ```
pub fn apply<'a, T, P>(items: &'a [T], filter: &FilterState, extra: P) -> Vec<&'a T>
where
    T: Record + Searchable,
    P: Fn(&T) -> bool,
{
    let needle = filter.search.trim().to_lowercase();

    items
        .iter()
        .filter(|item| {
            matches_search(*item, &needle) && filter.status.matches(*item) && extra(*item)
        })
        .collect()
}

fn matches_search<T: Searchable>(item: &T, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    item.search_terms()
        .iter()
        .any(|term| term.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Track;

    fn track(title: &str, artists: &[&str], active: bool) -> Track {
        Track {
            object_id: Some(format!("t-{}", title)),
            title: title.to_string(),
            artists: artists.iter().map(|a| a.to_string()).collect(),
            is_active: active,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let items = vec![track("One", &[], true), track("Two", &[], false)];
        let visible = apply(&items, &FilterState::default(), |_| true);
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let items = vec![
            track("Sunset Dreams", &["The Dreamers"], true),
            track("Electric Nights", &["Neon Lights"], true),
        ];
        let filter = FilterState::default().with_search("SUNSET");
        let visible = apply(&items, &filter, |_| true);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Sunset Dreams");
    }

    #[test]
    fn test_search_matches_artists() {
        let items = vec![
            track("Sunset Dreams", &["The Dreamers"], true),
            track("Electric Nights", &["Neon Lights"], true),
        ];
        let filter = FilterState::default().with_search("neon");
        let visible = apply(&items, &filter, |_| true);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Electric Nights");
    }

    #[test]
    fn test_status_filter_is_anded() {
        let items = vec![
            track("Sunset Dreams", &[], true),
            track("Sunset Reprise", &[], false),
        ];
        let filter = FilterState::default()
            .with_search("sunset")
            .with_status(StatusFilter::Inactive);
        let visible = apply(&items, &filter, |_| true);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Sunset Reprise");
    }

    #[test]
    fn test_extra_predicate_is_anded() {
        let items = vec![track("One", &[], true), track("Two", &[], true)];
        let visible = apply(&items, &FilterState::default(), |t| t.title == "Two");
        assert_eq!(visible.len(), 1);
    }

    #[test]
    fn test_filter_is_pure() {
        let items = vec![track("One", &[], true), track("Two", &[], true)];
        let filter = FilterState::default().with_search("one");

        let first: Vec<String> = apply(&items, &filter, |_| true)
            .iter()
            .map(|t| t.title.clone())
            .collect();
        let second: Vec<String> = apply(&items, &filter, |_| true)
            .iter()
            .map(|t| t.title.clone())
            .collect();

        assert_eq!(first, second);
        assert_eq!(items.len(), 2);
    }
}
