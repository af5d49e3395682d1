//! Paginated resource controller
//!
//! One [`ResourceController`] backs each resource screen and is the single
//! source of truth for that screen's remote data: the loaded page, its
//! pagination, the search/status filter, and the multi-select state. The
//! host reads snapshots and calls operations; it never mutates the state
//! directly.
//!
//! ## Consistency policy
//!
//! Creates and updates refetch the page afterwards rather than splicing the
//! mutation response into local state; the response regularly omits
//! server-derived fields (a freshly-uploaded image URL, timestamps) and
//! patching it in would show half an item. Deletes remove the item locally,
//! which is exact because deletion needs nothing from the server beyond
//! success.
//!
//! ## Stale responses
//!
//! Rapid page flips can resolve out of order. Every fetch takes a
//! generation number; a response whose generation is no longer the latest
//! is discarded wholesale, so the last *issued* fetch wins rather than the
//! last one to arrive.
//!
//! ## Failure semantics
//!
//! Nothing in here panics past its boundary. Read failures keep the
//! previously loaded items and record a retryable error in the snapshot;
//! write failures leave all state untouched and return the error, with the
//! server's own message preserved when it sent one.

use crate::client::ApiClient;
use crate::envelope;
use crate::error::{CatalogError, Result};
use crate::filter::{self, FilterState, StatusFilter};
use crate::models::Record;
use crate::payload::WriteMode;
use crate::resources::{ResourceDesc, ResourceDraft};
use crate::selection::SelectionSet;
use core_runtime::events::{CatalogEvent, CoreEvent, EventBus};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Snapshot of one screen's remote data and request status.
#[derive(Debug, Clone)]
pub struct PageState<T> {
    /// Current page's items, in server order.
    pub items: Vec<T>,
    /// 1-based page index, always within `[1, total_pages]` once loaded.
    pub current_page: u32,
    /// Requested page size.
    pub items_per_page: u32,
    /// Total items across all pages.
    pub total_items: u64,
    /// Total page count; recomputed client-side when the server omits it.
    pub total_pages: u32,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Last read failure, kept until the next successful fetch. The host
    /// renders this as a dismissible banner with a retry affordance.
    pub last_error: Option<String>,
}

impl<T> PageState<T> {
    fn new(items_per_page: u32) -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            items_per_page,
            total_items: 0,
            total_pages: 0,
            loading: false,
            last_error: None,
        }
    }
}

/// Single source of truth for one resource screen.
///
/// Methods take `&self`; share the controller with `Arc`. Mutations are
/// expected to arrive one at a time (the UI disables its buttons while
/// `loading`), but nothing breaks if they overlap: state is lock-protected
/// and stale fetches are discarded by generation.
pub struct ResourceController<R: ResourceDesc> {
    client: ApiClient,
    events: EventBus,
    state: RwLock<PageState<R::Model>>,
    selection: Mutex<SelectionSet>,
    filter: RwLock<FilterState>,
    /// Extra server-side query parameters (e.g. a category id), appended to
    /// every list request after `page` and `limit`.
    server_filters: RwLock<Vec<(String, String)>>,
    fetch_generation: AtomicU64,
}

impl<R: ResourceDesc> ResourceController<R> {
    /// Create a controller starting on page 1 with the given page size.
    ///
    /// No fetch is issued here; call [`refetch`](Self::refetch) once the
    /// screen mounts.
    pub fn new(client: ApiClient, events: EventBus, items_per_page: u32) -> Self {
        Self {
            client,
            events,
            state: RwLock::new(PageState::new(items_per_page.max(1))),
            selection: Mutex::new(SelectionSet::new()),
            filter: RwLock::new(FilterState::default()),
            server_filters: RwLock::new(Vec::new()),
            fetch_generation: AtomicU64::new(0),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Clone of the current page state.
    pub async fn snapshot(&self) -> PageState<R::Model> {
        self.state.read().await.clone()
    }

    /// The loaded items narrowed by the current search and status filter.
    pub async fn visible_items(&self) -> Vec<R::Model> {
        self.visible_items_where(|_| true).await
    }

    /// Like [`visible_items`](Self::visible_items) with an extra AND-ed
    /// predicate (e.g. a resource-specific categorical filter).
    pub async fn visible_items_where<P>(&self, extra: P) -> Vec<R::Model>
    where
        P: Fn(&R::Model) -> bool,
    {
        let state = self.state.read().await;
        let filter_state = self.filter.read().await;
        filter::apply(&state.items, &filter_state, extra)
            .into_iter()
            .cloned()
            .collect()
    }

    // =========================================================================
    // Filter state (pure; no network)
    // =========================================================================

    pub async fn set_search(&self, term: impl Into<String>) {
        self.filter.write().await.search = term.into();
    }

    pub async fn set_status_filter(&self, status: StatusFilter) {
        self.filter.write().await.status = status;
    }

    pub async fn filter_state(&self) -> FilterState {
        self.filter.read().await.clone()
    }

    /// Set or clear a server-side filter parameter. Takes effect on the
    /// next refetch.
    pub async fn set_server_filter(&self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        let mut filters = self.server_filters.write().await;
        filters.retain(|(k, _)| *k != key);
        if let Some(value) = value {
            filters.push((key, value));
        }
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Move to `page` and refetch.
    ///
    /// Out-of-range requests (below 1 or beyond the last page) and requests
    /// for the current page are ignored, not errors. Selection is cleared.
    pub async fn set_page(&self, page: u32) -> Result<()> {
        {
            let mut state = self.state.write().await;
            if page < 1 || page > state.total_pages || page == state.current_page {
                debug!(page, "Ignoring out-of-range page request");
                return Ok(());
            }
            state.current_page = page;
        }
        self.selection.lock().await.clear();
        self.refetch().await
    }

    /// Change the page size, reset to page 1, and refetch.
    ///
    /// Zero is ignored. Selection is cleared; `total_pages` is recomputed
    /// immediately so pagination controls stay consistent while the fetch
    /// is in flight.
    pub async fn set_items_per_page(&self, items_per_page: u32) -> Result<()> {
        if items_per_page == 0 {
            return Ok(());
        }
        {
            let mut state = self.state.write().await;
            state.items_per_page = items_per_page;
            state.current_page = 1;
            state.total_pages = state.total_items.div_ceil(items_per_page as u64) as u32;
        }
        self.selection.lock().await.clear();
        self.refetch().await
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    /// Fetch the current page from the list endpoint and replace the loaded
    /// items.
    ///
    /// On failure the previous items are preserved and the error is both
    /// recorded in the snapshot (for the retry banner) and returned. A
    /// response that is no longer the latest issued fetch is discarded.
    pub async fn refetch(&self) -> Result<()> {
        let generation = self.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let (page, limit) = {
            let mut state = self.state.write().await;
            state.loading = true;
            (state.current_page, state.items_per_page)
        };

        let mut query = vec![
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        query.extend(self.server_filters.read().await.iter().cloned());

        let result = self.client.get(R::routes().list, &query).await;

        if self.fetch_generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Discarding stale fetch response");
            return Ok(());
        }

        match result {
            Ok(body) => {
                let page_data = envelope::normalize(&body, limit, R::collection_keys());

                let mut items: Vec<R::Model> = Vec::with_capacity(page_data.items.len());
                for value in page_data.items {
                    match serde_json::from_value(value) {
                        Ok(item) => items.push(item),
                        Err(e) => warn!(error = %e, "Skipping malformed item"),
                    }
                }

                let mut state = self.state.write().await;
                if self.fetch_generation.load(Ordering::SeqCst) != generation {
                    return Ok(());
                }

                state.items = items;
                state.total_items = page_data.total;
                state.total_pages = page_data.total_pages;
                if state.total_pages > 0 && state.current_page > state.total_pages {
                    state.current_page = state.total_pages;
                }
                state.loading = false;
                state.last_error = None;

                let ids: Vec<&str> = state.items.iter().map(|i| i.record_id()).collect();
                self.selection
                    .lock()
                    .await
                    .retain_within(ids.iter().copied());

                Ok(())
            }
            Err(e) => {
                let mut state = self.state.write().await;
                state.loading = false;
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetch a single item by id, outside the page flow (detail views).
    ///
    /// Returns `Ok(None)` when the payload is empty or unreadable; a detail
    /// view renders its not-found state instead of crashing.
    pub async fn fetch_by_id(&self, id: &str) -> Result<Option<R::Model>> {
        let body = self.client.get(&R::routes().by_id_path(id), &[]).await?;

        let value = match body.get("data") {
            Some(data) => data.clone(),
            None => body,
        };
        if value.is_null() {
            return Ok(None);
        }

        match serde_json::from_value(value) {
            Ok(item) => Ok(Some(item)),
            Err(e) => {
                warn!(error = %e, "Malformed item payload");
                Ok(None)
            }
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Validate and create a new item, then refetch.
    ///
    /// Validation failures short-circuit before any network call. On
    /// success the list is refetched; a refetch failure does not fail the
    /// create, it shows up as the usual read error in the snapshot.
    pub async fn create(&self, draft: R::Draft) -> Result<()> {
        draft.validate(WriteMode::Create)?;
        let body = draft.into_payload().encode();

        self.client.post(R::routes().create, body).await?;

        self.events
            .emit(CoreEvent::Catalog(CatalogEvent::ItemCreated {
                resource: R::kind().as_str().to_string(),
            }))
            .ok();

        if let Err(e) = self.refetch().await {
            warn!(error = %e, "Refetch after create failed");
        }
        Ok(())
    }

    /// Validate and update the item with `id`, then refetch.
    pub async fn update(&self, id: &str, draft: R::Draft) -> Result<()> {
        draft.validate(WriteMode::Update)?;
        let body = draft.into_payload().encode();

        self.client
            .put(&R::routes().update_path(id), body)
            .await?;

        self.events
            .emit(CoreEvent::Catalog(CatalogEvent::ItemUpdated {
                resource: R::kind().as_str().to_string(),
                id: id.to_string(),
            }))
            .ok();

        if let Err(e) = self.refetch().await {
            warn!(error = %e, "Refetch after update failed");
        }
        Ok(())
    }

    /// Delete the item with `id`.
    ///
    /// Confirmation is the host's concern; by the time this is called the
    /// user has already said yes. On success the item is removed from the
    /// loaded page and the selection; on failure both are left untouched.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&R::routes().delete_path(id)).await?;

        self.remove_locally(id).await;

        self.events
            .emit(CoreEvent::Catalog(CatalogEvent::ItemDeleted {
                resource: R::kind().as_str().to_string(),
                id: id.to_string(),
            }))
            .ok();

        Ok(())
    }

    /// Delete every id, best-effort.
    ///
    /// A failed deletion does not stop the rest; successes are removed from
    /// the loaded page as they land. Selection is cleared afterwards
    /// regardless. If anything failed, one aggregate error reports how
    /// many.
    pub async fn bulk_delete(&self, ids: &[String]) -> Result<()> {
        let mut failed = 0usize;

        for id in ids {
            match self.client.delete(&R::routes().delete_path(id)).await {
                Ok(_) => self.remove_locally(id).await,
                Err(e) => {
                    warn!(id = %id, error = %e, "Bulk delete entry failed");
                    failed += 1;
                }
            }
        }

        self.selection.lock().await.clear();

        self.events
            .emit(CoreEvent::Catalog(CatalogEvent::BulkDeleted {
                resource: R::kind().as_str().to_string(),
                deleted: ids.len() - failed,
                failed,
            }))
            .ok();

        if failed > 0 {
            Err(CatalogError::BulkDelete {
                attempted: ids.len(),
                failed,
            })
        } else {
            Ok(())
        }
    }

    /// Flip the item's active flag through the resource's toggle endpoint,
    /// then refetch.
    ///
    /// Errors with [`CatalogError::Unsupported`] for resources without a
    /// toggle route.
    pub async fn toggle_status(&self, id: &str) -> Result<()> {
        let path = R::routes()
            .toggle_path(id)
            .ok_or(CatalogError::Unsupported {
                resource: R::kind().as_str(),
                operation: "toggle-status",
            })?;

        self.client.patch(&path).await?;

        self.events
            .emit(CoreEvent::Catalog(CatalogEvent::StatusToggled {
                resource: R::kind().as_str().to_string(),
                id: id.to_string(),
            }))
            .ok();

        if let Err(e) = self.refetch().await {
            warn!(error = %e, "Refetch after toggle failed");
        }
        Ok(())
    }

    /// Remove a deleted item from the loaded page and the selection,
    /// keeping the pagination totals honest.
    async fn remove_locally(&self, id: &str) {
        let mut state = self.state.write().await;
        let before = state.items.len();
        state.items.retain(|item| item.record_id() != id);

        if state.items.len() < before {
            state.total_items = state.total_items.saturating_sub(1);
            state.total_pages = state
                .total_items
                .div_ceil(state.items_per_page as u64) as u32;
            if state.total_pages > 0 && state.current_page > state.total_pages {
                state.current_page = state.total_pages;
            }
        }

        self.selection.lock().await.remove(id);
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub async fn toggle_selection(&self, id: impl Into<String>) {
        self.selection.lock().await.toggle(id);
    }

    /// Replace the selection with exactly the given ids ("select all
    /// visible").
    pub async fn select_all<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.lock().await.select_all(ids);
    }

    pub async fn clear_selection(&self) {
        self.selection.lock().await.clear();
    }

    pub async fn is_selected(&self, id: &str) -> bool {
        self.selection.lock().await.is_selected(id)
    }

    pub async fn selected_ids(&self) -> Vec<String> {
        self.selection.lock().await.ids()
    }
}
