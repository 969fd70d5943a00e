//! The generic list-resource controller.

use crate::binding::{ListRow, ResourceBinding, ResourceDescriptor, RowId};
use crate::confirm::{ConfirmGate, ConfirmRequest, Decision};
use crate::dictionary::{DictEntry, Dictionary};
use crate::error::ControllerError;
use crate::notifications::Notification;
use crate::page::PageState;
use crate::query::QueryState;
use crate::request::build_request;
use crate::selection::SelectionSet;
use crate::sort::SortState;
use crate::store::{ListState, ListStore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

/// One controller instance per resource screen.
///
/// All methods take `&self`; overlapping in-flight fetches are expected
/// (the UI stays interactive while a request is out) and are serialized
/// by a monotonically increasing sequence number: a response is applied
/// only while its sequence number is still the newest issued, so the last
/// request always wins and a superseded response can never overwrite
/// fresher state.
pub struct ListController<B: ResourceBinding> {
    binding: Arc<B>,
    dictionary: Arc<Dictionary>,
    confirm: Arc<dyn ConfirmGate>,
    notifier: mpsc::UnboundedSender<Notification>,
    store: ListStore<B::Filter, B::Row>,
    seq: AtomicU64,
}

impl<B: ResourceBinding> ListController<B> {
    /// Build a controller and the notification stream its view drains.
    ///
    /// The initial state uses the binding's declared default sort, page 1
    /// with the default page size, and an empty result set; the embedding
    /// view issues the first [`refresh`](Self::refresh) itself.
    pub fn new(
        binding: Arc<B>,
        dictionary: Arc<Dictionary>,
        confirm: Arc<dyn ConfirmGate>,
    ) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let initial = ListState {
            query: QueryState::default(),
            sort: Some(binding.descriptor().default_sort.clone()),
            page: PageState::new(),
            rows: Vec::new(),
            loading: false,
            selection: SelectionSet::new(),
        };
        let (notifier, notifications) = mpsc::unbounded_channel();
        let controller = Self {
            binding,
            dictionary,
            confirm,
            notifier,
            store: ListStore::new(initial),
            seq: AtomicU64::new(0),
        };
        (controller, notifications)
    }

    pub fn descriptor(&self) -> &ResourceDescriptor {
        self.binding.descriptor()
    }

    /// Subscribe to state snapshots; see [`ListStore::subscribe`].
    pub fn subscribe(&self) -> watch::Receiver<ListState<B::Filter, B::Row>> {
        self.store.subscribe()
    }

    pub fn state(&self) -> ListState<B::Filter, B::Row> {
        self.store.snapshot()
    }

    /// Resolve a row status code against the resource's dictionary.
    pub fn status_entry(&self, code: i64) -> Option<&DictEntry> {
        self.dictionary
            .entry(&self.binding.descriptor().dictionary_key, code)
    }

    /// Replace the selection with what the view currently has checked.
    pub fn set_selection(&self, ids: Vec<RowId>) {
        self.store.update(|state| state.selection.replace(ids));
    }

    /// Edit the filter form. Any filter change invalidates prior page
    /// offsets, so the page index snaps back to 1; no fetch is issued
    /// until the user submits the search.
    pub fn set_filter(&self, edit: impl FnOnce(&mut B::Filter)) {
        self.store.update(|state| {
            edit(&mut state.query.filter);
            state.page.reset();
        });
    }

    /// Set or clear the creation-time window. Resets the page index like
    /// any other filter change.
    pub fn set_time_range(&self, range: Option<(String, String)>) {
        self.store.update(|state| {
            state.query.set_time_range(range);
            state.page.reset();
        });
    }

    /// Execute one list fetch for the current query/sort/page state.
    ///
    /// `loading` is raised synchronously before the request leaves, and is
    /// cleared by whichever fetch holds the newest sequence number when it
    /// settles, success or failure. A fetch that was superseded while in
    /// flight leaves the state completely untouched.
    pub async fn refresh(&self) -> Result<(), ControllerError> {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let request = self.store.update(|state| {
            state.loading = true;
            build_request(&state.query, state.sort.as_ref(), Some(state.page.snapshot()))
        })?;
        debug!(seq, resource = %self.descriptor().label, "issuing list fetch");

        match self.binding.list(&request).await {
            Ok(page) => {
                let applied = self.store.update(|state| {
                    if seq != self.seq.load(Ordering::SeqCst) {
                        return false;
                    }
                    state.rows = page.rows;
                    state.page.total = page.total;
                    state.loading = false;
                    true
                });
                if applied {
                    debug!(seq, "applied list response");
                } else {
                    debug!(seq, "discarded superseded list response");
                }
                Ok(())
            }
            Err(err) => {
                let newest = self.store.update(|state| {
                    if seq != self.seq.load(Ordering::SeqCst) {
                        return false;
                    }
                    state.loading = false;
                    true
                });
                if !newest {
                    debug!(seq, "discarded superseded list failure");
                    return Ok(());
                }
                warn!(seq, error = %err, "list fetch failed");
                self.notify(Notification::error(format!(
                    "Failed to load {} list: {err}",
                    self.descriptor().label
                )));
                Err(err.into())
            }
        }
    }

    /// A table sort click. `None` means the column reported direction
    /// "none". A new sort invalidates prior page offsets.
    pub async fn on_sort_changed(&self, sort: Option<SortState>) -> Result<(), ControllerError> {
        self.store.update(|state| {
            state.sort = sort;
            state.page.reset();
        });
        self.refresh().await
    }

    pub async fn on_page_changed(&self, page_num: u64) -> Result<(), ControllerError> {
        self.store.update(|state| state.page.set_page_num(page_num));
        self.refresh().await
    }

    pub async fn on_page_size_changed(&self, page_size: u64) -> Result<(), ControllerError> {
        self.store.update(|state| state.page.set_page_size(page_size));
        self.refresh().await
    }

    /// Explicit search submit from the filter form.
    pub async fn on_search_submit(&self) -> Result<(), ControllerError> {
        self.store.update(|state| state.page.reset());
        self.refresh().await
    }

    /// Reset the form: default filter, no time window, the resource's
    /// declared default sort, page 1. Then fetch.
    pub async fn on_reset(&self) -> Result<(), ControllerError> {
        let default_sort = self.descriptor().default_sort.clone();
        self.store.update(|state| {
            state.query = QueryState::default();
            state.sort = Some(default_sort);
            state.page.reset();
        });
        self.refresh().await
    }

    /// Delete a single row. Destructive but scoped, so no confirmation.
    pub async fn delete_one(&self, row: &B::Row) -> Result<(), ControllerError> {
        let id = row.row_id();
        match self.binding.remove(&[id]).await {
            Ok(()) => {
                self.notify(Notification::success(format!(
                    "Deleted {} {id}",
                    self.descriptor().label
                )));
                self.refresh().await
            }
            Err(err) => {
                warn!(id, error = %err, "single-row delete failed");
                self.notify(Notification::error(format!(
                    "Failed to delete {} {id}: {err}",
                    self.descriptor().label
                )));
                Err(err.into())
            }
        }
    }

    /// Bulk delete behind the confirmation gate.
    ///
    /// Empty selection is a local warning and performs no network call.
    /// On cancel, the selection is cleared and nothing else changes. On a
    /// failed delete the selection is left exactly as it was.
    pub async fn delete_selected(&self) -> Result<(), ControllerError> {
        let ids = self.store.snapshot().selection.ids().to_vec();
        if ids.is_empty() {
            self.notify(Notification::warning("Select the rows to delete first"));
            return Ok(());
        }

        let label = self.descriptor().label.clone();
        let request = ConfirmRequest {
            title: "Confirm deletion".to_string(),
            message: format!(
                "Delete {} {label} row(s) with ids [{}]?",
                ids.len(),
                join_ids(&ids)
            ),
            ids: ids.clone(),
        };

        match self.confirm.confirm(request).await {
            Decision::Confirmed => match self.binding.remove(&ids).await {
                Ok(()) => {
                    self.notify(Notification::success(format!(
                        "Deleted {label} rows [{}]",
                        join_ids(&ids)
                    )));
                    self.store.update(|state| state.selection.clear());
                    self.refresh().await
                }
                Err(err) => {
                    warn!(error = %err, "bulk delete failed");
                    self.notify(Notification::error(format!(
                        "Failed to delete {label} rows: {err}"
                    )));
                    Err(err.into())
                }
            },
            Decision::Cancelled => {
                self.notify(Notification::info("Deletion cancelled"));
                self.store.update(|state| state.selection.clear());
                Ok(())
            }
        }
    }

    /// Export the full matching set for the current filter and sort,
    /// ignoring on-screen pagination. Never touches rows, loading, or the
    /// page state.
    pub async fn export_all(&self, file_name: &str) -> Result<(), ControllerError> {
        let state = self.store.snapshot();
        let request = build_request(&state.query, state.sort.as_ref(), None)?;
        match self.binding.export(&request, file_name).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(file_name, error = %err, "export failed");
                self.notify(Notification::error(format!(
                    "Failed to export {}: {err}",
                    self.descriptor().label
                )));
                Err(err.into())
            }
        }
    }

    fn notify(&self, notification: Notification) {
        // The view may have dropped its receiver during teardown.
        let _ = self.notifier.send(notification);
    }
}

fn join_ids(ids: &[RowId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
