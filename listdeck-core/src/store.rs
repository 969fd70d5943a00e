//! Observable state store.
//!
//! The controller owns the authoritative [`ListState`] and publishes a
//! fresh snapshot after every mutation through a `tokio::sync::watch`
//! channel. A view subscribes once and re-renders whenever the receiver
//! reports a change; no rendering framework is assumed.

use crate::page::PageState;
use crate::query::QueryState;
use crate::selection::SelectionSet;
use crate::sort::SortState;
use tokio::sync::watch;

/// Complete state of one list screen.
#[derive(Debug, Clone)]
pub struct ListState<F, R> {
    pub query: QueryState<F>,
    pub sort: Option<SortState>,
    pub page: PageState,
    pub rows: Vec<R>,
    pub loading: bool,
    pub selection: SelectionSet,
}

pub struct ListStore<F, R> {
    tx: watch::Sender<ListState<F, R>>,
}

impl<F, R> ListStore<F, R>
where
    F: Clone,
    R: Clone,
{
    pub fn new(initial: ListState<F, R>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Subscribe to state snapshots. The receiver immediately sees the
    /// current state and is notified on every mutation.
    pub fn subscribe(&self) -> watch::Receiver<ListState<F, R>> {
        self.tx.subscribe()
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> ListState<F, R> {
        self.tx.borrow().clone()
    }

    /// Mutate the state in place and publish the result to subscribers.
    pub fn update<T>(&self, mutate: impl FnOnce(&mut ListState<F, R>) -> T) -> T {
        let mut result = None;
        self.tx.send_modify(|state| result = Some(mutate(state)));
        match result {
            Some(value) => value,
            None => unreachable!("watch::Sender::send_modify always runs the closure"),
        }
    }
}
