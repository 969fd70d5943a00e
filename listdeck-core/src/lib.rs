//! Generic list-resource controller for admin console screens.
//!
//! Every admin list screen has the same lifecycle: a filter form, a
//! sortable paginated table, row selection, bulk delete behind a
//! confirmation, and a full-scope export. [`ListController`] implements
//! that lifecycle once, parameterized by a [`ResourceBinding`] that
//! supplies the resource-specific list/remove/export calls and defaults.
//!
//! The controller is UI-agnostic: it publishes [`ListState`] snapshots
//! through a `tokio::sync::watch` channel and emits [`Notification`]s
//! through an mpsc channel; any view layer can subscribe to both.

pub mod binding;
pub mod confirm;
pub mod controller;
pub mod dictionary;
pub mod error;
pub mod notifications;
pub mod page;
pub mod query;
pub mod request;
pub mod selection;
pub mod sort;
pub mod store;

pub use binding::{ListRow, ResourceBinding, ResourceDescriptor, RowId, RowPage};
pub use confirm::{ConfirmGate, ConfirmRequest, Decision};
pub use controller::ListController;
pub use dictionary::{DictEntry, Dictionary};
pub use error::{BindingError, ControllerError};
pub use notifications::{Notification, NotificationLevel};
pub use page::{PageSnapshot, PageState, DEFAULT_PAGE_SIZE};
pub use query::QueryState;
pub use request::{build_request, ListRequest};
pub use selection::SelectionSet;
pub use sort::{SortDirection, SortState};
pub use store::{ListState, ListStore};
