//! The capability interface a resource supplies to the controller.

use crate::error::BindingError;
use crate::request::ListRequest;
use crate::sort::SortState;
use async_trait::async_trait;
use serde::Serialize;

/// Primary key of a row, as assigned by the server.
pub type RowId = i64;

/// A row the controller can identify for selection and deletion.
pub trait ListRow {
    fn row_id(&self) -> RowId;
}

/// One page of rows plus the total count of the matching set.
#[derive(Debug, Clone, PartialEq)]
pub struct RowPage<R> {
    pub rows: Vec<R>,
    pub total: u64,
}

/// Resource-level constants the controller needs: a human-readable label
/// for notifications, the declared default sort, and the dictionary key
/// used to resolve row status codes.
#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
    pub label: String,
    pub default_sort: SortState,
    pub dictionary_key: String,
}

impl ResourceDescriptor {
    pub fn new(
        label: impl Into<String>,
        default_sort: SortState,
        dictionary_key: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            default_sort,
            dictionary_key: dictionary_key.into(),
        }
    }
}

/// Everything resource-specific about a list screen: the filter and row
/// types, the declared defaults, and the three endpoint calls. One
/// implementation per resource; the controller supplies the rest.
#[async_trait]
pub trait ResourceBinding: Send + Sync + 'static {
    type Filter: Serialize + Clone + Default + PartialEq + Send + Sync + 'static;
    type Row: ListRow + Clone + Send + Sync + 'static;

    fn descriptor(&self) -> &ResourceDescriptor;

    /// Fetch one page of rows. Fails as a whole on any non-success
    /// outcome; there is no partial-success shape.
    async fn list(&self, request: &ListRequest) -> Result<RowPage<Self::Row>, BindingError>;

    /// Delete the given rows as one batch. Not guaranteed idempotent; any
    /// error means the whole batch must be treated as failed.
    async fn remove(&self, ids: &[RowId]) -> Result<(), BindingError>;

    /// Ask the server to produce a file for the full matching set. The
    /// download itself is a transport side effect; nothing is returned to
    /// the controller.
    async fn export(&self, request: &ListRequest, file_name: &str) -> Result<(), BindingError>;
}
