//! Confirmation gate for destructive bulk actions.

use crate::binding::RowId;
use async_trait::async_trait;

/// What the user is asked to confirm, including the full id list so the
/// prompt can show exactly which rows are affected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub ids: Vec<RowId>,
}

/// Outcome of a confirmation prompt. Cancelling is a normal branch, not
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Cancelled,
}

/// Presents a blocking confirmation to the user. Blocking from the UI's
/// perspective; asynchronous from the controller's.
#[async_trait]
pub trait ConfirmGate: Send + Sync {
    async fn confirm(&self, request: ConfirmRequest) -> Decision;
}
