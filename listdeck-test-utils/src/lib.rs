//! Test infrastructure for the listdeck workspace:
//! - a scripted [`ResourceBinding`] whose list calls can be held open so
//!   tests control response arrival order,
//! - a recording [`ConfirmGate`] with scripted decisions,
//! - sample rows/filters shaped like the post resource,
//! - helpers for draining the controller's notification channel.

use async_trait::async_trait;
use listdeck_core::{
    BindingError, ConfirmGate, ConfirmRequest, Decision, DictEntry, Dictionary, ListRequest,
    ListRow, Notification, ResourceBinding, ResourceDescriptor, RowId, RowPage, SortState,
};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::{mpsc, oneshot};

// ============================================================================
// SAMPLE RESOURCE SHAPES
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleFilter {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub post_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub post_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleRow {
    pub post_id: RowId,
    pub post_name: String,
    pub status: i64,
}

impl ListRow for SampleRow {
    fn row_id(&self) -> RowId {
        self.post_id
    }
}

pub fn sample_row(post_id: RowId) -> SampleRow {
    SampleRow {
        post_id,
        post_name: format!("post-{post_id}"),
        status: 1,
    }
}

pub fn sample_rows(count: usize) -> Vec<SampleRow> {
    (1..=count as RowId).map(sample_row).collect()
}

pub fn sample_descriptor() -> ResourceDescriptor {
    ResourceDescriptor::new("post", SortState::ascending("postSort"), "common.status")
}

pub fn status_dictionary() -> Dictionary {
    let mut dictionary = Dictionary::new();
    dictionary.insert(
        "common.status",
        0,
        DictEntry {
            label: "Disabled".into(),
            css_tag: "danger".into(),
        },
    );
    dictionary.insert(
        "common.status",
        1,
        DictEntry {
            label: "Enabled".into(),
            css_tag: "success".into(),
        },
    );
    dictionary
}

// ============================================================================
// SCRIPTED BINDING
// ============================================================================

type ListResult = Result<RowPage<SampleRow>, BindingError>;

enum ListScript {
    Ready(ListResult),
    /// Suspends the list call until the paired sender resolves it.
    Hold(oneshot::Receiver<ListResult>),
}

/// A [`ResourceBinding`] driven by queued outcomes.
///
/// Unscripted calls succeed with an empty page (list) or `Ok(())`
/// (remove/export), so simple tests only script what they assert on.
/// Every call is recorded with its request for later inspection.
pub struct ScriptedBinding {
    descriptor: ResourceDescriptor,
    list_script: Mutex<VecDeque<ListScript>>,
    remove_script: Mutex<VecDeque<Result<(), BindingError>>>,
    export_script: Mutex<VecDeque<Result<(), BindingError>>>,
    list_requests: Mutex<Vec<ListRequest>>,
    remove_calls: Mutex<Vec<Vec<RowId>>>,
    export_calls: Mutex<Vec<(ListRequest, String)>>,
}

impl ScriptedBinding {
    pub fn new() -> Self {
        Self {
            descriptor: sample_descriptor(),
            list_script: Mutex::new(VecDeque::new()),
            remove_script: Mutex::new(VecDeque::new()),
            export_script: Mutex::new(VecDeque::new()),
            list_requests: Mutex::new(Vec::new()),
            remove_calls: Mutex::new(Vec::new()),
            export_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_list_ok(&self, rows: Vec<SampleRow>, total: u64) {
        self.list_script
            .lock()
            .expect("list script lock")
            .push_back(ListScript::Ready(Ok(RowPage { rows, total })));
    }

    pub fn push_list_err(&self, err: BindingError) {
        self.list_script
            .lock()
            .expect("list script lock")
            .push_back(ListScript::Ready(Err(err)));
    }

    /// Queue a list call that blocks until the returned sender resolves
    /// it. Lets a test start fetch A, start fetch B, then decide which
    /// response arrives first.
    pub fn push_list_hold(&self) -> oneshot::Sender<ListResult> {
        let (tx, rx) = oneshot::channel();
        self.list_script
            .lock()
            .expect("list script lock")
            .push_back(ListScript::Hold(rx));
        tx
    }

    pub fn push_remove_err(&self, err: BindingError) {
        self.remove_script
            .lock()
            .expect("remove script lock")
            .push_back(Err(err));
    }

    pub fn push_export_err(&self, err: BindingError) {
        self.export_script
            .lock()
            .expect("export script lock")
            .push_back(Err(err));
    }

    pub fn list_requests(&self) -> Vec<ListRequest> {
        self.list_requests.lock().expect("request log lock").clone()
    }

    pub fn list_call_count(&self) -> usize {
        self.list_requests.lock().expect("request log lock").len()
    }

    pub fn remove_calls(&self) -> Vec<Vec<RowId>> {
        self.remove_calls.lock().expect("remove log lock").clone()
    }

    pub fn export_calls(&self) -> Vec<(ListRequest, String)> {
        self.export_calls.lock().expect("export log lock").clone()
    }
}

impl Default for ScriptedBinding {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceBinding for ScriptedBinding {
    type Filter = SampleFilter;
    type Row = SampleRow;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    async fn list(&self, request: &ListRequest) -> ListResult {
        self.list_requests
            .lock()
            .expect("request log lock")
            .push(request.clone());
        let script = self
            .list_script
            .lock()
            .expect("list script lock")
            .pop_front();
        match script {
            Some(ListScript::Ready(result)) => result,
            Some(ListScript::Hold(rx)) => rx.await.unwrap_or_else(|_| {
                Err(BindingError::Transport("held list call dropped".into()))
            }),
            None => Ok(RowPage {
                rows: Vec::new(),
                total: 0,
            }),
        }
    }

    async fn remove(&self, ids: &[RowId]) -> Result<(), BindingError> {
        self.remove_calls
            .lock()
            .expect("remove log lock")
            .push(ids.to_vec());
        self.remove_script
            .lock()
            .expect("remove script lock")
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn export(&self, request: &ListRequest, file_name: &str) -> Result<(), BindingError> {
        self.export_calls
            .lock()
            .expect("export log lock")
            .push((request.clone(), file_name.to_string()));
        self.export_script
            .lock()
            .expect("export script lock")
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

// ============================================================================
// RECORDING CONFIRMATION GATE
// ============================================================================

/// A [`ConfirmGate`] that records every prompt and answers from a
/// scripted queue (default answer: [`Decision::Cancelled`]).
pub struct RecordingGate {
    decisions: Mutex<VecDeque<Decision>>,
    requests: Mutex<Vec<ConfirmRequest>>,
}

impl RecordingGate {
    pub fn new() -> Self {
        Self {
            decisions: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn confirming() -> Self {
        let gate = Self::new();
        gate.push_decision(Decision::Confirmed);
        gate
    }

    pub fn cancelling() -> Self {
        let gate = Self::new();
        gate.push_decision(Decision::Cancelled);
        gate
    }

    pub fn push_decision(&self, decision: Decision) {
        self.decisions
            .lock()
            .expect("decision lock")
            .push_back(decision);
    }

    pub fn requests(&self) -> Vec<ConfirmRequest> {
        self.requests.lock().expect("prompt log lock").clone()
    }
}

impl Default for RecordingGate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfirmGate for RecordingGate {
    async fn confirm(&self, request: ConfirmRequest) -> Decision {
        self.requests
            .lock()
            .expect("prompt log lock")
            .push(request);
        self.decisions
            .lock()
            .expect("decision lock")
            .pop_front()
            .unwrap_or(Decision::Cancelled)
    }
}

// ============================================================================
// NOTIFICATION HELPERS
// ============================================================================

/// Pull everything currently buffered on the notification channel.
pub fn drain_notifications(rx: &mut mpsc::UnboundedReceiver<Notification>) -> Vec<Notification> {
    let mut drained = Vec::new();
    while let Ok(notification) = rx.try_recv() {
        drained.push(notification);
    }
    drained
}
