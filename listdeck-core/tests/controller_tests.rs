//! Behavioral tests for the generic list controller, driven through the
//! scripted binding and recording gate from listdeck-test-utils.

use listdeck_core::{
    BindingError, ListController, Notification, NotificationLevel, RowPage, SortState,
};
use listdeck_test_utils::{
    drain_notifications, sample_row, sample_rows, status_dictionary, RecordingGate,
    ScriptedBinding,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

type Controller = ListController<ScriptedBinding>;

fn setup_with_gate(
    gate: RecordingGate,
) -> (
    Arc<Controller>,
    Arc<ScriptedBinding>,
    Arc<RecordingGate>,
    UnboundedReceiver<Notification>,
) {
    let binding = Arc::new(ScriptedBinding::new());
    let gate = Arc::new(gate);
    let (controller, notifications) = ListController::new(
        binding.clone(),
        Arc::new(status_dictionary()),
        gate.clone(),
    );
    (Arc::new(controller), binding, gate, notifications)
}

fn setup() -> (
    Arc<Controller>,
    Arc<ScriptedBinding>,
    Arc<RecordingGate>,
    UnboundedReceiver<Notification>,
) {
    setup_with_gate(RecordingGate::new())
}

fn levels(notifications: &[Notification]) -> Vec<NotificationLevel> {
    notifications.iter().map(|n| n.level).collect()
}

// ----------------------------------------------------------------------------
// Request construction scenarios
// ----------------------------------------------------------------------------

#[tokio::test]
async fn default_refresh_sends_documented_request() {
    let (controller, binding, _gate, _rx) = setup();

    controller.refresh().await.expect("refresh");

    let requests = binding.list_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        serde_json::to_value(&requests[0]).expect("json"),
        json!({
            "orderByColumn": "postSort",
            "isAsc": "ascending",
            "pageNum": 1,
            "pageSize": 10,
        })
    );
}

#[tokio::test]
async fn filter_plus_sort_click_builds_reset_request() {
    let (controller, binding, _gate, _rx) = setup();

    controller.set_filter(|filter| filter.status = Some(1));
    controller
        .on_sort_changed(Some(SortState::descending("createTime")))
        .await
        .expect("sort change");

    let request = &binding.list_requests()[0];
    assert_eq!(request.get("pageNum"), Some(&json!(1)));
    assert_eq!(request.get("orderByColumn"), Some(&json!("createTime")));
    assert_eq!(request.get("isAsc"), Some(&json!("descending")));
    assert_eq!(request.get("status"), Some(&json!(1)));
}

#[tokio::test]
async fn time_range_flows_into_list_requests() {
    let (controller, binding, _gate, _rx) = setup();

    controller.set_time_range(Some(("2026-03-01 00:00:00".into(), "2026-03-31 23:59:59".into())));
    controller.on_search_submit().await.expect("search");

    let request = &binding.list_requests()[0];
    assert_eq!(request.get("beginTime"), Some(&json!("2026-03-01 00:00:00")));
    assert_eq!(request.get("endTime"), Some(&json!("2026-03-31 23:59:59")));
}

// ----------------------------------------------------------------------------
// Pagination reset rules
// ----------------------------------------------------------------------------

#[tokio::test]
async fn sort_change_resets_page_before_the_fetch() {
    let (controller, binding, _gate, _rx) = setup();

    controller.on_page_changed(3).await.expect("page change");
    assert_eq!(binding.list_requests()[0].get("pageNum"), Some(&json!(3)));

    controller
        .on_sort_changed(Some(SortState::ascending("postName")))
        .await
        .expect("sort change");
    assert_eq!(binding.list_requests()[1].get("pageNum"), Some(&json!(1)));
}

#[tokio::test]
async fn filter_edit_resets_page_immediately() {
    let (controller, _binding, _gate, _rx) = setup();

    controller.on_page_changed(5).await.expect("page change");
    assert_eq!(controller.state().page.page_num, 5);

    // No fetch yet; the reset is visible as soon as the filter changes.
    controller.set_filter(|filter| filter.post_name = "alice".into());
    assert_eq!(controller.state().page.page_num, 1);
    assert_eq!(controller.state().query.filter.post_name, "alice");
}

#[tokio::test]
async fn page_only_changes_leave_filter_and_sort_alone() {
    let (controller, binding, _gate, _rx) = setup();

    controller.set_filter(|filter| filter.status = Some(1));
    controller
        .on_sort_changed(Some(SortState::descending("createTime")))
        .await
        .expect("sort change");

    controller.on_page_changed(2).await.expect("page change");
    controller.on_page_size_changed(50).await.expect("size change");

    let state = controller.state();
    assert_eq!(state.query.filter.status, Some(1));
    assert_eq!(
        state.sort,
        Some(SortState::descending("createTime"))
    );

    let last = binding.list_requests().pop().expect("request");
    assert_eq!(last.get("status"), Some(&json!(1)));
    assert_eq!(last.get("orderByColumn"), Some(&json!("createTime")));
    assert_eq!(last.get("pageSize"), Some(&json!(50)));
}

#[tokio::test]
async fn reset_restores_declared_defaults() {
    let (controller, binding, _gate, _rx) = setup();

    controller.set_filter(|filter| {
        filter.post_code = "X".into();
        filter.status = Some(0);
    });
    controller.set_time_range(Some(("a".into(), "b".into())));
    controller
        .on_sort_changed(Some(SortState::descending("createTime")))
        .await
        .expect("sort change");

    controller.on_reset().await.expect("reset");

    let request = binding.list_requests().pop().expect("request");
    assert_eq!(
        serde_json::to_value(&request).expect("json"),
        json!({
            "orderByColumn": "postSort",
            "isAsc": "ascending",
            "pageNum": 1,
            "pageSize": 10,
        })
    );
    assert_eq!(controller.state().query.time_range(), None);
}

// ----------------------------------------------------------------------------
// Fetch cycle: loading flag and response ordering
// ----------------------------------------------------------------------------

#[tokio::test]
async fn successful_refresh_replaces_rows_and_total() {
    let (controller, binding, _gate, _rx) = setup();
    binding.push_list_ok(sample_rows(3), 41);

    controller.refresh().await.expect("refresh");

    let state = controller.state();
    assert_eq!(state.rows.len(), 3);
    assert_eq!(state.page.total, 41);
    assert!(!state.loading);
}

#[tokio::test]
async fn loading_is_raised_while_a_fetch_is_in_flight() {
    let (controller, binding, _gate, _rx) = setup();
    let release = binding.push_list_hold();

    let task = tokio::spawn({
        let controller = controller.clone();
        async move { controller.refresh().await }
    });
    tokio::task::yield_now().await;
    assert!(controller.state().loading);

    release
        .send(Ok(RowPage {
            rows: sample_rows(1),
            total: 1,
        }))
        .expect("release fetch");
    task.await.expect("join").expect("refresh");
    assert!(!controller.state().loading);
}

#[tokio::test]
async fn failed_refresh_clears_loading_and_notifies() {
    let (controller, binding, _gate, mut rx) = setup();
    binding.push_list_err(BindingError::Transport("connection refused".into()));

    let result = controller.refresh().await;
    assert!(result.is_err());

    let state = controller.state();
    assert!(!state.loading);
    assert!(state.rows.is_empty());

    let notifications = drain_notifications(&mut rx);
    assert_eq!(levels(&notifications), vec![NotificationLevel::Error]);
    assert!(notifications[0].message.contains("connection refused"));
}

#[tokio::test]
async fn last_issued_refresh_wins_regardless_of_arrival_order() {
    let (controller, binding, _gate, _rx) = setup();
    let release_a = binding.push_list_hold();
    let release_b = binding.push_list_hold();

    let task_a = tokio::spawn({
        let controller = controller.clone();
        async move { controller.refresh().await }
    });
    tokio::task::yield_now().await;
    let task_b = tokio::spawn({
        let controller = controller.clone();
        async move { controller.refresh().await }
    });
    tokio::task::yield_now().await;

    // B (the newest request) resolves first; A resolves afterwards with
    // different data and must be discarded.
    release_b
        .send(Ok(RowPage {
            rows: sample_rows(2),
            total: 2,
        }))
        .expect("release b");
    task_b.await.expect("join").expect("refresh b");

    release_a
        .send(Ok(RowPage {
            rows: vec![sample_row(99)],
            total: 99,
        }))
        .expect("release a");
    task_a.await.expect("join").expect("refresh a");

    let state = controller.state();
    assert_eq!(state.rows, sample_rows(2));
    assert_eq!(state.page.total, 2);
    assert!(!state.loading);
}

#[tokio::test]
async fn superseded_failure_does_not_disturb_the_newer_fetch() {
    let (controller, binding, _gate, mut rx) = setup();
    let release_a = binding.push_list_hold();
    let release_b = binding.push_list_hold();

    let task_a = tokio::spawn({
        let controller = controller.clone();
        async move { controller.refresh().await }
    });
    tokio::task::yield_now().await;
    let task_b = tokio::spawn({
        let controller = controller.clone();
        async move { controller.refresh().await }
    });
    tokio::task::yield_now().await;

    // The stale fetch fails while the newer one is still out: loading
    // must stay up and no error notification may be emitted for it.
    release_a
        .send(Err(BindingError::Transport("stale failure".into())))
        .expect("release a");
    task_a.await.expect("join").expect("stale failure is swallowed");
    assert!(controller.state().loading);
    assert!(drain_notifications(&mut rx).is_empty());

    release_b
        .send(Ok(RowPage {
            rows: sample_rows(1),
            total: 1,
        }))
        .expect("release b");
    task_b.await.expect("join").expect("refresh b");
    assert!(!controller.state().loading);
    assert_eq!(controller.state().page.total, 1);
}

// ----------------------------------------------------------------------------
// Export
// ----------------------------------------------------------------------------

#[tokio::test]
async fn export_omits_pagination_and_keeps_scope() {
    let (controller, binding, _gate, _rx) = setup();

    controller.on_page_changed(5).await.expect("page change");
    controller.set_time_range(Some(("2026-01-01".into(), "2026-06-30".into())));

    controller.export_all("posts.xlsx").await.expect("export");

    let exports = binding.export_calls();
    assert_eq!(exports.len(), 1);
    let (request, file_name) = &exports[0];
    assert_eq!(file_name, "posts.xlsx");
    assert!(!request.contains("pageNum"));
    assert!(!request.contains("pageSize"));
    assert_eq!(request.get("beginTime"), Some(&json!("2026-01-01")));
    assert_eq!(request.get("orderByColumn"), Some(&json!("postSort")));
}

#[tokio::test]
async fn export_does_not_touch_result_state() {
    let (controller, binding, _gate, _rx) = setup();
    binding.push_list_ok(sample_rows(2), 2);
    controller.refresh().await.expect("refresh");

    let before = controller.state();
    controller.export_all("posts.xlsx").await.expect("export");
    let after = controller.state();

    assert_eq!(after.rows, before.rows);
    assert_eq!(after.page, before.page);
    assert!(!after.loading);
}

#[tokio::test]
async fn export_failure_surfaces_an_error_notification() {
    let (controller, binding, _gate, mut rx) = setup();
    binding.push_export_err(BindingError::Rejected {
        code: 500,
        message: "export queue full".into(),
    });

    let result = controller.export_all("posts.xlsx").await;
    assert!(result.is_err());

    let notifications = drain_notifications(&mut rx);
    assert_eq!(levels(&notifications), vec![NotificationLevel::Error]);
}

// ----------------------------------------------------------------------------
// Bulk delete protocol
// ----------------------------------------------------------------------------

#[tokio::test]
async fn empty_selection_warns_without_any_network_call() {
    let (controller, binding, gate, mut rx) = setup();
    binding.push_list_ok(sample_rows(2), 2);
    controller.refresh().await.expect("refresh");

    controller.delete_selected().await.expect("bulk delete");

    assert!(binding.remove_calls().is_empty());
    assert_eq!(binding.list_call_count(), 1);
    assert!(gate.requests().is_empty());
    assert_eq!(controller.state().rows, sample_rows(2));

    let notifications = drain_notifications(&mut rx);
    assert_eq!(levels(&notifications), vec![NotificationLevel::Warning]);
}

#[tokio::test]
async fn confirmed_bulk_delete_removes_then_refreshes() {
    let (controller, binding, gate, mut rx) = setup_with_gate(RecordingGate::confirming());

    controller.set_selection(vec![3, 7]);
    controller.delete_selected().await.expect("bulk delete");

    assert_eq!(binding.remove_calls(), vec![vec![3, 7]]);
    assert_eq!(binding.list_call_count(), 1);
    assert!(controller.state().selection.is_empty());

    let prompts = gate.requests();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].ids, vec![3, 7]);

    let notifications = drain_notifications(&mut rx);
    assert_eq!(levels(&notifications), vec![NotificationLevel::Success]);
    assert!(notifications[0].message.contains("3, 7"));
}

#[tokio::test]
async fn cancelled_bulk_delete_only_clears_selection() {
    let (controller, binding, _gate, mut rx) = setup_with_gate(RecordingGate::cancelling());
    binding.push_list_ok(sample_rows(3), 3);
    controller.refresh().await.expect("refresh");

    controller.set_selection(vec![1, 2]);
    controller.delete_selected().await.expect("bulk delete");

    assert!(binding.remove_calls().is_empty());
    assert_eq!(binding.list_call_count(), 1);
    assert_eq!(controller.state().rows, sample_rows(3));
    assert!(controller.state().selection.is_empty());

    let notifications = drain_notifications(&mut rx);
    assert_eq!(levels(&notifications), vec![NotificationLevel::Info]);
}

#[tokio::test]
async fn failed_bulk_delete_keeps_selection_and_skips_refresh() {
    let (controller, binding, _gate, mut rx) = setup_with_gate(RecordingGate::confirming());
    binding.push_remove_err(BindingError::Rejected {
        code: 601,
        message: "row already deleted".into(),
    });

    controller.set_selection(vec![4, 8]);
    let result = controller.delete_selected().await;
    assert!(result.is_err());

    assert_eq!(binding.remove_calls(), vec![vec![4, 8]]);
    assert_eq!(binding.list_call_count(), 0);
    assert_eq!(controller.state().selection.ids(), &[4, 8]);

    let notifications = drain_notifications(&mut rx);
    assert_eq!(levels(&notifications), vec![NotificationLevel::Error]);
}

#[tokio::test]
async fn single_row_delete_notifies_and_refreshes() {
    let (controller, binding, _gate, mut rx) = setup();

    controller.delete_one(&sample_row(12)).await.expect("delete");

    assert_eq!(binding.remove_calls(), vec![vec![12]]);
    assert_eq!(binding.list_call_count(), 1);

    let notifications = drain_notifications(&mut rx);
    assert_eq!(levels(&notifications), vec![NotificationLevel::Success]);
    assert!(notifications[0].message.contains("12"));
}

// ----------------------------------------------------------------------------
// Dictionary and observation
// ----------------------------------------------------------------------------

#[tokio::test]
async fn status_codes_resolve_through_the_injected_dictionary() {
    let (controller, _binding, _gate, _rx) = setup();

    assert_eq!(
        controller.status_entry(1).map(|e| e.label.as_str()),
        Some("Enabled")
    );
    assert_eq!(
        controller.status_entry(0).map(|e| e.css_tag.as_str()),
        Some("danger")
    );
    assert!(controller.status_entry(7).is_none());
}

#[tokio::test]
async fn subscribers_observe_refresh_results() {
    let (controller, binding, _gate, _rx) = setup();
    let mut watcher = controller.subscribe();
    binding.push_list_ok(sample_rows(2), 2);

    controller.refresh().await.expect("refresh");

    watcher.changed().await.expect("state change");
    let state = watcher.borrow_and_update();
    assert_eq!(state.rows.len(), 2);
}
