use custdesk::app::{App, AppAction, AppOptions};
use custdesk::modal::{ModalName, WorkflowInput};
use custdesk::remote::{ApiCall, CustomerRecord, InMemoryCustomerApi, InlineDispatch};
use custdesk::routing::DEFAULT_ROUTE;
use custdesk::shared::errors::RemoteError;
use custdesk::shared::ids::CustomerId;
use custdesk::shared::logging::{LogReporter, RecordingReporter};
use std::fs;

fn id(raw: &str) -> CustomerId {
    CustomerId::parse(raw).expect("customer id")
}

fn customer(raw_id: &str) -> CustomerRecord {
    CustomerRecord {
        id: id(raw_id),
        name: format!("customer {raw_id}"),
        email: format!("{raw_id}@example.com"),
    }
}

fn app_at(path: &str, api: &InMemoryCustomerApi, reporter: &RecordingReporter) -> App {
    App::new(
        AppOptions {
            initial_path: path.to_string(),
            surface_errors: false,
        },
        Box::new(reporter.clone()),
        Box::new(InlineDispatch::new(api.clone())),
    )
}

fn cached_ids(app: &App) -> Vec<String> {
    app.cache()
        .read_customers()
        .expect("customers cached")
        .iter()
        .map(|customer| customer.id.to_string())
        .collect()
}

#[test]
fn delete_workflow_module_removes_only_the_deleted_entry_and_returns_home() {
    let api = InMemoryCustomerApi::new(vec![customer("7"), customer("3")]);
    let reporter = RecordingReporter::new();
    let mut app = app_at("/7", &api, &reporter);
    app.bootstrap();
    app.pump();
    assert_eq!(cached_ids(&app), vec!["7", "3"]);

    app.handle_action(AppAction::OpenModal(ModalName::Delete));
    assert!(app.modals().is_open());
    app.handle_action(AppAction::Workflow(WorkflowInput::Activate));
    assert!(!app.modals().is_open(), "modal closes before the delete resolves");

    app.pump();
    assert_eq!(cached_ids(&app), vec!["3"]);
    assert_eq!(app.router().current_path(), DEFAULT_ROUTE);
    assert!(app.cache().read_customer(&id("7")).is_none());
    assert_eq!(
        api.calls(),
        vec![ApiCall::List, ApiCall::Delete(id("7"))]
    );
}

#[test]
fn delete_workflow_module_cancel_sends_nothing() {
    let api = InMemoryCustomerApi::new(vec![customer("7"), customer("3")]);
    let reporter = RecordingReporter::new();
    let mut app = app_at("/7", &api, &reporter);
    app.bootstrap();
    app.pump();

    app.handle_action(AppAction::OpenModal(ModalName::Delete));
    app.handle_action(AppAction::Workflow(WorkflowInput::FocusNext));
    app.handle_action(AppAction::Workflow(WorkflowInput::Activate));
    app.pump();

    assert!(!app.modals().is_open());
    assert_eq!(api.calls(), vec![ApiCall::List]);
    assert_eq!(cached_ids(&app), vec!["7", "3"]);
    assert_eq!(app.router().current_path(), "/7");

    app.handle_action(AppAction::OpenModal(ModalName::Delete));
    app.handle_action(AppAction::CloseModal);
    app.pump();
    assert_eq!(api.calls(), vec![ApiCall::List]);
}

#[test]
fn delete_workflow_module_swallows_cache_update_failure() {
    let api = InMemoryCustomerApi::new(vec![customer("7"), customer("3")]);
    let reporter = RecordingReporter::new();
    let mut app = app_at("/7", &api, &reporter);

    app.handle_action(AppAction::OpenModal(ModalName::Delete));
    app.handle_action(AppAction::Workflow(WorkflowInput::Activate));
    app.pump();

    assert_eq!(
        reporter.event_names(),
        vec!["cache_update_failed".to_string()]
    );
    assert_eq!(reporter.events()[0].level, "error");
    assert!(app.cache().read_customers().is_err());
    assert_eq!(app.router().current_path(), "/7");
    assert_eq!(api.customers(), vec![customer("3")], "server-side delete stands");
}

#[test]
fn delete_workflow_module_reports_mutation_failure_without_retry() {
    let api = InMemoryCustomerApi::new(vec![customer("7"), customer("3")]);
    let reporter = RecordingReporter::new();
    let mut app = app_at("/7", &api, &reporter);
    app.bootstrap();
    app.pump();
    api.fail_next("delete", RemoteError::WorkerStopped);

    app.handle_action(AppAction::OpenModal(ModalName::Delete));
    app.handle_action(AppAction::Workflow(WorkflowInput::Activate));
    app.pump();
    app.pump();

    assert_eq!(reporter.event_names(), vec!["delete_failed".to_string()]);
    assert_eq!(cached_ids(&app), vec!["7", "3"]);
    assert_eq!(
        api.calls()
            .iter()
            .filter(|call| matches!(call, ApiCall::Delete(_)))
            .count(),
        1
    );
}

#[test]
fn delete_workflow_module_logs_failures_as_json_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_path = dir.path().join("logs/custdesk.log");
    let api = InMemoryCustomerApi::new(vec![customer("7")]);
    let mut app = App::new(
        AppOptions {
            initial_path: "/7".to_string(),
            surface_errors: false,
        },
        Box::new(LogReporter::new(Some(log_path.clone()))),
        Box::new(InlineDispatch::new(api)),
    );

    app.handle_action(AppAction::OpenModal(ModalName::Delete));
    app.handle_action(AppAction::Workflow(WorkflowInput::Activate));
    app.pump();

    let raw = fs::read_to_string(&log_path).expect("read log");
    let entry: serde_json::Value =
        serde_json::from_str(raw.lines().next().expect("one line")).expect("json");
    assert_eq!(entry["event"], "cache_update_failed");
    assert_eq!(entry["level"], "error");
}
