use anyhow::Result;
use serde_json::json;
use test_utils::task_fixture;

use super::build;
use super::explain;
use super::format_comment;
use super::format_task;
use super::login_credential;
use super::progress_label;
use super::with_progress;
use crate::domain::models::Comment;
use crate::domain::models::Failure;
use crate::domain::models::CreateTaskParams;
use crate::domain::models::Task;
use crate::domain::models::TaskScope;
use crate::domain::services::Gateway;
use crate::domain::services::Refetch;
use crate::domain::services::TaskClient;
use crate::domain::services::TaskStore;

#[test]
fn it_builds_a_valid_command() {
    build().debug_assert();
}

#[test]
fn it_formats_tasks() {
    let mut task = Task {
        id: "t-1".to_string(),
        account_id: "acc-1".to_string(),
        title: "Ship it".to_string(),
        description: "Cut the release\nthen announce".to_string(),
        active: true,
        ..Task::default()
    };
    assert_eq!(format_task(&task), "- (ID: t-1) Ship it [active], Cut the release");

    task.active = false;
    task.description = "".to_string();
    assert_eq!(format_task(&task), "- (ID: t-1) Ship it [done]");
}

#[test]
fn it_truncates_long_task_descriptions() {
    let task = Task {
        id: "t-1".to_string(),
        title: "Long".to_string(),
        description: "x".repeat(100),
        active: true,
        ..Task::default()
    };
    let res = format_task(&task);
    assert!(res.ends_with(&format!("{}...", "x".repeat(67))));
}

#[test]
fn it_formats_comments() {
    let mut comment = Comment {
        id: "c-1".to_string(),
        task_id: "t-1".to_string(),
        account_id: "acc-1".to_string(),
        content: "Looks good".to_string(),
        created_at: "2024-01-02T10:00:00Z".to_string(),
        ..Comment::default()
    };
    assert_eq!(
        format_comment(&comment),
        "- (ID: c-1) 2024-01-02T10:00:00Z, Looks good"
    );

    comment.created_at = "".to_string();
    assert_eq!(format_comment(&comment), "- (ID: c-1), Looks good");
}

#[test]
fn it_requires_a_task_for_comments() {
    let res = build().try_get_matches_from(vec!["taskdesk", "comments", "list"]);
    if std::env::var("TASKDESK_TASK_ID").is_err() {
        assert!(res.is_err());
    }
}

#[test]
fn it_parses_delete_with_yes() -> Result<()> {
    let matches =
        build().try_get_matches_from(vec!["taskdesk", "tasks", "delete", "--id", "t-1", "--yes"])?;
    let (_, tasks_matches) = matches.subcommand().unwrap();
    let (name, delete_matches) = tasks_matches.subcommand().unwrap();
    assert_eq!(name, "delete");
    assert_eq!(delete_matches.get_one::<String>("id").unwrap(), "t-1");
    assert!(delete_matches.get_flag("yes"));

    return Ok(());
}

#[test]
fn it_accepts_global_args_after_subcommands() -> Result<()> {
    let matches = build().try_get_matches_from(vec![
        "taskdesk",
        "tasks",
        "list",
        "--account-id",
        "acc-2",
    ])?;
    let (_, tasks_matches) = matches.subcommand().unwrap();
    assert_eq!(
        tasks_matches.get_one::<String>("account-id").unwrap(),
        "acc-2"
    );

    return Ok(());
}

#[test]
fn it_labels_store_progress() {
    assert_eq!(progress_label(false, false), None);
    assert_eq!(progress_label(true, false), Some("Loading..."));
    assert_eq!(progress_label(false, true), Some("Saving..."));
    assert_eq!(progress_label(true, true), Some("Saving..."));
}

#[test]
fn it_hints_login_on_rejected_token() {
    let res = explain(Failure::server(401, "Unauthorized")).to_string();
    assert!(res.starts_with("Server responded with status 401: Unauthorized"));
    assert!(res.contains("taskdesk auth login --token <TOKEN>"));

    let res = explain(Failure::server(403, "Forbidden")).to_string();
    assert!(res.contains("auth login"));

    let res = explain(Failure::server(500, "Boom")).to_string();
    assert_eq!(res, "Server responded with status 500: Boom");
    assert!(!explain(Failure::transport("offline"))
        .to_string()
        .contains("auth login"));
}

#[test]
fn it_stamps_login_credentials() {
    let credential = login_credential("  abc123 \n");
    assert_eq!(credential.token, "abc123");
    assert!(credential
        .metadata
        .get("saved_at")
        .and_then(|e| return e.as_str())
        .is_some());
}

#[tokio::test]
async fn it_runs_store_operations_with_progress() -> Result<()> {
    let mut server = mockito::Server::new();
    let create_mock = server
        .mock("POST", "/accounts/acc-1/tasks")
        .with_status(201)
        .with_body(task_fixture("1", "One").to_string())
        .create();
    let list_mock = server
        .mock("GET", "/accounts/acc-1/tasks")
        .with_status(200)
        .with_body(json!([task_fixture("1", "One")]).to_string())
        .create();

    let store = TaskStore::new(
        TaskClient::new(Gateway::with_url(&server.url(), Some("abc"))),
        TaskScope::new("acc-1"),
    );
    let params = CreateTaskParams {
        title: "One".to_string(),
        description: "One description".to_string(),
    };
    let res = with_progress(&store, store.create(params)).await;

    assert_eq!(res, Ok(Refetch::Done));
    let snapshot = store.snapshot();
    assert_eq!(snapshot.items.len(), 1);
    assert!(!snapshot.is_loading);
    assert!(!snapshot.is_saving());
    create_mock.assert();
    list_mock.assert();

    return Ok(());
}
