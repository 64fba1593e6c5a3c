use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use test_utils::comment_fixture;

use super::CommentClient;
use crate::domain::models::CommentScope;
use crate::domain::models::CreateCommentParams;
use crate::domain::models::Failure;
use crate::domain::models::ResourceClient;
use crate::domain::models::UpdateCommentParams;
use crate::domain::services::Gateway;

#[tokio::test]
async fn it_lists_comments_scoped_by_account_and_task() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/accounts/acc-1/tasks/t-1/comments")
        .with_status(200)
        .with_body(json!({ "data": [comment_fixture("c-1", "t-1", "First!")] }).to_string())
        .create();

    let client = CommentClient::new(Gateway::with_url(&server.url(), Some("abc")));
    let comments = client
        .list(&CommentScope::new("acc-1", "t-1"))
        .await?
        .into_items();

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "First!");
    assert_eq!(comments[0].task_id, "t-1");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_creates_updates_and_deletes_comments() -> Result<()> {
    let mut server = mockito::Server::new();
    let create = server
        .mock("POST", "/accounts/acc-1/tasks/t-1/comments")
        .match_body(Matcher::Json(json!({ "content": "Looks good" })))
        .with_status(201)
        .with_body(comment_fixture("c-1", "t-1", "Looks good").to_string())
        .create();
    let update = server
        .mock("PATCH", "/accounts/acc-1/tasks/t-1/comments/c-1")
        .match_body(Matcher::Json(json!({ "content": "Looks great" })))
        .with_status(200)
        .with_body(comment_fixture("c-1", "t-1", "Looks great").to_string())
        .create();
    let delete = server
        .mock("DELETE", "/accounts/acc-1/tasks/t-1/comments/c-1")
        .with_status(200)
        .with_body("{}")
        .create();

    let scope = CommentScope::new("acc-1", "t-1");
    let client = CommentClient::new(Gateway::with_url(&server.url(), Some("abc")));

    let created = client
        .create(
            &scope,
            CreateCommentParams {
                content: "Looks good".to_string(),
            },
        )
        .await?;
    assert_eq!(created.id, "c-1");

    let updated = client
        .update(
            &scope,
            "c-1",
            UpdateCommentParams {
                content: "Looks great".to_string(),
            },
        )
        .await?;
    assert_eq!(updated.content, "Looks great");

    client.delete(&scope, "c-1").await?;

    create.assert();
    update.assert();
    delete.assert();

    return Ok(());
}

#[tokio::test]
async fn it_requires_task_id_and_content() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", Matcher::Any).expect(0).create();
    let client = CommentClient::new(Gateway::with_url(&server.url(), Some("abc")));

    let res = client
        .create(
            &CommentScope::new("acc-1", ""),
            CreateCommentParams {
                content: "Hi".to_string(),
            },
        )
        .await;
    assert_eq!(res, Err(Failure::validation_gap("task_id")));

    let res = client
        .create(
            &CommentScope::new("acc-1", "t-1"),
            CreateCommentParams {
                content: "".to_string(),
            },
        )
        .await;
    assert_eq!(res, Err(Failure::validation_gap("content")));

    let res = client
        .update(
            &CommentScope::new("acc-1", "t-1"),
            " ",
            UpdateCommentParams {
                content: "Hi".to_string(),
            },
        )
        .await;
    assert_eq!(res, Err(Failure::validation_gap("comment_id")));

    mock.assert();
}

#[tokio::test]
async fn it_fails_decoding_unexpected_entity() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/accounts/acc-1/tasks/t-1/comments")
        .with_status(201)
        .with_body(r#"{"ok":true}"#)
        .create();

    let client = CommentClient::new(Gateway::with_url(&server.url(), None));
    let res = client
        .create(
            &CommentScope::new("acc-1", "t-1"),
            CreateCommentParams {
                content: "Hi".to_string(),
            },
        )
        .await;

    assert!(matches!(res, Err(Failure::Decode { .. })));
    mock.assert();
}
