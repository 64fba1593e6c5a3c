use anyhow::Result;

use super::Author;
use super::ConversationMessage;
use super::MessageKind;

#[test]
fn it_executes_new() {
    let msg = ConversationMessage::new(3, Author::User, "Show me my tasks");
    assert_eq!(msg.id, 3);
    assert_eq!(msg.sender, Author::User);
    assert_eq!(msg.text, "Show me my tasks");
    assert_eq!(msg.kind, None);
    assert!(!msg.is_error());
}

#[test]
fn it_executes_new_with_kind() {
    let msg = ConversationMessage::new_with_kind(
        2,
        Author::Assistant,
        Some(MessageKind::Error),
        "It broke!",
    );
    assert_eq!(msg.kind, Some(MessageKind::Error));
    assert!(msg.is_error());
}

#[test]
fn it_parses_kinds() {
    assert_eq!(MessageKind::parse("greeting"), Some(MessageKind::Greeting));
    assert_eq!(MessageKind::parse("error"), Some(MessageKind::Error));
    assert_eq!(
        MessageKind::parse("task_list"),
        Some(MessageKind::Other("task_list".to_string()))
    );
    assert_eq!(MessageKind::parse("  "), None);
}

#[test]
fn it_renders_assistant_markup() {
    let msg = ConversationMessage::new(2, Author::Assistant, "**Commands**\n- list");
    insta::assert_snapshot!(msg.render(), @"<strong>Commands</strong><br/>- list");
}

#[test]
fn it_renders_user_text_verbatim() {
    let msg = ConversationMessage::new(2, Author::User, "**not bold**\nplease");
    assert_eq!(msg.render(), "**not bold**\nplease");
}

#[test]
fn it_serializes_kind_as_string() -> Result<()> {
    let msg = ConversationMessage::new_with_kind(
        1,
        Author::Assistant,
        Some(MessageKind::Greeting),
        "Hi",
    );
    let value = serde_json::to_value(&msg)?;
    assert_eq!(value["kind"], "greeting");
    assert_eq!(value["sender"], "assistant");

    let back: ConversationMessage = serde_json::from_value(value)?;
    assert_eq!(back.kind, Some(MessageKind::Greeting));

    return Ok(());
}
