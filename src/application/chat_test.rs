use async_trait::async_trait;
use yansi::Paint;

use super::dispatch;
use super::format_quick_actions;
use super::phase_label;
use super::pick_quick_action;
use super::to_terminal;
use crate::domain::models::Author;
use crate::domain::models::ChatbotResponse;
use crate::domain::models::ConversationClient;
use crate::domain::models::ConversationMessage;
use crate::domain::models::ConversationPhase;
use crate::domain::models::Failure;
use crate::domain::models::QUICK_ACTIONS;
use crate::domain::services::ConversationSession;

struct EchoClient {}

#[async_trait]
impl ConversationClient for EchoClient {
    async fn query(&self, text: &str) -> Result<ChatbotResponse, Failure> {
        return Ok(ChatbotResponse {
            success: true,
            response: Some(format!("echo: {text}")),
            ..ChatbotResponse::default()
        });
    }
}

#[test]
fn it_converts_breaks_to_newlines() {
    Paint::disable();
    assert_eq!(to_terminal("one<br/>two<br/>three"), "one\ntwo\nthree");
}

#[test]
fn it_strips_strong_tags() {
    Paint::disable();
    let res = to_terminal("<strong>Tasks</strong><br/>- a <strong>b</strong>");
    assert!(!res.contains("<strong>"));
    assert!(!res.contains("</strong>"));
    assert!(res.contains("Tasks\n- a "));
}

#[test]
fn it_numbers_quick_actions() {
    let res = format_quick_actions(&QUICK_ACTIONS);
    assert_eq!(
        res,
        "  1. 📊 My Tasks\n  2. ✅ Completed\n  3. ⏳ Pending\n  4. ❓ Help"
    );
}

#[test]
fn it_picks_quick_actions_by_number() {
    assert_eq!(
        pick_quick_action("4", &QUICK_ACTIONS).map(|e| return e.query),
        Some("help")
    );
    assert_eq!(
        pick_quick_action(" 1 ", &QUICK_ACTIONS).map(|e| return e.query),
        Some("Show me my tasks")
    );
    assert_eq!(pick_quick_action("0", &QUICK_ACTIONS), None);
    assert_eq!(pick_quick_action("5", &QUICK_ACTIONS), None);
    assert_eq!(pick_quick_action("help", &QUICK_ACTIONS), None);
    assert_eq!(pick_quick_action("1", &[]), None);
}

#[test]
fn it_labels_phases_while_waiting_for_a_reply() {
    let asked = ConversationMessage::new(2, Author::User, "help");
    let answered = ConversationMessage::new(3, Author::Assistant, "Commands");

    assert_eq!(
        phase_label(ConversationPhase::Typing, Some(&asked)),
        Some("assistant is typing...")
    );
    assert_eq!(
        phase_label(ConversationPhase::Loading, Some(&asked)),
        Some("waiting for the assistant...")
    );
    assert_eq!(phase_label(ConversationPhase::Idle, Some(&asked)), None);
    assert_eq!(phase_label(ConversationPhase::Loading, Some(&answered)), None);
    assert_eq!(phase_label(ConversationPhase::Typing, None), None);
}

#[tokio::test]
async fn it_dispatches_quick_actions_and_text() {
    let session = ConversationSession::new(EchoClient {});

    dispatch(&session, "4").await;
    dispatch(&session, "4").await;

    let texts = session
        .messages()
        .iter()
        .map(|e| return e.text.to_string())
        .collect::<Vec<String>>();
    assert_eq!(texts[1..].to_vec(), vec!["help", "echo: help", "4", "echo: 4"]);
    assert_eq!(session.phase(), ConversationPhase::Idle);
}
