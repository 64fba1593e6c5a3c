#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use std::io::Write;

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Captures;
use regex::Regex;
use tokio::io;
use tokio::io::AsyncBufReadExt;
use yansi::Paint;

use crate::domain::models::Author;
use crate::domain::models::ConversationClient;
use crate::domain::models::ConversationMessage;
use crate::domain::models::ConversationPhase;
use crate::domain::models::QuickAction;
use crate::domain::services::ConversationSession;

static STRONG: Lazy<Regex> = Lazy::new(|| {
    return Regex::new(r"<strong>(.*?)</strong>").unwrap();
});

/// Turns the formatter's markup into something a terminal can show.
pub fn to_terminal(rendered: &str) -> String {
    let res = rendered.replace("<br/>", "\n");
    return STRONG
        .replace_all(&res, |caps: &Captures| {
            return Paint::new(&caps[1]).bold().to_string();
        })
        .to_string();
}

pub fn format_message(message: &ConversationMessage) -> String {
    let name = match message.sender {
        Author::User => Paint::cyan("you").to_string(),
        Author::Assistant => Paint::magenta("assistant").to_string(),
    };

    let mut text = to_terminal(&message.render());
    if message.is_error() {
        text = Paint::red(text).to_string();
    }

    return format!("[{}] {name}: {text}", message.time_label());
}

pub fn format_quick_actions(actions: &[QuickAction]) -> String {
    return actions
        .iter()
        .enumerate()
        .map(|(idx, action)| return format!("  {}. {}", idx + 1, action.label))
        .collect::<Vec<String>>()
        .join("\n");
}

/// Resolves a numbered pick against the quick actions currently on offer.
pub fn pick_quick_action(input: &str, actions: &[QuickAction]) -> Option<QuickAction> {
    let idx = input.trim().parse::<usize>().ok()?;
    if idx == 0 {
        return None;
    }

    return actions.get(idx - 1).copied();
}

/// Indicator shown below the history while a query is out. Nothing is shown
/// once the reply has landed, even while the session finishes its last step.
pub fn phase_label(
    phase: ConversationPhase,
    last: Option<&ConversationMessage>,
) -> Option<&'static str> {
    let waiting = last.map(|e| return e.sender == Author::User).unwrap_or(false);
    if !waiting {
        return None;
    }

    match phase {
        ConversationPhase::Idle => return None,
        ConversationPhase::Typing => return Some("assistant is typing..."),
        ConversationPhase::Loading => return Some("waiting for the assistant..."),
    }
}

fn print_from<C: ConversationClient>(session: &ConversationSession<C>, printed: &mut usize) {
    let messages = session.messages();
    for message in messages.iter().skip(*printed) {
        println!("{}", format_message(message));
    }
    *printed = messages.len();
}

async fn dispatch<C: ConversationClient>(session: &ConversationSession<C>, text: &str) {
    let mut rx = session.subscribe();
    let send = async {
        if let Some(action) = pick_quick_action(text, session.quick_actions()) {
            return session.send_quick_action(&action).await;
        }
        return session.send(text).await;
    };
    tokio::pin!(send);

    let mut shown = None;
    loop {
        tokio::select! {
            _ = &mut send => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    (&mut send).await;
                    break;
                }

                let label = phase_label(session.phase(), session.messages().last());
                if let Some(indicator) = label {
                    if shown != label {
                        println!("{}", Paint::new(indicator).dimmed());
                    }
                }
                shown = label;
            }
        }
    }
}

fn print_prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    return Ok(());
}

pub async fn start<C: ConversationClient>(session: ConversationSession<C>) -> Result<()> {
    let mut printed = 0;
    print_from(&session, &mut printed);

    let actions = session.quick_actions();
    if !actions.is_empty() {
        println!(
            "{}\n{}",
            Paint::new("Quick actions, type a number to pick one:").dimmed(),
            format_quick_actions(actions)
        );
    }

    let mut lines = io::BufReader::new(io::stdin()).lines();
    loop {
        print_prompt()?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };

        let text = line.trim();
        if text == "/quit" || text == "/exit" {
            break;
        }
        if text.is_empty() {
            continue;
        }

        dispatch(&session, text).await;
        print_from(&session, &mut printed);
    }

    return Ok(());
}
