#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use tokio::sync::watch;

use crate::domain::models::Author;
use crate::domain::models::ConversationClient;
use crate::domain::models::ConversationMessage;
use crate::domain::models::ConversationPhase;
use crate::domain::models::MessageKind;
use crate::domain::models::QuickAction;
use crate::domain::models::QUICK_ACTIONS;

pub const GREETING_TEXT: &str = "👋 Hi! I'm your intelligent assistant. I can help you with your tasks, account information, and more. Type 'help' to see what I can do!";
pub const FALLBACK_TEXT: &str = "Sorry, I could not process your request.";
pub const ERROR_TEXT: &str =
    "Oops! Something went wrong. Please make sure you are logged in and try again.";

#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub messages: Vec<ConversationMessage>,
    pub awaiting_response: bool,
    pub shows_typing_indicator: bool,
    next_id: u64,
}

impl SessionState {
    fn push(&mut self, sender: Author, kind: Option<MessageKind>, text: &str) -> ConversationMessage {
        let message = ConversationMessage::new_with_kind(self.next_id, sender, kind, text);
        self.next_id += 1;
        self.messages.push(message.clone());
        return message;
    }

    pub fn phase(&self) -> ConversationPhase {
        return ConversationPhase::from_flags(self.awaiting_response, self.shows_typing_indicator);
    }
}

/// Conversation state for the assistant panel. History is append-only and
/// at most one query is in flight; a `send` while waiting is dropped.
pub struct ConversationSession<C: ConversationClient> {
    client: C,
    state: watch::Sender<SessionState>,
}

impl<C: ConversationClient> ConversationSession<C> {
    pub fn new(client: C) -> ConversationSession<C> {
        let mut initial = SessionState {
            messages: vec![],
            awaiting_response: false,
            shows_typing_indicator: false,
            next_id: 1,
        };
        initial.push(Author::Assistant, Some(MessageKind::Greeting), GREETING_TEXT);

        let (state, _) = watch::channel(initial);
        return ConversationSession { client, state };
    }

    pub fn messages(&self) -> Vec<ConversationMessage> {
        return self.state.borrow().messages.clone();
    }

    pub fn phase(&self) -> ConversationPhase {
        return self.state.borrow().phase();
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        return self.state.subscribe();
    }

    /// Shortcuts are offered until the user has said anything.
    pub fn quick_actions(&self) -> &'static [QuickAction] {
        if self.state.borrow().messages.len() <= 1 {
            return &QUICK_ACTIONS;
        }

        return &[];
    }

    pub async fn send_quick_action(&self, action: &QuickAction) -> Option<ConversationMessage> {
        return self.send(action.query).await;
    }

    /// Appends `text` as a user message and asks the assistant. Returns the
    /// assistant reply that was appended, or `None` when nothing was sent
    /// because `text` is blank or another query is still outstanding.
    pub async fn send(&self, text: &str) -> Option<ConversationMessage> {
        let dispatched = self.state.send_if_modified(|state| {
            if text.trim().is_empty() || state.awaiting_response {
                return false;
            }

            state.push(Author::User, None, text);
            state.awaiting_response = true;
            state.shows_typing_indicator = true;
            return true;
        });

        if !dispatched {
            tracing::debug!("Ignoring send, blank text or query in flight");
            return None;
        }

        let res = self.client.query(text).await;

        let mut reply = None;
        self.state.send_modify(|state| {
            state.shows_typing_indicator = false;

            let message = match &res {
                Ok(body) => state.push(
                    Author::Assistant,
                    body.kind.as_deref().and_then(MessageKind::parse),
                    body.reply().unwrap_or(FALLBACK_TEXT),
                ),
                Err(err) => {
                    tracing::error!(error = ?err, "Assistant query failed");
                    state.push(Author::Assistant, Some(MessageKind::Error), ERROR_TEXT)
                }
            };
            reply = Some(message);
        });

        // Runs on success and failure alike.
        self.state.send_modify(|state| {
            state.awaiting_response = false;
        });

        return reply;
    }
}
