#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use super::Author;
use crate::domain::services::format_response;

/// Styling tag attached to assistant messages. The server may send tags this
/// client has no special handling for, those are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Greeting,
    Error,
    Other(String),
}

impl MessageKind {
    pub fn parse(text: &str) -> Option<MessageKind> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        match text {
            "greeting" => return Some(MessageKind::Greeting),
            "error" => return Some(MessageKind::Error),
            other => return Some(MessageKind::Other(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MessageKind::Greeting => return "greeting",
            MessageKind::Error => return "error",
            MessageKind::Other(other) => return other,
        }
    }
}

impl Serialize for MessageKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        return serializer.serialize_str(self.as_str());
    }
}

impl<'de> Deserialize<'de> for MessageKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<MessageKind, D::Error> {
        let text = String::deserialize(deserializer)?;
        return Ok(MessageKind::parse(&text).unwrap_or(MessageKind::Other(text)));
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: u64,
    pub text: String,
    pub sender: Author,
    pub timestamp: DateTime<Local>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageKind>,
}

impl ConversationMessage {
    pub fn new(id: u64, sender: Author, text: &str) -> ConversationMessage {
        return ConversationMessage {
            id,
            text: text.to_string(),
            sender,
            timestamp: Local::now(),
            kind: None,
        };
    }

    pub fn new_with_kind(
        id: u64,
        sender: Author,
        kind: Option<MessageKind>,
        text: &str,
    ) -> ConversationMessage {
        let mut message = ConversationMessage::new(id, sender, text);
        message.kind = kind;
        return message;
    }

    pub fn is_error(&self) -> bool {
        return self.kind == Some(MessageKind::Error);
    }

    /// Presentation form of the message. Assistant text goes through the
    /// response formatter, user text is shown as typed.
    pub fn render(&self) -> String {
        if self.sender == Author::Assistant {
            return format_response(&self.text);
        }

        return self.text.to_string();
    }

    /// Short `HH:MM` label shown next to each bubble.
    pub fn time_label(&self) -> String {
        return self.timestamp.format("%H:%M").to_string();
    }
}
