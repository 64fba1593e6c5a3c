#[cfg(test)]
#[path = "assistant_test.rs"]
mod tests;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::Failure;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatbotQuery {
    pub query: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatbotResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatbotResponse {
    /// The reply text, if the server sent a non-empty one.
    pub fn reply(&self) -> Option<&str> {
        return self
            .response
            .as_deref()
            .filter(|text| return !text.is_empty());
    }
}

#[async_trait]
pub trait ConversationClient: Send + Sync {
    /// Sends one user query to the assistant and waits for its single answer.
    async fn query(&self, text: &str) -> Result<ChatbotResponse, Failure>;
}

/// What the assistant panel should show below the history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConversationPhase {
    Idle,
    Typing,
    Loading,
}

impl ConversationPhase {
    pub fn from_flags(awaiting_response: bool, shows_typing_indicator: bool) -> ConversationPhase {
        if !awaiting_response {
            return ConversationPhase::Idle;
        }
        if shows_typing_indicator {
            return ConversationPhase::Typing;
        }

        return ConversationPhase::Loading;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub query: &'static str,
}

pub const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        label: "📊 My Tasks",
        query: "Show me my tasks",
    },
    QuickAction {
        label: "✅ Completed",
        query: "Show completed tasks",
    },
    QuickAction {
        label: "⏳ Pending",
        query: "Show pending tasks",
    },
    QuickAction {
        label: "❓ Help",
        query: "help",
    },
];
