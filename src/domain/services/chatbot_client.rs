#[cfg(test)]
#[path = "chatbot_client_test.rs"]
mod tests;

use async_trait::async_trait;

use super::GatewayRef;
use crate::domain::models::ChatbotQuery;
use crate::domain::models::ChatbotResponse;
use crate::domain::models::ConversationClient;
use crate::domain::models::Failure;

pub struct ChatbotClient {
    gateway: GatewayRef,
}

impl ChatbotClient {
    pub fn new(gateway: GatewayRef) -> ChatbotClient {
        return ChatbotClient { gateway };
    }
}

#[async_trait]
impl ConversationClient for ChatbotClient {
    #[allow(clippy::implicit_return)]
    async fn query(&self, text: &str) -> Result<ChatbotResponse, Failure> {
        let query = ChatbotQuery {
            query: text.to_string(),
        };
        let body = self
            .gateway
            .post("/chatbot/query", serde_json::to_value(&query)?)
            .await?;

        tracing::debug!(body = ?body, "Chatbot response");
        return Ok(serde_json::from_value(body)?);
    }
}
