use async_trait::async_trait;
use crate::application::errors::BotError;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Prepare the adapter before the message loop starts
    async fn start(&self) -> Result<(), BotError>;

    /// Send a reply to a chat. `*bold*` markup is rendered when the platform supports it.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
