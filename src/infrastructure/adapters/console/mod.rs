//! Console adapter for development/testing

use async_trait::async_trait;
use std::io::Write;
use crate::application::errors::BotError;
use crate::domain::entities::IncomingMessage;
use crate::domain::traits::{Bot, BotInfo};

/// Console bot adapter: every line read from stdin belongs to one chat
pub struct ConsoleAdapter {
    info: BotInfo,
    chat_id: i64,
    handle: String,
}

impl ConsoleAdapter {
    pub fn new(chat_id: i64, handle: impl Into<String>) -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "accountant-bot".to_string(),
                username: "console".to_string(),
            },
            chat_id,
            handle: handle.into(),
        }
    }

    pub fn chat_id(&self) -> i64 {
        self.chat_id
    }

    /// Read one line; `None` on end of input
    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        let _ = std::io::stdout().flush();

        let mut input = String::new();
        match std::io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(input.trim().to_string()),
        }
    }

    /// Wrap a console line as a chat message from the configured handle
    pub fn to_incoming(&self, line: impl Into<String>) -> IncomingMessage {
        IncomingMessage::new(self.chat_id, line).with_sender(self.handle.clone())
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new(0, "@console")
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode), chat {}", self.chat_id);
        Ok(())
    }

    async fn send_message(&self, _chat_id: i64, text: &str) -> Result<(), BotError> {
        // Console has no markup, drop the bold markers
        println!("[BOT] {}", text.replace('*', ""));
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
