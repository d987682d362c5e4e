//! Telegram adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::errors::BotError;
use crate::domain::entities::{IncomingMessage, Keyword};
use crate::domain::traits::{Bot, BotInfo};

/// Telegram API base URL
const API_BASE: &str = "https://api.telegram.org";

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

impl Update {
    /// Text messages become ledger input; everything else is skipped
    pub fn into_incoming(self) -> Option<IncomingMessage> {
        let message = self.message?;
        let text = message.text?;
        let sender = message.from.and_then(|u| u.username);

        Some(IncomingMessage::new(message.chat.id, text).with_sender_opt(sender))
    }
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    client: Client,
    info: BotInfo,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client: Client::new(),
            info: BotInfo {
                id: "unknown".to_string(),
                name: "accountant-bot".to_string(),
                username: "accountant_bot".to_string(),
            },
        }
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token, method)
    }

    /// Fetch bot info from Telegram API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct Response {
            result: BotInfoResponse,
        }

        #[derive(Deserialize)]
        struct BotInfoResponse {
            id: i64,
            first_name: String,
            username: String,
        }

        let url = self.api_url("getMe");
        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!("Telegram API error: {}", response.status())));
        }

        let data: Response = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        self.info = BotInfo {
            id: data.result.id.to_string(),
            name: data.result.first_name,
            username: data.result.username,
        };

        Ok(())
    }

    /// Long-poll for updates
    pub async fn get_updates(&self, offset: i64, timeout: i64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: i64,
            allowed_updates: Vec<String>,
        }

        #[derive(Deserialize)]
        struct Response {
            result: Vec<Update>,
        }

        let url = self.api_url("getUpdates");
        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: vec!["message".to_string()],
        };

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!("Telegram API error: {}", response.status())));
        }

        let data: Response = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(data.result)
    }

    /// Get the next update offset
    pub fn get_next_offset(updates: &[Update], current: i64) -> i64 {
        updates.iter()
            .map(|u| u.update_id + 1)
            .max()
            .unwrap_or(current)
            .max(current)
    }

    /// Send a message via Telegram API - try Markdown, fallback to plain
    pub async fn send_message_api(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        match self.send_message_with_format(chat_id, text, Some("Markdown")).await {
            Ok(()) => Ok(()),
            Err(e) => {
                // Handles with underscores can break Markdown entities
                tracing::warn!("Markdown failed, using plain text: {}", e);
                self.send_message_with_format(chat_id, text, None).await
            }
        }
    }

    /// Send a message with specific parse mode
    pub async fn send_message_with_format(&self, chat_id: i64, text: &str, parse_mode: Option<&str>) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct SendMessageRequest {
            chat_id: i64,
            text: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            parse_mode: Option<String>,
        }

        let url = self.api_url("sendMessage");
        let request = SendMessageRequest {
            chat_id,
            text: text.to_string(),
            parse_mode: parse_mode.map(|s| s.to_string()),
        };

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!("Telegram API error: {}", response.status())));
        }

        Ok(())
    }

    /// Register bot commands with Telegram
    pub async fn register_commands(&self) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct Command {
            command: String,
            description: String,
        }

        #[derive(Serialize)]
        struct SetMyCommandsRequest {
            commands: Vec<Command>,
        }

        let commands = Keyword::ALL
            .iter()
            .map(|k| Command {
                command: k.name().to_string(),
                description: k.description().to_string(),
            })
            .collect();

        let url = self.api_url("setMyCommands");
        let request = SetMyCommandsRequest { commands };

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error = response.text().await.unwrap_or_default();
            return Err(BotError::Network(format!("Failed to register commands: {}", error)));
        }

        tracing::info!("Registered bot commands with Telegram");
        Ok(())
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn start(&self) -> Result<(), BotError> {
        let prefix: String = self.token.chars().take(8).collect();
        tracing::info!("Starting Telegram bot (token: {}...)", prefix);
        Ok(())
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        tracing::debug!("Sending to {}: {}", chat_id, text);

        match self.send_message_api(chat_id, text).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!("Failed to send message: {}", e);
                Err(e)
            }
        }
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
