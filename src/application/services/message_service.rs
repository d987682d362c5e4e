use crate::application::errors::BotError;
use crate::domain::entities::IncomingMessage;
use crate::domain::traits::{Bot, LedgerStore};
use super::LedgerService;

/// Service for processing messages: runs the command and sends the reply
pub struct MessageService<B: Bot, S: LedgerStore> {
    bot: B,
    ledgers: LedgerService<S>,
    support_contact: String,
}

impl<B: Bot, S: LedgerStore> MessageService<B, S> {
    pub fn new(bot: B, ledgers: LedgerService<S>, support_contact: impl Into<String>) -> Self {
        Self {
            bot,
            ledgers,
            support_contact: support_contact.into(),
        }
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    pub fn ledgers(&self) -> &LedgerService<S> {
        &self.ledgers
    }

    /// Process an incoming message and reply to its chat.
    ///
    /// A storage failure is reported to the chat and then returned: the caller
    /// decides whether to stop. Send failures are returned as network errors.
    pub async fn process(&self, message: IncomingMessage) -> Result<(), BotError> {
        tracing::info!(
            "Received message from user {} in chat {}: '{}'",
            message.sender_display(),
            message.chat_id,
            message.text
        );

        match self.ledgers.handle(&message).await {
            Ok(reply) => self.respond(message.chat_id, &reply).await,
            Err(e) => {
                tracing::error!("Ledger storage failed for chat {}: {}", message.chat_id, e);
                if let Err(send_err) = self.respond(message.chat_id, &self.apology()).await {
                    tracing::warn!("Failed to report storage failure: {}", send_err);
                }
                Err(BotError::Storage(e))
            }
        }
    }

    /// Send a response message
    pub async fn respond(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        self.bot.send_message(chat_id, text).await?;
        tracing::info!("Response has been sent to chat {}: {}", chat_id, text);
        Ok(())
    }

    fn apology(&self) -> String {
        format!(
            "There seem to be problems with this bot\nPlease send a message to {} about it",
            self.support_contact
        )
    }
}
