//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Command errors, reported back to the chat and never fatal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("I cannot parse your message :(")]
    MalformedMessage,

    #[error("I cannot parse value {0} :(")]
    InvalidValue(String),

    #[error("Amount {0} does not fit into the bill :(")]
    AmountTooLarge(String),

    #[error("Index {index} is invalid. {}", range_hint(.len))]
    IndexOutOfRange { index: u64, len: usize },

    #[error("This command is not supported")]
    Unsupported(String),
}

fn range_hint(len: &usize) -> String {
    if *len == 0 {
        "Bill is empty, there is nothing to remove".to_string()
    } else {
        format!("Index must be in range [1, {}]", len)
    }
}

impl CommandError {
    /// Line appended after the diagnostic to point the user at `/help`
    pub fn help_pointer(&self) -> Option<&'static str> {
        match self {
            CommandError::MalformedMessage | CommandError::InvalidValue(_) => {
                Some("Send */help* to show help info")
            }
            CommandError::Unsupported(_) => Some("Send */help* to show all available commands"),
            CommandError::AmountTooLarge(_) | CommandError::IndexOutOfRange { .. } => None,
        }
    }

    /// Full reply text for the chat
    pub fn to_reply(&self) -> String {
        match self.help_pointer() {
            Some(pointer) => format!("{}\n{}", self, pointer),
            None => self.to_string(),
        }
    }
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupted record: {0}")]
    Corrupted(String),

    #[error("Unavailable: {0}")]
    Unavailable(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
