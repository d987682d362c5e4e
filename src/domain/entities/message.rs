use chrono::{DateTime, Utc};

/// A text message delivered by a transport
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub id: String,
    pub chat_id: i64,
    /// Sender handle with the leading `@`, when the platform exposes one
    pub sender: Option<String>,
    pub text: String,
    pub received_at: DateTime<Utc>,
}

impl IncomingMessage {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chat_id,
            sender: None,
            text: text.into(),
            received_at: Utc::now(),
        }
    }

    pub fn with_sender(mut self, handle: impl Into<String>) -> Self {
        let handle = handle.into();
        self.sender = Some(if handle.starts_with('@') {
            handle
        } else {
            format!("@{}", handle)
        });
        self
    }

    pub fn with_sender_opt(self, handle: Option<impl Into<String>>) -> Self {
        match handle {
            Some(h) => self.with_sender(h),
            None => self,
        }
    }

    pub fn sender_display(&self) -> &str {
        self.sender.as_deref().unwrap_or("unknown")
    }
}
