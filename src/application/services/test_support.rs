//! Test doubles shared by the service tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::errors::{BotError, StorageError};
use crate::domain::entities::Ledger;
use crate::domain::traits::{Bot, BotInfo, LedgerStore};
use crate::infrastructure::storage::MemoryLedgerStore;

/// Store whose every call fails
pub struct FailingStore;

#[async_trait]
impl LedgerStore for FailingStore {
    async fn load_ledger(&self, _chat_id: i64) -> Result<Option<Ledger>, StorageError> {
        Err(StorageError::Unavailable("store is down".to_string()))
    }

    async fn save_ledger(&self, _ledger: &Ledger) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("store is down".to_string()))
    }
}

/// In-memory store that counts saves
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryLedgerStore,
    saves: AtomicUsize,
}

impl CountingStore {
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerStore for CountingStore {
    async fn load_ledger(&self, chat_id: i64) -> Result<Option<Ledger>, StorageError> {
        self.inner.load_ledger(chat_id).await
    }

    async fn save_ledger(&self, ledger: &Ledger) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save_ledger(ledger).await
    }
}

/// Bot that records every reply
#[derive(Default)]
pub struct RecordingBot {
    pub sent: Mutex<Vec<(i64, String)>>,
}

impl RecordingBot {
    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn start(&self) -> Result<(), BotError> {
        Ok(())
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: "test".to_string(),
            name: "accountant-bot".to_string(),
            username: "accountant_test_bot".to_string(),
        }
    }
}
