//! In-memory ledger storage

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::errors::StorageError;
use crate::domain::entities::Ledger;
use crate::domain::traits::LedgerStore;

/// Keeps ledgers in process memory. Used for console runs and tests.
#[derive(Clone, Default)]
pub struct MemoryLedgerStore {
    ledgers: Arc<RwLock<HashMap<i64, Ledger>>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.ledgers.read().await.len()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn load_ledger(&self, chat_id: i64) -> Result<Option<Ledger>, StorageError> {
        let ledgers = self.ledgers.read().await;
        Ok(ledgers.get(&chat_id).cloned())
    }

    async fn save_ledger(&self, ledger: &Ledger) -> Result<(), StorageError> {
        let mut ledgers = self.ledgers.write().await;
        ledgers.insert(ledger.chat_id(), ledger.clone());
        Ok(())
    }
}
