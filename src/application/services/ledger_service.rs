use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::application::errors::StorageError;
use crate::application::messaging::CommandDispatcher;
use crate::domain::entities::{IncomingMessage, Ledger};
use crate::domain::traits::LedgerStore;

/// One async mutex per chat, created on first use.
///
/// Entries are never evicted. The map grows with the number of chats, the same
/// as the ledgers themselves, which are also kept forever.
#[derive(Default)]
struct ChatLocks {
    locks: Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>,
}

impl ChatLocks {
    async fn acquire(&self, chat_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(chat_id).or_default().clone()
        };
        lock.lock_owned().await
    }
}

/// Runs commands against stored ledgers.
///
/// Load, mutate and save happen under a per-chat lock, so two messages for
/// the same chat never overwrite each other. Different chats run in parallel.
pub struct LedgerService<S: LedgerStore> {
    store: S,
    dispatcher: CommandDispatcher,
    locks: ChatLocks,
}

impl<S: LedgerStore> LedgerService<S> {
    pub fn new(store: S, dispatcher: CommandDispatcher) -> Self {
        Self {
            store,
            dispatcher,
            locks: ChatLocks::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply one message to its chat's ledger and return the reply text.
    ///
    /// Storage failures are returned as-is and never retried.
    pub async fn handle(&self, message: &IncomingMessage) -> Result<String, StorageError> {
        let _guard = self.locks.acquire(message.chat_id).await;

        let mut ledger = self.load_or_create(message.chat_id).await?;
        let outcome = self.dispatcher.process_text(&message.text, &mut ledger);

        if outcome.changed {
            self.store.save_ledger(&ledger).await?;
            tracing::debug!("Saved ledger for chat {} ({} items)", ledger.chat_id(), ledger.len());
        }

        Ok(outcome.reply)
    }

    async fn load_or_create(&self, chat_id: i64) -> Result<Ledger, StorageError> {
        if let Some(ledger) = self.store.load_ledger(chat_id).await? {
            return Ok(ledger);
        }

        let ledger = Ledger::new(chat_id);
        self.store.save_ledger(&ledger).await?;
        tracing::debug!("Added new ledger for chat {}", chat_id);
        Ok(ledger)
    }
}
