use async_trait::async_trait;
use crate::application::errors::StorageError;
use crate::domain::entities::Ledger;

/// Store trait - one ledger record per chat
///
/// Callers serialize load-modify-save per chat; implementations only need
/// each call to be atomic on its own.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn load_ledger(&self, chat_id: i64) -> Result<Option<Ledger>, StorageError>;
    async fn save_ledger(&self, ledger: &Ledger) -> Result<(), StorageError>;
}

#[async_trait]
impl<T: LedgerStore + ?Sized> LedgerStore for Box<T> {
    async fn load_ledger(&self, chat_id: i64) -> Result<Option<Ledger>, StorageError> {
        (**self).load_ledger(chat_id).await
    }

    async fn save_ledger(&self, ledger: &Ledger) -> Result<(), StorageError> {
        (**self).save_ledger(ledger).await
    }
}
