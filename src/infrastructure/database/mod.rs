//! SQLite ledger storage, one row per chat

use async_trait::async_trait;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::application::errors::StorageError;
use crate::domain::entities::{ExpenseItem, Ledger};
use crate::domain::traits::LedgerStore;

pub struct SqliteLedgerStore {
    conn: Mutex<Connection>,
}

impl SqliteLedgerStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_tables()?;
        Ok(store)
    }

    fn init_tables(&self) -> Result<(), StorageError> {
        // Items are kept as a JSON array, the ledger is always read and written whole
        self.conn()?.execute(
            "CREATE TABLE IF NOT EXISTS ledgers (
                chat_id INTEGER PRIMARY KEY,
                payer TEXT,
                items TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Unavailable("Lock poisoned".to_string()))
    }

    pub fn ledger_count(&self) -> Result<i64, StorageError> {
        let count = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM ledgers", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[async_trait]
impl LedgerStore for SqliteLedgerStore {
    async fn load_ledger(&self, chat_id: i64) -> Result<Option<Ledger>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT payer, items FROM ledgers WHERE chat_id = ?1")?;
        let mut rows = stmt.query([chat_id])?;

        let ledger = match rows.next()? {
            Some(row) => {
                let payer: Option<String> = row.get(0)?;
                let items_json: String = row.get(1)?;
                let items: Vec<ExpenseItem> = serde_json::from_str(&items_json).map_err(|e| {
                    StorageError::Corrupted(format!("items of chat {}: {}", chat_id, e))
                })?;
                Some(Ledger::from_parts(chat_id, payer, items))
            }
            None => None,
        };

        Ok(ledger)
    }

    async fn save_ledger(&self, ledger: &Ledger) -> Result<(), StorageError> {
        let items_json = serde_json::to_string(&ledger.items)?;
        self.conn()?.execute(
            "INSERT INTO ledgers (chat_id, payer, items) VALUES (?1, ?2, ?3)
             ON CONFLICT(chat_id) DO UPDATE SET
                payer = excluded.payer,
                items = excluded.items,
                updated_at = datetime('now')",
            rusqlite::params![ledger.chat_id(), ledger.payer, items_json],
        )?;
        Ok(())
    }
}
