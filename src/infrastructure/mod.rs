//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Database: SQLite ledger storage
//! - Storage: In-memory ledger storage
//! - Adapters: Platform integrations (Telegram, console)

pub mod adapters;
pub mod config;
pub mod database;
pub mod storage;
