//! Domain entities - Core business objects with no external dependencies

pub mod command;
pub mod ledger;
pub mod message;

pub use command::{Keyword, ParsedCommand};
pub use ledger::{format_amount, ExpenseItem, Ledger, LedgerStatus, StatusRow};
pub use message::IncomingMessage;
