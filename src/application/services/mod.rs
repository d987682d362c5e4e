//! Application services - Business logic orchestration

pub mod ledger_service;
pub mod message_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use ledger_service::LedgerService;
pub use message_service::MessageService;
