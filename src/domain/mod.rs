//! Domain layer - Core business logic with no infrastructure dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (Ledger, ExpenseItem, IncomingMessage, ParsedCommand)
//! - Services: Pure computations over entities (settlement)
//! - Traits: Abstractions for infrastructure (Bot, LedgerStore)

pub mod entities;
pub mod services;
pub mod traits;
