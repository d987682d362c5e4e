//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Errors: Command, storage and transport errors
//! - Messaging: Command parsing and dispatching
//! - Services: Per-chat ledger handling and transport wiring

pub mod errors;
pub mod messaging;
pub mod services;
