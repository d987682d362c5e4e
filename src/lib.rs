//! accountant-bot - a group expense ledger driven by chat commands
//!
//! Layers follow the usual split:
//! - domain: ledger entities, settlement, abstractions for transports and stores
//! - application: command parsing, dispatching and the services around them
//! - infrastructure: config, storage backends and chat adapters

pub mod domain;
pub mod application;
pub mod infrastructure;
