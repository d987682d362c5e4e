//! Domain services - Pure computations over ledger data

pub mod settlement;

pub use settlement::{Settlement, SettlementCalculator, Transfer};
