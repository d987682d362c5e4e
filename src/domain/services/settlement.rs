use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::domain::entities::{ExpenseItem, Ledger};

/// One payment a participant owes the designated payer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub from: String,
    pub amount: Decimal,
    /// `None` while the chat has no payer configured
    pub to: Option<String>,
}

/// Result of settling a ledger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settlement {
    /// Total share of every participant, payer included, keyed by handle
    pub owed: BTreeMap<String, Decimal>,
    /// Transfers toward the payer, ordered by handle
    pub transfers: Vec<Transfer>,
}

impl Settlement {
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }
}

/// Splits every item evenly among its members and sends each share to the payer.
///
/// There is no netting between participants: everyone pays the payer directly.
pub struct SettlementCalculator;

impl SettlementCalculator {
    pub fn calculate(&self, ledger: &Ledger) -> Settlement {
        self.calculate_items(&ledger.items, ledger.payer.as_deref())
    }

    /// Settle a list of items toward `payer`.
    ///
    /// Items without members contribute nothing. A handle listed twice in one
    /// item is charged two shares.
    pub fn calculate_items(&self, items: &[ExpenseItem], payer: Option<&str>) -> Settlement {
        let owed = Self::owed_totals(items);

        let transfers = owed
            .iter()
            .filter(|(member, amount)| Some(member.as_str()) != payer && **amount > Decimal::ZERO)
            .map(|(member, amount)| Transfer {
                from: member.clone(),
                amount: *amount,
                to: payer.map(str::to_string),
            })
            .collect();

        Settlement { owed, transfers }
    }

    fn owed_totals(items: &[ExpenseItem]) -> BTreeMap<String, Decimal> {
        let mut owed: BTreeMap<String, Decimal> = BTreeMap::new();

        for item in items {
            if item.members.is_empty() {
                continue;
            }
            let share = item.amount / Decimal::from(item.members.len());
            for member in &item.members {
                let total = owed.entry(member.clone()).or_insert(Decimal::ZERO);
                *total = total.saturating_add(share);
            }
        }

        owed
    }
}
