use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::application::errors::CommandError;

/// One shared purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub amount: Decimal,
    /// Handles of everyone who shares the purchase, `@` included.
    /// Duplicates are kept as entered.
    pub members: Vec<String>,
}

impl ExpenseItem {
    pub fn new(amount: Decimal, members: Vec<String>) -> Self {
        Self { amount, members }
    }
}

/// Per-chat bill: the designated payer plus the ordered list of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    chat_id: i64,
    pub payer: Option<String>,
    pub items: Vec<ExpenseItem>,
}

/// One row of the `/status` view, index is 1-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow<'a> {
    pub index: usize,
    pub amount: Decimal,
    pub members: &'a [String],
}

/// Read-only snapshot of a ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerStatus<'a> {
    pub rows: Vec<StatusRow<'a>>,
    pub payer: Option<&'a str>,
    pub total: Decimal,
}

impl Ledger {
    pub fn new(chat_id: i64) -> Self {
        Self {
            chat_id,
            payer: None,
            items: Vec::new(),
        }
    }

    /// Rebuild a ledger from stored parts
    pub fn from_parts(chat_id: i64, payer: Option<String>, items: Vec<ExpenseItem>) -> Self {
        Self { chat_id, payer, items }
    }

    pub fn chat_id(&self) -> i64 {
        self.chat_id
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn set_payer(&mut self, handle: impl Into<String>) {
        self.payer = Some(handle.into());
    }

    /// Append an item whose amount is the sum of `amounts` (zero when empty).
    /// Returns the recorded amount.
    ///
    /// Rejected without touching the ledger when the item, or the bill total
    /// after adding it, would not fit into a `Decimal`.
    pub fn add_item(&mut self, amounts: &[Decimal], members: Vec<String>) -> Result<Decimal, CommandError> {
        let too_large = || {
            let text = amounts.iter().map(Decimal::to_string).collect::<Vec<_>>().join(" + ");
            CommandError::AmountTooLarge(text)
        };

        let amount = amounts
            .iter()
            .try_fold(Decimal::ZERO, |sum, amount| sum.checked_add(*amount))
            .ok_or_else(too_large)?;
        self.total().checked_add(amount).ok_or_else(too_large)?;

        self.items.push(ExpenseItem::new(amount, members));
        Ok(amount)
    }

    /// Remove the item at a 1-based `index`. Later items shift down by one.
    pub fn remove_item(&mut self, index: u64) -> Result<ExpenseItem, CommandError> {
        let len = self.items.len();
        let position = usize::try_from(index).ok().filter(|i| (1..=len).contains(i));

        match position {
            Some(i) => Ok(self.items.remove(i - 1)),
            None => Err(CommandError::IndexOutOfRange { index, len }),
        }
    }

    /// Drop every item, the payer stays
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all items. Saturates at `Decimal::MAX` for records written
    /// before totals were bounded.
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |sum, item| sum.saturating_add(item.amount))
    }

    pub fn status(&self) -> LedgerStatus<'_> {
        LedgerStatus {
            rows: self
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| StatusRow {
                    index: i + 1,
                    amount: item.amount,
                    members: &item.members,
                })
                .collect(),
            payer: self.payer.as_deref(),
            total: self.total(),
        }
    }
}

/// Render an amount with exactly two decimals
pub fn format_amount(amount: Decimal) -> String {
    // Padding through the formatter, rescale cannot add digits near Decimal::MAX
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn handles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_ledger_is_empty_without_payer() {
        let ledger = Ledger::new(-1001);
        assert_eq!(ledger.chat_id(), -1001);
        assert!(ledger.is_empty());
        assert!(ledger.payer.is_none());
    }

    #[test]
    fn test_add_item_sums_amounts() {
        let mut ledger = Ledger::new(1);
        let total = ledger.add_item(&[dec("10"), dec("5.25")], handles(&["@alice"])).unwrap();

        assert_eq!(total, dec("15.25"));
        assert_eq!(ledger.items[0].amount, dec("15.25"));
        assert_eq!(ledger.items[0].members, handles(&["@alice"]));
    }

    #[test]
    fn test_add_item_without_amounts_records_zero() {
        let mut ledger = Ledger::new(1);
        let total = ledger.add_item(&[], handles(&["@alice", "@bob"])).unwrap();
        assert_eq!(total, Decimal::ZERO);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_remove_item_shifts_later_items() {
        let mut ledger = Ledger::new(1);
        ledger.add_item(&[dec("1")], handles(&["@a"])).unwrap();
        ledger.add_item(&[dec("2")], handles(&["@b"])).unwrap();
        ledger.add_item(&[dec("3")], handles(&["@c"])).unwrap();

        let removed = ledger.remove_item(2).unwrap();
        assert_eq!(removed.amount, dec("2"));

        let status = ledger.status();
        let indices: Vec<usize> = status.rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(status.rows[1].amount, dec("3"));
    }

    #[test]
    fn test_remove_item_out_of_range() {
        let mut ledger = Ledger::new(1);
        ledger.add_item(&[dec("1")], vec![]).unwrap();
        let before = ledger.clone();

        for index in [0, 2, u64::MAX] {
            let err = ledger.remove_item(index).unwrap_err();
            assert!(matches!(err, CommandError::IndexOutOfRange { len: 1, .. }));
        }
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_clear_keeps_payer() {
        let mut ledger = Ledger::new(1);
        ledger.set_payer("@carol");
        ledger.add_item(&[dec("10")], handles(&["@a"])).unwrap();
        ledger.clear();

        assert!(ledger.is_empty());
        assert_eq!(ledger.payer.as_deref(), Some("@carol"));
    }

    #[test]
    fn test_status_reports_total_and_payer() {
        let mut ledger = Ledger::new(1);
        ledger.add_item(&[dec("30")], handles(&["@alice", "@bob"])).unwrap();
        ledger.add_item(&[dec("20")], handles(&["@alice"])).unwrap();

        let status = ledger.status();
        assert_eq!(status.total, dec("50"));
        assert_eq!(status.payer, None);
        assert_eq!(status.rows[0].members, &handles(&["@alice", "@bob"])[..]);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec("35")), "35.00");
        assert_eq!(format_amount(dec("10.5")), "10.50");
        assert_eq!(format_amount(dec("3.335")), "3.34");
        assert_eq!(format_amount(dec("10") / dec("3")), "3.33");
        assert_eq!(format_amount(Decimal::MAX), "79228162514264337593543950335.00");
    }

    #[test]
    fn test_add_item_rejects_overflowing_amounts() {
        let mut ledger = Ledger::new(1);
        let err = ledger.add_item(&[Decimal::MAX, Decimal::ONE], handles(&["@a"])).unwrap_err();

        assert!(matches!(err, CommandError::AmountTooLarge(_)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_add_item_rejects_overflowing_total() {
        let mut ledger = Ledger::new(1);
        ledger.add_item(&[Decimal::MAX], handles(&["@a"])).unwrap();
        let before = ledger.clone();

        let err = ledger.add_item(&[Decimal::MAX], handles(&["@b"])).unwrap_err();
        assert!(matches!(err, CommandError::AmountTooLarge(_)));
        assert_eq!(ledger, before);
        assert_eq!(ledger.total(), Decimal::MAX);
    }

    #[test]
    fn test_total_saturates_on_oversized_records() {
        let items = vec![
            ExpenseItem::new(Decimal::MAX, handles(&["@a"])),
            ExpenseItem::new(Decimal::MAX, handles(&["@b"])),
        ];
        let ledger = Ledger::from_parts(1, None, items);
        assert_eq!(ledger.total(), Decimal::MAX);
    }
}
