//! Append-only transaction ledger
//!
//! Records are stored oldest first in a vector; every read walks it in
//! reverse, so the most recently written record is the head.

use rust_decimal::Decimal;

use super::transaction::{TransactionKind, TransactionRecord};

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<TransactionRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record at the head
    pub fn record(&mut self, account_number: u32, kind: TransactionKind, amount: Decimal) {
        self.records
            .push(TransactionRecord::new(account_number, kind, amount));
    }

    /// Most recent record
    pub fn head(&self) -> Option<&TransactionRecord> {
        self.records.last()
    }

    /// All records, newest first
    pub fn iter(&self) -> std::iter::Rev<std::slice::Iter<'_, TransactionRecord>> {
        self.records.iter().rev()
    }

    /// Records belonging to one account, newest first
    ///
    /// The iterator is lazy and can be cloned to restart the walk.
    pub fn history(
        &self,
        account_number: u32,
    ) -> impl Iterator<Item = &TransactionRecord> + Clone + '_ {
        self.iter()
            .filter(move |r| r.account_number() == account_number)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
