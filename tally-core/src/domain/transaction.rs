//! Transaction record domain model

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of money movement recorded in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    TransferOut,
    TransferIn,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdraw => "Withdraw",
            TransactionKind::TransferOut => "Transfer Out",
            TransactionKind::TransferIn => "Transfer In",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single immutable ledger entry
///
/// `account_number` is a plain back-reference: the account may have been
/// deleted since the record was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    account_number: u32,
    kind: TransactionKind,
    amount: Decimal,
    recorded_at: DateTime<Utc>,
}

impl TransactionRecord {
    pub fn new(account_number: u32, kind: TransactionKind, amount: Decimal) -> Self {
        Self {
            account_number,
            kind,
            amount,
            recorded_at: Utc::now(),
        }
    }

    pub fn account_number(&self) -> u32 {
        self.account_number
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kind_display() {
        assert_eq!(TransactionKind::TransferOut.to_string(), "Transfer Out");
        assert_eq!(TransactionKind::Deposit.to_string(), "Deposit");
    }

    #[test]
    fn test_record_serializes_kind_in_snake_case() {
        let record = TransactionRecord::new(2, TransactionKind::TransferIn, dec!(12.50));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "transfer_in");
        assert_eq!(json["account_number"], 2);
    }
}
