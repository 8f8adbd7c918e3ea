//! Account store port - durable account storage

use crate::domain::result::Result;
use crate::domain::Account;

/// Persistence for the account set
///
/// Only accounts are stored. Ledger records, the audit stack and the pending
/// queue live for the lifetime of the process.
pub trait AccountStore {
    /// Load every stored account, in no particular order
    fn load(&self) -> Result<Vec<Account>>;

    /// Replace the stored account set with `accounts`
    fn save(&self, accounts: &[Account]) -> Result<()>;
}
