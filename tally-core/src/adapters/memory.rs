//! In-memory account store

use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::domain::Account;
use crate::ports::AccountStore;

/// Account store that keeps the saved set in memory
#[derive(Default)]
pub struct InMemoryStore {
    accounts: Mutex<Vec<Account>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
        }
    }
}

impl AccountStore for InMemoryStore {
    fn load(&self) -> Result<Vec<Account>> {
        let accounts = self
            .accounts
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        Ok(accounts.clone())
    }

    fn save(&self, accounts: &[Account]) -> Result<()> {
        let mut stored = self
            .accounts
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        *stored = accounts.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_replaces_previous_set() {
        let store = InMemoryStore::with_accounts(vec![Account::new(1, "alice", 1111)]);
        assert_eq!(store.load().unwrap().len(), 1);

        store
            .save(&[Account::new(2, "bob", 2222), Account::new(3, "carol", 3333)])
            .unwrap();
        let names: Vec<String> = store.load().unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["bob", "carol"]);
    }
}
