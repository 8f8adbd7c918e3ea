//! Account registry
//!
//! Accounts live in a growable vector in registration order. Lookups are a
//! linear scan by account number. Removal shifts later accounts down so that
//! iteration order stays deterministic.

use super::account::Account;
use super::result::{Error, Result};

#[derive(Debug, Clone)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
    /// Optional upper bound on the number of live accounts
    max_accounts: Option<usize>,
    /// None once every account number has been handed out
    next_number: Option<u32>,
}

impl AccountRegistry {
    pub fn new(max_accounts: Option<usize>) -> Self {
        Self {
            accounts: Vec::new(),
            max_accounts,
            next_number: Some(1),
        }
    }

    /// Rebuild a registry from previously persisted accounts
    ///
    /// Numbering continues after the largest restored account number.
    /// Duplicate account numbers are rejected.
    pub fn restore(accounts: Vec<Account>, max_accounts: Option<usize>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for account in &accounts {
            account.validate().map_err(Error::validation)?;
            if !seen.insert(account.account_number) {
                return Err(Error::validation(format!(
                    "duplicate account number {}",
                    account.account_number
                )));
            }
        }

        let next_number = match accounts.iter().map(|a| a.account_number).max() {
            Some(highest) => highest.checked_add(1),
            None => Some(1),
        };

        Ok(Self {
            accounts,
            max_accounts,
            next_number,
        })
    }

    /// Register a new account and return its number
    pub fn register(&mut self, name: &str, pin: u16) -> Result<u32> {
        if let Some(max) = self.max_accounts {
            if self.accounts.len() >= max {
                return Err(Error::CapacityExceeded);
            }
        }
        Account::validate_name(name).map_err(Error::validation)?;
        Account::validate_pin(pin).map_err(Error::validation)?;

        let number = self.next_number.ok_or(Error::CapacityExceeded)?;
        self.next_number = number.checked_add(1);
        self.accounts.push(Account::new(number, name.trim(), pin));
        Ok(number)
    }

    pub fn find(&self, account_number: u32) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.account_number == account_number)
    }

    pub fn find_mut(&mut self, account_number: u32) -> Option<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|a| a.account_number == account_number)
    }

    pub fn contains(&self, account_number: u32) -> bool {
        self.find(account_number).is_some()
    }

    /// Position of the account in iteration order
    pub fn position(&self, account_number: u32) -> Option<usize> {
        self.accounts
            .iter()
            .position(|a| a.account_number == account_number)
    }

    pub fn update(&mut self, account_number: u32, new_name: &str) -> Result<()> {
        Account::validate_name(new_name).map_err(Error::validation)?;
        let account = self
            .find_mut(account_number)
            .ok_or(Error::NotFound(account_number))?;
        account.name = new_name.trim().to_string();
        Ok(())
    }

    /// Remove an account, keeping the relative order of the others
    pub fn remove(&mut self, account_number: u32) -> Result<Account> {
        let index = self
            .position(account_number)
            .ok_or(Error::NotFound(account_number))?;
        Ok(self.accounts.remove(index))
    }

    /// Clear a lockout
    pub fn unlock(&mut self, account_number: u32) -> Result<()> {
        let account = self
            .find_mut(account_number)
            .ok_or(Error::NotFound(account_number))?;
        account.locked = false;
        account.failed_attempts = 0;
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Account> {
        self.accounts.iter()
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn max_accounts(&self) -> Option<usize> {
        self.max_accounts
    }

    /// Accounts ordered by ascending balance; ties keep registration order
    pub fn sorted_by_balance(&self) -> Vec<&Account> {
        let mut sorted: Vec<&Account> = self.accounts.iter().collect();
        sorted.sort_by(|a, b| a.balance.cmp(&b.balance));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn registry_with(names: &[&str]) -> AccountRegistry {
        let mut registry = AccountRegistry::new(None);
        for name in names {
            registry.register(name, 1111).unwrap();
        }
        registry
    }

    #[test]
    fn test_register_assigns_sequential_numbers() {
        let mut registry = AccountRegistry::new(None);
        assert_eq!(registry.register("alice", 1234).unwrap(), 1);
        assert_eq!(registry.register("bob", 4321).unwrap(), 2);

        let alice = registry.find(1).unwrap();
        assert_eq!(alice.name, "alice");
        assert_eq!(alice.balance, dec!(0));
    }

    #[test]
    fn test_register_rejects_when_full() {
        let mut registry = AccountRegistry::new(Some(2));
        registry.register("a", 1).unwrap();
        registry.register("b", 2).unwrap();

        assert!(matches!(registry.register("c", 3), Err(Error::CapacityExceeded)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_validates_input() {
        let mut registry = AccountRegistry::new(None);
        assert!(matches!(registry.register("", 1234), Err(Error::Validation(_))));
        assert!(matches!(registry.register("dave", 10000), Err(Error::Validation(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_find_missing_returns_none() {
        let registry = registry_with(&["alice"]);
        assert!(registry.find(42).is_none());
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut registry = registry_with(&["a", "b", "c", "d"]);
        let removed = registry.remove(2).unwrap();
        assert_eq!(removed.name, "b");

        let numbers: Vec<u32> = registry.iter().map(|a| a.account_number).collect();
        assert_eq!(numbers, vec![1, 3, 4]);
    }

    #[test]
    fn test_numbers_are_not_reused_after_removal() {
        let mut registry = registry_with(&["a", "b"]);
        registry.remove(2).unwrap();
        assert_eq!(registry.register("c", 1111).unwrap(), 3);
    }

    #[test]
    fn test_update_and_remove_missing() {
        let mut registry = registry_with(&["a"]);
        registry.update(1, "renamed").unwrap();
        assert_eq!(registry.find(1).unwrap().name, "renamed");

        assert!(matches!(registry.update(9, "x"), Err(Error::NotFound(9))));
        assert!(matches!(registry.remove(9), Err(Error::NotFound(9))));
    }

    #[test]
    fn test_restore_continues_numbering() {
        let accounts = vec![Account::new(4, "a", 1), Account::new(7, "b", 2)];
        let mut registry = AccountRegistry::restore(accounts, None).unwrap();
        assert_eq!(registry.register("c", 3).unwrap(), 8);
    }

    #[test]
    fn test_numbering_stops_at_largest_number() {
        let accounts = vec![Account::new(u32::MAX - 1, "a", 1)];
        let mut registry = AccountRegistry::restore(accounts, None).unwrap();

        assert_eq!(registry.register("b", 2).unwrap(), u32::MAX);
        assert!(matches!(registry.register("c", 3), Err(Error::CapacityExceeded)));

        let accounts = vec![Account::new(u32::MAX, "a", 1)];
        let mut registry = AccountRegistry::restore(accounts, None).unwrap();
        assert!(matches!(registry.register("b", 2), Err(Error::CapacityExceeded)));
        assert_eq!(registry.len(), 1);
        assert!(registry.find(0).is_none());
    }

    #[test]
    fn test_restore_rejects_duplicates() {
        let accounts = vec![Account::new(1, "a", 1), Account::new(1, "b", 2)];
        assert!(AccountRegistry::restore(accounts, None).is_err());
    }

    #[test]
    fn test_sorted_by_balance_is_stable_view() {
        let mut registry = registry_with(&["a", "b", "c"]);
        registry.find_mut(1).unwrap().balance = dec!(50);
        registry.find_mut(3).unwrap().balance = dec!(50);

        let order: Vec<u32> = registry
            .sorted_by_balance()
            .iter()
            .map(|a| a.account_number)
            .collect();
        assert_eq!(order, vec![2, 1, 3]);

        // registry itself keeps registration order
        let numbers: Vec<u32> = registry.iter().map(|a| a.account_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_unlock_clears_lockout() {
        let mut registry = registry_with(&["a"]);
        {
            let account = registry.find_mut(1).unwrap();
            account.locked = true;
            account.failed_attempts = 3;
        }
        registry.unlock(1).unwrap();
        let account = registry.find(1).unwrap();
        assert!(!account.locked);
        assert_eq!(account.failed_attempts, 0);
    }
}
