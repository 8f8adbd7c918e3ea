//! Flat-file account store
//!
//! One account per line, space separated:
//!
//! ```text
//! 1 alice 100.00 1234 0 0
//! 2 "Mary Ann" 0.00 4321 2 0
//! ```
//!
//! Fields are account number, name, balance (two decimals), PIN, failed
//! attempts and locked flag (0/1). Names containing spaces are quoted.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::domain::{is_whole_cents, Account};
use crate::ports::AccountStore;

#[derive(Debug, Serialize, Deserialize)]
struct AccountRow {
    account_number: u32,
    name: String,
    balance: String,
    pin: u16,
    failed_attempts: u32,
    locked: u8,
}

impl AccountRow {
    /// Balances are written with two decimals, so sub-cent values are refused
    fn from_account(account: &Account) -> Result<Self> {
        if !is_whole_cents(account.balance) {
            return Err(Error::storage(format!(
                "balance {} of account {} is not in whole cents",
                account.balance, account.account_number
            )));
        }
        Ok(Self {
            account_number: account.account_number,
            name: account.name.clone(),
            balance: format!("{:.2}", account.balance),
            pin: account.pin,
            failed_attempts: account.failed_attempts,
            locked: u8::from(account.locked),
        })
    }

    fn into_account(self) -> Result<Account> {
        let balance: Decimal = self.balance.parse().map_err(|e| {
            Error::storage(format!(
                "invalid balance '{}' for account {}: {}",
                self.balance, self.account_number, e
            ))
        })?;
        let locked = match self.locked {
            0 => false,
            1 => true,
            other => {
                return Err(Error::storage(format!(
                    "invalid locked flag {} for account {}",
                    other, self.account_number
                )))
            }
        };

        Ok(Account {
            account_number: self.account_number,
            name: self.name,
            balance,
            pin: self.pin,
            failed_attempts: self.failed_attempts,
            locked,
        })
    }
}

/// Account store backed by a single text file
pub struct FlatFileStore {
    path: PathBuf,
}

impl FlatFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_rows(file: &File) -> Result<Vec<Account>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut accounts = Vec::new();
        for row in reader.deserialize::<AccountRow>() {
            accounts.push(row?.into_account()?);
        }
        Ok(accounts)
    }

    fn render(accounts: &[Account]) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        {
            let mut writer = csv::WriterBuilder::new()
                .delimiter(b' ')
                .has_headers(false)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(&mut buffer);
            for account in accounts {
                writer.serialize(AccountRow::from_account(account)?)?;
            }
            writer.flush()?;
        }
        Ok(buffer)
    }
}

impl AccountStore for FlatFileStore {
    /// A missing file is an empty account set
    fn load(&self) -> Result<Vec<Account>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        FileExt::lock_shared(&file)?;
        let result = Self::read_rows(&file);
        FileExt::unlock(&file)?;
        result
    }

    fn save(&self, accounts: &[Account]) -> Result<()> {
        let buffer = Self::render(accounts)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        FileExt::lock_exclusive(&file)?;

        // Truncate only once the lock is held
        file.set_len(0)?;
        file.write_all(&buffer)?;
        file.sync_all()?;

        FileExt::unlock(&file)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn sample_accounts() -> Vec<Account> {
        let mut alice = Account::new(1, "alice", 1234);
        alice.balance = dec!(100.5);
        let mut mary = Account::new(2, "Mary Ann", 42);
        mary.failed_attempts = 2;
        let mut locked = Account::new(5, "eve", 9999);
        locked.failed_attempts = 3;
        locked.locked = true;
        vec![alice, mary, locked]
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = FlatFileStore::new(dir.path().join("accounts.txt"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_writes_two_decimal_balances() {
        let dir = tempdir().unwrap();
        let store = FlatFileStore::new(dir.path().join("accounts.txt"));
        store.save(&sample_accounts()).unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "1 alice 100.50 1234 0 0");
        assert_eq!(lines[1], "2 \"Mary Ann\" 0.00 42 2 0");
        assert_eq!(lines[2], "5 eve 0.00 9999 3 1");
    }

    #[test]
    fn test_sub_cent_balance_is_not_written() {
        let dir = tempdir().unwrap();
        let store = FlatFileStore::new(dir.path().join("accounts.txt"));
        store.save(&sample_accounts()).unwrap();

        let mut account = Account::new(1, "a", 1234);
        account.balance = dec!(0.009);
        assert!(matches!(store.save(&[account]), Err(Error::Storage(_))));

        // previous content is kept
        assert_eq!(store.load().unwrap(), sample_accounts());
    }

    #[test]
    fn test_all_fields_survive_reload() {
        let dir = tempdir().unwrap();
        let store = FlatFileStore::new(dir.path().join("accounts.txt"));
        let accounts = sample_accounts();
        store.save(&accounts).unwrap();

        assert_eq!(store.load().unwrap(), accounts);
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let dir = tempdir().unwrap();
        let store = FlatFileStore::new(dir.path().join("accounts.txt"));
        store.save(&sample_accounts()).unwrap();
        store.save(&[Account::new(9, "solo", 1)]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].account_number, 9);
    }

    #[test]
    fn test_reads_hand_written_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.txt");
        std::fs::write(&path, "3 bob 12.30 1111 1 0\n4 carol 0.00 2222 3 1\n").unwrap();

        let loaded = FlatFileStore::new(&path).load().unwrap();
        assert_eq!(loaded[0].balance, dec!(12.30));
        assert_eq!(loaded[0].failed_attempts, 1);
        assert!(loaded[1].locked);
    }

    #[test]
    fn test_rejects_corrupt_locked_flag() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.txt");
        std::fs::write(&path, "3 bob 12.30 1111 1 7\n").unwrap();

        assert!(matches!(FlatFileStore::new(&path).load(), Err(Error::Storage(_))));
    }
}
