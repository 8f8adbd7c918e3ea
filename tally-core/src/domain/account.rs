//! Account domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest PIN accepted (PINs are 4 digits)
pub const MAX_PIN: u16 = 9999;

/// Money is held in whole cents
pub const CENT_SCALE: u32 = 2;

/// True when `amount` has no fraction of a cent
pub fn is_whole_cents(amount: Decimal) -> bool {
    amount.normalize().scale() <= CENT_SCALE
}

/// A bank account owned by a single holder
///
/// The PIN is stored as-is; authentication here is a PIN check plus an
/// optional one-time passcode, not a cryptographic scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_number: u32,
    pub name: String,
    pub balance: Decimal,
    pub pin: u16,
    /// Cumulative PIN mismatches since the last successful PIN check
    pub failed_attempts: u32,
    pub locked: bool,
}

impl Account {
    /// Create a fresh account with a zero balance
    pub fn new(account_number: u32, name: impl Into<String>, pin: u16) -> Self {
        Self {
            account_number,
            name: name.into(),
            balance: Decimal::ZERO,
            pin,
            failed_attempts: 0,
            locked: false,
        }
    }

    /// Validate account data
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.account_number == 0 {
            return Err("account number must be positive");
        }
        Self::validate_name(&self.name)?;
        Self::validate_pin(self.pin)?;
        if self.balance.is_sign_negative() && !self.balance.is_zero() {
            return Err("balance cannot be negative");
        }
        if !is_whole_cents(self.balance) {
            return Err("balance cannot hold fractions of a cent");
        }
        Ok(())
    }

    pub fn validate_name(name: &str) -> Result<(), &'static str> {
        if name.trim().is_empty() {
            return Err("account name cannot be empty");
        }
        Ok(())
    }

    pub fn validate_pin(pin: u16) -> Result<(), &'static str> {
        if pin > MAX_PIN {
            return Err("PIN must be 4 digits");
        }
        Ok(())
    }

    /// Public projection without the PIN
    pub fn view(&self) -> AccountView {
        AccountView {
            account_number: self.account_number,
            name: self.name.clone(),
            balance: self.balance,
            failed_attempts: self.failed_attempts,
            locked: self.locked,
        }
    }
}

/// Account as shown to its owner or an operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountView {
    pub account_number: u32,
    pub name: String,
    pub balance: Decimal,
    pub failed_attempts: u32,
    pub locked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_starts_empty() {
        let account = Account::new(1, "alice", 1234);
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.failed_attempts, 0);
        assert!(!account.locked);
    }

    #[test]
    fn test_account_validation() {
        let mut account = Account::new(1, "alice", 1234);
        assert!(account.validate().is_ok());

        account.name = "  ".to_string();
        assert!(account.validate().is_err());

        account.name = "alice".to_string();
        account.pin = 12345;
        assert!(account.validate().is_err());
    }

    #[test]
    fn test_sub_cent_balance_rejected() {
        let mut account = Account::new(1, "alice", 1234);
        account.balance = Decimal::new(1_500, 3);
        assert!(account.validate().is_ok());

        account.balance = Decimal::new(9, 3);
        assert!(account.validate().is_err());
        assert!(!is_whole_cents(Decimal::new(10_001, 3)));
    }

    #[test]
    fn test_view_hides_pin() {
        let account = Account::new(3, "carol", 4321);
        let json = serde_json::to_string(&account.view()).unwrap();
        assert!(!json.contains("pin"));
        assert!(json.contains("carol"));
    }
}
