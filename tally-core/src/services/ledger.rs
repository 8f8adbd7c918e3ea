//! Ledger service - account lifecycle and money movement
//!
//! Owns the registry, ledger, audit stack and pending queue. Every operation
//! on an account authenticates and mutates in one `&mut self` call, so no
//! other operation can interleave between the credential check and the
//! balance change.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::interest;
use crate::domain::result::{Error, Outcome, Result};
use crate::domain::{
    is_whole_cents, Account, AccountRegistry, AccountView, Ledger, OperationAudit, OperationKind,
    PendingQueue, TransactionKind, TransactionRecord,
};
use crate::services::auth::{Authenticator, Credentials, SecondFactor, DEFAULT_MAX_FAILED_ATTEMPTS};
use crate::services::integrity::{IntegrityDetector, IntegrityReport};

/// Default audit stack capacity
pub const DEFAULT_AUDIT_CAPACITY: usize = 10;
/// Default pending queue capacity
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;
/// Default upper bound on live accounts
pub const DEFAULT_MAX_ACCOUNTS: usize = 100;

/// Sizing and policy for a ledger service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerOptions {
    pub max_accounts: Option<usize>,
    pub audit_capacity: usize,
    pub queue_capacity: usize,
    pub max_failed_attempts: u32,
}

impl Default for LedgerOptions {
    fn default() -> Self {
        Self {
            max_accounts: Some(DEFAULT_MAX_ACCOUNTS),
            audit_capacity: DEFAULT_AUDIT_CAPACITY,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
        }
    }
}

pub struct LedgerService {
    registry: AccountRegistry,
    ledger: Ledger,
    audit: OperationAudit,
    pending: PendingQueue,
    authenticator: Authenticator,
}

impl LedgerService {
    pub fn new(options: LedgerOptions) -> Self {
        Self::with_registry(AccountRegistry::new(options.max_accounts), options)
    }

    /// Start from previously persisted accounts
    pub fn restore(options: LedgerOptions, accounts: Vec<Account>) -> Result<Self> {
        let registry = AccountRegistry::restore(accounts, options.max_accounts)?;
        Ok(Self::with_registry(registry, options))
    }

    fn with_registry(registry: AccountRegistry, options: LedgerOptions) -> Self {
        Self {
            registry,
            ledger: Ledger::new(),
            audit: OperationAudit::new(options.audit_capacity),
            pending: PendingQueue::new(options.queue_capacity),
            authenticator: Authenticator::new(options.max_failed_attempts),
        }
    }

    /// Require a one-time passcode after every correct PIN
    pub fn with_second_factor(mut self, second_factor: SecondFactor) -> Self {
        self.authenticator.set_second_factor(Some(second_factor));
        self
    }

    // === Accounts ===

    pub fn register(&mut self, name: &str, pin: u16) -> Result<Outcome<u32>> {
        let number = self.registry.register(name, pin)?;
        Ok(self.completed(OperationKind::CreateAccount, number))
    }

    pub fn account_details(&mut self, credentials: Credentials) -> Result<Outcome<AccountView>> {
        let number = self.authenticate(credentials)?;
        let view = self.account(number)?.view();
        Ok(self.completed(OperationKind::DisplayAccount, view))
    }

    pub fn update_account(
        &mut self,
        credentials: Credentials,
        new_name: &str,
    ) -> Result<Outcome<()>> {
        Account::validate_name(new_name).map_err(Error::validation)?;
        let number = self.authenticate(credentials)?;
        self.registry.update(number, new_name)?;
        Ok(self.completed(OperationKind::UpdateAccount, ()))
    }

    /// Delete an account; its ledger records stay in place
    pub fn delete_account(&mut self, credentials: Credentials) -> Result<Outcome<Account>> {
        let number = self.authenticate(credentials)?;
        let removed = self.registry.remove(number)?;
        Ok(self.completed(OperationKind::DeleteAccount, removed))
    }

    /// Clear a lockout (operator action, not authenticated)
    pub fn unlock_account(&mut self, account_number: u32) -> Result<()> {
        self.registry.unlock(account_number)
    }

    // === Money movement ===

    /// Returns the new balance
    pub fn deposit(
        &mut self,
        credentials: Credentials,
        amount: Decimal,
    ) -> Result<Outcome<Decimal>> {
        ensure_valid_amount(amount)?;
        let number = self.authenticate(credentials)?;

        let account = self.account_mut(number)?;
        let balance = account
            .balance
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        account.balance = balance;

        self.ledger.record(number, TransactionKind::Deposit, amount);
        Ok(self.completed(OperationKind::Deposit, balance))
    }

    /// Returns the new balance
    pub fn withdraw(
        &mut self,
        credentials: Credentials,
        amount: Decimal,
    ) -> Result<Outcome<Decimal>> {
        ensure_valid_amount(amount)?;
        let number = self.authenticate(credentials)?;

        let account = self.account_mut(number)?;
        if amount > account.balance {
            return Err(Error::InsufficientFunds);
        }
        account.balance -= amount;
        let balance = account.balance;

        self.ledger.record(number, TransactionKind::Withdraw, amount);
        Ok(self.completed(OperationKind::Withdraw, balance))
    }

    /// Move `amount` to `receiver`; returns the sender's new balance
    ///
    /// Writes a `TransferOut` for the sender immediately followed by a
    /// `TransferIn` for the receiver, both carrying the same amount.
    pub fn transfer(
        &mut self,
        credentials: Credentials,
        receiver: u32,
        amount: Decimal,
    ) -> Result<Outcome<Decimal>> {
        ensure_valid_amount(amount)?;
        let sender = self.authenticate(credentials)?;

        if receiver == sender {
            return Err(Error::validation("cannot transfer to the same account"));
        }
        let receiver_balance = self
            .registry
            .find(receiver)
            .ok_or(Error::ReceiverNotFound(receiver))?
            .balance;
        let sender_balance = self.account(sender)?.balance;
        if amount > sender_balance {
            return Err(Error::InsufficientFunds);
        }
        let credited = receiver_balance
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;

        let debited = sender_balance - amount;
        self.account_mut(sender)?.balance = debited;
        self.account_mut(receiver)?.balance = credited;

        self.ledger.record(sender, TransactionKind::TransferOut, amount);
        self.ledger.record(receiver, TransactionKind::TransferIn, amount);
        Ok(self.completed(OperationKind::Transfer, debited))
    }

    /// Balance after `years` of compounding at `annual_rate`; changes nothing
    pub fn project_interest(
        &mut self,
        credentials: Credentials,
        annual_rate: Decimal,
        years: u32,
    ) -> Result<Decimal> {
        let number = self.authenticate(credentials)?;
        interest::compound(self.account(number)?.balance, annual_rate, years)
    }

    // === Ledger views ===

    /// Records for one account, newest first
    pub fn history(
        &self,
        account_number: u32,
    ) -> impl Iterator<Item = &TransactionRecord> + Clone + '_ {
        self.ledger.history(account_number)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn detect_suspicious_activity(&self) -> IntegrityReport {
        IntegrityDetector::detect(&self.ledger, &self.registry)
    }

    // === Pending queue ===

    pub fn enqueue_pending(&mut self, account_number: u32) -> Result<()> {
        if !self.registry.contains(account_number) {
            return Err(Error::NotFound(account_number));
        }
        self.pending.enqueue(account_number)
    }

    /// Drain the pending queue in FIFO order
    pub fn process_pending(&mut self) -> Vec<u32> {
        self.pending.drain_all()
    }

    pub fn pending(&self) -> &PendingQueue {
        &self.pending
    }

    // === Inspection ===

    pub fn audit(&self) -> &OperationAudit {
        &self.audit
    }

    /// Empty the audit stack, most recent first
    pub fn drain_audit(&mut self) -> Vec<OperationKind> {
        self.audit.drain()
    }

    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    /// Accounts in registry order, for persistence
    pub fn accounts(&self) -> &[Account] {
        self.registry.accounts()
    }

    pub fn accounts_by_balance(&self) -> Vec<AccountView> {
        self.registry
            .sorted_by_balance()
            .into_iter()
            .map(Account::view)
            .collect()
    }

    pub fn status(&self) -> LedgerStatus {
        LedgerStatus {
            total_accounts: self.registry.len(),
            locked_accounts: self.registry.iter().filter(|a| a.locked).count(),
            total_balance: self.registry.iter().map(|a| a.balance).sum(),
            ledger_records: self.ledger.len(),
            audit_depth: self.audit.len(),
            audit_capacity: self.audit.capacity(),
            pending_depth: self.pending.len(),
            pending_capacity: self.pending.capacity(),
            two_factor: self.authenticator.has_second_factor(),
        }
    }

    // === Internals ===

    fn authenticate(&mut self, credentials: Credentials) -> Result<u32> {
        self.authenticator.authenticate(&mut self.registry, credentials)
    }

    fn account(&self, number: u32) -> Result<&Account> {
        self.registry.find(number).ok_or(Error::NotFound(number))
    }

    fn account_mut(&mut self, number: u32) -> Result<&mut Account> {
        self.registry.find_mut(number).ok_or(Error::NotFound(number))
    }

    /// Record a completed action; a full audit stack is reported, not fatal
    fn completed<T>(&mut self, kind: OperationKind, value: T) -> Outcome<T> {
        let audited = self.audit.push(kind).is_ok();
        Outcome::new(value, audited)
    }
}

/// Amounts are positive and in whole cents
fn ensure_valid_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount);
    }
    if !is_whole_cents(amount) {
        return Err(Error::validation("amount cannot include fractions of a cent"));
    }
    Ok(())
}

/// Snapshot of the ledger service state
#[derive(Debug, Clone, Serialize)]
pub struct LedgerStatus {
    pub total_accounts: usize,
    pub locked_accounts: usize,
    pub total_balance: Decimal,
    pub ledger_records: usize,
    pub audit_depth: usize,
    pub audit_capacity: usize,
    pub pending_depth: usize,
    pub pending_capacity: usize,
    pub two_factor: bool,
}
