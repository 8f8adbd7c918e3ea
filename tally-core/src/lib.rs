//! Tally Core - ledger and integrity logic for a personal banking ledger
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Accounts, ledger records, audit stack and pending queue
//! - **ports**: Trait definitions for external collaborators (AccountStore, OTP)
//! - **services**: Ledger orchestration, authentication, integrity detection, logging
//! - **adapters**: Concrete implementations (flat file, in-memory, OTP)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use adapters::flat_file::FlatFileStore;
use adapters::otp::RandomOtpGenerator;
use config::Config;
use ports::{AccountStore, OtpChannel};
use services::{LedgerService, SecondFactor};

// Re-export commonly used types at crate root
pub use domain::result::{Error, Outcome};
pub use domain::{Account, AccountView, OperationKind, TransactionKind, TransactionRecord};
pub use services::{
    Credentials, EntryPoint, IntegrityReport, LedgerStatus, LogEntry, LogEvent, LoggingService,
};

/// Main context for Tally operations
///
/// Holds the configuration, the account store and the ledger service built
/// from the stored accounts. Ledger records, audit stack and pending queue
/// start empty every time a context is opened.
pub struct TallyContext {
    pub config: Config,
    pub data_dir: PathBuf,
    pub store: FlatFileStore,
    pub ledger: LedgerService,
}

impl TallyContext {
    /// Open the data directory, loading configuration and accounts
    ///
    /// `channel` delivers one-time passcodes when the passcode step is enabled
    /// in the configuration; otherwise it is unused.
    pub fn new(data_dir: &Path, channel: impl OtpChannel + 'static) -> Result<Self> {
        let config = Config::load(data_dir)?;
        let store = FlatFileStore::new(data_dir.join(&config.accounts_file));

        let accounts = store
            .load()
            .with_context(|| format!("Failed to load accounts from {:?}", store.path()))?;
        let mut ledger = LedgerService::restore(config.ledger_options(), accounts)
            .context("Stored accounts are inconsistent")?;

        if config.two_factor {
            ledger = ledger.with_second_factor(SecondFactor::new(RandomOtpGenerator, channel));
        }

        Ok(Self {
            config,
            data_dir: data_dir.to_path_buf(),
            store,
            ledger,
        })
    }

    /// Write the current account set back to the store
    pub fn save(&self) -> Result<()> {
        self.store
            .save(self.ledger.accounts())
            .with_context(|| format!("Failed to save accounts to {:?}", self.store.path()))
    }
}
