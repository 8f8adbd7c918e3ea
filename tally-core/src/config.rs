//! Configuration management
//!
//! Settings live in settings.json inside the data directory:
//! ```json
//! {
//!   "ledger": { "maxAccounts": 100, "auditCapacity": 10, "queueCapacity": 10,
//!               "maxFailedAttempts": 3, "twoFactor": true },
//!   "storage": { "accountsFile": "accounts.txt" }
//! }
//! ```
//! Keys that are missing fall back to defaults; keys this crate does not
//! manage are preserved on save.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::services::auth::DEFAULT_MAX_FAILED_ATTEMPTS;
use crate::services::{
    LedgerOptions, DEFAULT_AUDIT_CAPACITY, DEFAULT_MAX_ACCOUNTS, DEFAULT_QUEUE_CAPACITY,
};

/// Environment override for the one-time passcode step
pub const TWO_FACTOR_ENV: &str = "TALLY_TWO_FACTOR";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    ledger: LedgerSettings,
    #[serde(default)]
    storage: StorageSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LedgerSettings {
    #[serde(default = "default_max_accounts")]
    max_accounts: Option<usize>,
    #[serde(default = "default_audit_capacity")]
    audit_capacity: usize,
    #[serde(default = "default_queue_capacity")]
    queue_capacity: usize,
    #[serde(default = "default_max_failed_attempts")]
    max_failed_attempts: u32,
    #[serde(default = "default_true")]
    two_factor: bool,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            max_accounts: default_max_accounts(),
            audit_capacity: DEFAULT_AUDIT_CAPACITY,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
            two_factor: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StorageSettings {
    #[serde(default = "default_accounts_file")]
    accounts_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            accounts_file: default_accounts_file(),
        }
    }
}

fn default_max_accounts() -> Option<usize> {
    Some(DEFAULT_MAX_ACCOUNTS)
}

fn default_audit_capacity() -> usize {
    DEFAULT_AUDIT_CAPACITY
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

fn default_max_failed_attempts() -> u32 {
    DEFAULT_MAX_FAILED_ATTEMPTS
}

fn default_true() -> bool {
    true
}

fn default_accounts_file() -> String {
    "accounts.txt".to_string()
}

/// Tally configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub max_accounts: Option<usize>,
    pub audit_capacity: usize,
    pub queue_capacity: usize,
    pub max_failed_attempts: u32,
    pub two_factor: bool,
    pub accounts_file: String,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_raw(SettingsFile::default())
    }
}

impl Config {
    fn from_raw(raw: SettingsFile) -> Self {
        Self {
            max_accounts: raw.ledger.max_accounts,
            audit_capacity: raw.ledger.audit_capacity,
            queue_capacity: raw.ledger.queue_capacity,
            max_failed_attempts: raw.ledger.max_failed_attempts,
            two_factor: raw.ledger.two_factor,
            accounts_file: raw.storage.accounts_file.clone(),
            _raw_settings: raw,
        }
    }

    /// Load config from the data directory
    ///
    /// The passcode step can be toggled via:
    /// 1. Settings file (`ledger.twoFactor`)
    /// 2. Environment variable TALLY_TWO_FACTOR (for CI/scripting)
    pub fn load(data_dir: &Path) -> Result<Self> {
        let settings_path = data_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let mut config = Self::from_raw(raw);
        config.two_factor = match std::env::var(TWO_FACTOR_ENV).ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => config.two_factor,
        };

        Ok(config)
    }

    /// Save config to the data directory
    /// Preserves other settings that this crate doesn't manage
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            self._raw_settings.clone()
        };

        settings.ledger = LedgerSettings {
            max_accounts: self.max_accounts,
            audit_capacity: self.audit_capacity,
            queue_capacity: self.queue_capacity,
            max_failed_attempts: self.max_failed_attempts,
            two_factor: self.two_factor,
        };
        settings.storage.accounts_file = self.accounts_file.clone();

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Sizing and policy for the ledger service
    pub fn ledger_options(&self) -> LedgerOptions {
        LedgerOptions {
            max_accounts: self.max_accounts,
            audit_capacity: self.audit_capacity,
            queue_capacity: self.queue_capacity,
            max_failed_attempts: self.max_failed_attempts,
        }
    }
}
