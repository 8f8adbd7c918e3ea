//! Core domain entities
//!
//! Accounts, ledger records and the bounded buffers around them. These are
//! in-memory data structures with validation logic; no I/O happens here.

mod account;
mod audit;
pub mod interest;
mod ledger;
mod pending;
mod registry;
pub mod result;
mod transaction;

pub use account::{is_whole_cents, Account, AccountView, CENT_SCALE, MAX_PIN};
pub use audit::{OperationAudit, OperationKind};
pub use ledger::Ledger;
pub use pending::PendingQueue;
pub use registry::AccountRegistry;
pub use transaction::{TransactionKind, TransactionRecord};
