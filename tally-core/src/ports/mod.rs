//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external collaborators. The ledger core
//! depends only on these traits, not on concrete implementations.

mod account_store;
mod otp;

pub use account_store::AccountStore;
pub use otp::{OneTimeCode, OtpChannel, OtpGenerator};
