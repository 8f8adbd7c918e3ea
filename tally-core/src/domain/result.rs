//! Result and error types for the core library

use serde::Serialize;
use thiserror::Error;

/// Core library error type
///
/// Every variant is recoverable: a failed operation leaves the ledger,
/// registry, audit stack and pending queue as they were, except for the
/// failed-attempt counter bumped by a wrong PIN.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Account not found: {0}")]
    NotFound(u32),

    #[error("Authentication failed or account is locked")]
    LockedOrUnknown,

    #[error("Too many failed attempts. Account locked")]
    Locked,

    #[error("Invalid PIN. Attempts left: {attempts_remaining}")]
    InvalidPin { attempts_remaining: u32 },

    #[error("Invalid one-time passcode")]
    InvalidOtp,

    #[error("Insufficient balance")]
    InsufficientFunds,

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Receiver's account not found: {0}")]
    ReceiverNotFound(u32),

    #[error("Account limit reached")]
    CapacityExceeded,

    #[error("Operation log full")]
    AuditFull,

    #[error("Pending transaction queue is full")]
    QueueFull,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// True for every failure produced by the authenticator
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Error::LockedOrUnknown
                | Error::Locked
                | Error::InvalidPin { .. }
                | Error::InvalidOtp
        )
    }

    /// Stable, data-free name of the error kind (safe to log)
    pub fn kind(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "not_found",
            Error::LockedOrUnknown => "locked_or_unknown",
            Error::Locked => "locked",
            Error::InvalidPin { .. } => "invalid_pin",
            Error::InvalidOtp => "invalid_otp",
            Error::InsufficientFunds => "insufficient_funds",
            Error::InvalidAmount => "invalid_amount",
            Error::ReceiverNotFound(_) => "receiver_not_found",
            Error::CapacityExceeded => "capacity_exceeded",
            Error::AuditFull => "audit_full",
            Error::QueueFull => "queue_full",
            Error::Validation(_) => "validation",
            Error::Storage(_) => "storage",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Value produced by an audited operation
///
/// `audited` is false when the operation ran but the audit stack was already
/// full, so the action left no trace in the trailing audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome<T> {
    pub value: T,
    pub audited: bool,
}

impl<T> Outcome<T> {
    pub fn new(value: T, audited: bool) -> Self {
        Self { value, audited }
    }

    /// Transform the carried value, keeping the audit flag
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            audited: self.audited,
        }
    }
}
