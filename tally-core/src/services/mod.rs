//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. The ledger
//! service is the single orchestrator; authentication and integrity checks
//! are the pieces it composes.

pub mod auth;
pub mod integrity;
mod ledger;
pub mod logging;

pub use auth::{Authenticator, Credentials, SecondFactor};
pub use integrity::{IntegrityDetector, IntegrityReport, SuspiciousPair, TransferEdge};
pub use ledger::{
    LedgerOptions, LedgerService, LedgerStatus, DEFAULT_AUDIT_CAPACITY, DEFAULT_MAX_ACCOUNTS,
    DEFAULT_QUEUE_CAPACITY,
};
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
