//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Flat text file for the AccountStore port
//! - In-memory AccountStore for tests and embedding
//! - Random, fixed and scripted one-time passcode collaborators

pub mod flat_file;
pub mod memory;
pub mod otp;
