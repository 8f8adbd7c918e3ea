//! One-time passcode ports

use std::fmt;

use crate::domain::result::Result;

/// A 6-digit one-time passcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneTimeCode(u32);

impl OneTimeCode {
    pub const MIN: u32 = 100_000;
    pub const MAX: u32 = 999_999;

    /// Wrap a raw value. Out-of-range values are kept so that a mistyped
    /// response simply fails verification.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn is_well_formed(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }
}

impl fmt::Display for OneTimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}", self.0)
    }
}

/// Source of fresh passcodes, one per authentication attempt
pub trait OtpGenerator {
    fn generate(&mut self) -> OneTimeCode;
}

/// Out-of-band delivery of a passcode and collection of the owner's answer
pub trait OtpChannel {
    /// Deliver `code` to the owner of `account_number` and return what they
    /// typed back
    fn exchange(&mut self, account_number: u32, code: OneTimeCode) -> Result<OneTimeCode>;
}
