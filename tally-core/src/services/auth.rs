//! Authentication - PIN check, lockout and optional one-time passcode

use crate::domain::result::{Error, Result};
use crate::domain::AccountRegistry;
use crate::ports::{OtpChannel, OtpGenerator};

/// Default number of cumulative PIN mismatches before lockout
pub const DEFAULT_MAX_FAILED_ATTEMPTS: u32 = 3;

/// Account number and PIN as supplied by the owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials {
    pub account_number: u32,
    pub pin: u16,
}

impl Credentials {
    pub fn new(account_number: u32, pin: u16) -> Self {
        Self {
            account_number,
            pin,
        }
    }
}

/// One-time passcode step run after a correct PIN
pub struct SecondFactor {
    generator: Box<dyn OtpGenerator>,
    channel: Box<dyn OtpChannel>,
}

impl SecondFactor {
    pub fn new(generator: impl OtpGenerator + 'static, channel: impl OtpChannel + 'static) -> Self {
        Self {
            generator: Box::new(generator),
            channel: Box::new(channel),
        }
    }

    /// Issue a fresh code and check the owner's answer by exact match
    fn challenge(&mut self, account_number: u32) -> Result<()> {
        let code = self.generator.generate();
        let answer = self.channel.exchange(account_number, code)?;
        if answer != code {
            return Err(Error::InvalidOtp);
        }
        Ok(())
    }
}

pub struct Authenticator {
    max_failed_attempts: u32,
    second_factor: Option<SecondFactor>,
}

impl Authenticator {
    pub fn new(max_failed_attempts: u32) -> Self {
        Self {
            max_failed_attempts: max_failed_attempts.max(1),
            second_factor: None,
        }
    }

    pub fn with_second_factor(mut self, second_factor: SecondFactor) -> Self {
        self.second_factor = Some(second_factor);
        self
    }

    pub fn set_second_factor(&mut self, second_factor: Option<SecondFactor>) {
        self.second_factor = second_factor;
    }

    pub fn has_second_factor(&self) -> bool {
        self.second_factor.is_some()
    }

    pub fn max_failed_attempts(&self) -> u32 {
        self.max_failed_attempts
    }

    /// Authenticate against the registry and return the account number
    ///
    /// A wrong PIN bumps the account's failed-attempt counter and locks the
    /// account once the limit is reached. A correct PIN resets the counter
    /// before the passcode step, so a failed passcode does not count towards
    /// lockout.
    pub fn authenticate(
        &mut self,
        registry: &mut AccountRegistry,
        credentials: Credentials,
    ) -> Result<u32> {
        let account = match registry.find_mut(credentials.account_number) {
            Some(account) if !account.locked => account,
            _ => return Err(Error::LockedOrUnknown),
        };

        if account.pin != credentials.pin {
            account.failed_attempts = account.failed_attempts.saturating_add(1);
            if account.failed_attempts >= self.max_failed_attempts {
                account.locked = true;
                return Err(Error::Locked);
            }
            return Err(Error::InvalidPin {
                attempts_remaining: self.max_failed_attempts - account.failed_attempts,
            });
        }

        account.failed_attempts = 0;

        if let Some(second_factor) = self.second_factor.as_mut() {
            second_factor.challenge(credentials.account_number)?;
        }

        Ok(credentials.account_number)
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FAILED_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::otp::{FixedOtpGenerator, ScriptedChannel};

    fn registry() -> AccountRegistry {
        let mut registry = AccountRegistry::new(None);
        registry.register("alice", 1234).unwrap();
        registry
    }

    #[test]
    fn test_correct_pin_authenticates() {
        let mut registry = registry();
        let mut auth = Authenticator::default();
        assert_eq!(auth.authenticate(&mut registry, Credentials::new(1, 1234)).unwrap(), 1);
    }

    #[test]
    fn test_unknown_account() {
        let mut registry = registry();
        let mut auth = Authenticator::default();
        assert!(matches!(
            auth.authenticate(&mut registry, Credentials::new(2, 1234)),
            Err(Error::LockedOrUnknown)
        ));
    }

    #[test]
    fn test_wrong_pin_reports_remaining_attempts() {
        let mut registry = registry();
        let mut auth = Authenticator::default();

        assert!(matches!(
            auth.authenticate(&mut registry, Credentials::new(1, 1)),
            Err(Error::InvalidPin { attempts_remaining: 2 })
        ));
        assert!(matches!(
            auth.authenticate(&mut registry, Credentials::new(1, 1)),
            Err(Error::InvalidPin { attempts_remaining: 1 })
        ));
        assert_eq!(registry.find(1).unwrap().failed_attempts, 2);
    }

    #[test]
    fn test_third_mismatch_locks_account() {
        let mut registry = registry();
        let mut auth = Authenticator::default();

        for _ in 0..2 {
            let _ = auth.authenticate(&mut registry, Credentials::new(1, 1));
        }
        assert!(matches!(
            auth.authenticate(&mut registry, Credentials::new(1, 1)),
            Err(Error::Locked)
        ));
        assert!(registry.find(1).unwrap().locked);

        // the correct PIN no longer helps
        assert!(matches!(
            auth.authenticate(&mut registry, Credentials::new(1, 1234)),
            Err(Error::LockedOrUnknown)
        ));
        assert_eq!(registry.find(1).unwrap().failed_attempts, 3);
    }

    #[test]
    fn test_saturated_counter_still_locks() {
        let mut registry = registry();
        registry.find_mut(1).unwrap().failed_attempts = u32::MAX;
        let mut auth = Authenticator::default();

        assert!(matches!(
            auth.authenticate(&mut registry, Credentials::new(1, 1)),
            Err(Error::Locked)
        ));
        let account = registry.find(1).unwrap();
        assert!(account.locked);
        assert_eq!(account.failed_attempts, u32::MAX);
    }

    #[test]
    fn test_success_resets_counter() {
        let mut registry = registry();
        let mut auth = Authenticator::default();

        let _ = auth.authenticate(&mut registry, Credentials::new(1, 1));
        let _ = auth.authenticate(&mut registry, Credentials::new(1, 1));
        auth.authenticate(&mut registry, Credentials::new(1, 1234)).unwrap();
        assert_eq!(registry.find(1).unwrap().failed_attempts, 0);

        // counter is cumulative only since the last success
        let _ = auth.authenticate(&mut registry, Credentials::new(1, 1));
        assert!(!registry.find(1).unwrap().locked);
    }

    #[test]
    fn test_passcode_step() {
        let mut registry = registry();
        let mut auth = Authenticator::default().with_second_factor(SecondFactor::new(
            FixedOtpGenerator(654_321),
            ScriptedChannel::replying([None, Some(111_111)]),
        ));

        assert!(auth.has_second_factor());
        assert_eq!(auth.authenticate(&mut registry, Credentials::new(1, 1234)).unwrap(), 1);
        assert!(matches!(
            auth.authenticate(&mut registry, Credentials::new(1, 1234)),
            Err(Error::InvalidOtp)
        ));

        let account = registry.find(1).unwrap();
        assert_eq!(account.failed_attempts, 0);
        assert!(!account.locked);
    }

    #[test]
    fn test_passcode_not_requested_on_wrong_pin() {
        let mut registry = registry();
        // an empty script errors if the channel is ever consulted
        let mut auth = Authenticator::default().with_second_factor(SecondFactor::new(
            FixedOtpGenerator(654_321),
            ScriptedChannel::replying([]),
        ));

        assert!(matches!(
            auth.authenticate(&mut registry, Credentials::new(1, 9)),
            Err(Error::InvalidPin { .. })
        ));
    }

    #[test]
    fn test_custom_attempt_limit() {
        let mut registry = registry();
        let mut auth = Authenticator::new(1);
        assert!(matches!(
            auth.authenticate(&mut registry, Credentials::new(1, 9)),
            Err(Error::Locked)
        ));
    }
}
