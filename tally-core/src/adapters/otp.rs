//! One-time passcode generators and channels

use std::collections::VecDeque;

use rand::Rng;

use crate::domain::result::{Error, Result};
use crate::ports::{OneTimeCode, OtpChannel, OtpGenerator};

/// Uniformly random 6-digit codes from the thread-local RNG
#[derive(Debug, Default)]
pub struct RandomOtpGenerator;

impl OtpGenerator for RandomOtpGenerator {
    fn generate(&mut self) -> OneTimeCode {
        let value = rand::thread_rng().gen_range(OneTimeCode::MIN..=OneTimeCode::MAX);
        OneTimeCode::new(value)
    }
}

/// Always produces the same code
#[derive(Debug, Clone, Copy)]
pub struct FixedOtpGenerator(pub u32);

impl OtpGenerator for FixedOtpGenerator {
    fn generate(&mut self) -> OneTimeCode {
        OneTimeCode::new(self.0)
    }
}

/// Channel with pre-recorded owner behaviour
///
/// `Echo` answers with whatever was delivered. `Scripted` replays queued
/// answers, `None` meaning "echo this one".
#[derive(Debug, Clone)]
pub enum ScriptedChannel {
    Echo,
    Scripted(VecDeque<Option<u32>>),
}

impl ScriptedChannel {
    pub fn echo() -> Self {
        ScriptedChannel::Echo
    }

    pub fn replying(answers: impl IntoIterator<Item = Option<u32>>) -> Self {
        ScriptedChannel::Scripted(answers.into_iter().collect())
    }
}

impl OtpChannel for ScriptedChannel {
    fn exchange(&mut self, _account_number: u32, code: OneTimeCode) -> Result<OneTimeCode> {
        match self {
            ScriptedChannel::Echo => Ok(code),
            ScriptedChannel::Scripted(answers) => match answers.pop_front() {
                Some(Some(answer)) => Ok(OneTimeCode::new(answer)),
                Some(None) => Ok(code),
                None => Err(Error::validation("no scripted passcode answer left")),
            },
        }
    }
}
