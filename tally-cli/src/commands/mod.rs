//! CLI command implementations

pub mod accounts;
pub mod config;
pub mod faq;
pub mod logs;
pub mod shell;
pub mod status;
pub mod unlock;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use dialoguer::Input;
use tally_core::ports::{OneTimeCode, OtpChannel};
use tally_core::{EntryPoint, LogEvent, LoggingService, TallyContext};

use crate::output;

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let data_dir = get_data_dir().ok()?;
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the tally data directory from environment or default
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("TALLY_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".tally"))
        .ok_or_else(|| anyhow!("Could not find home directory; set TALLY_DIR"))
}

/// Open the data directory, creating it if needed
pub fn get_context() -> Result<TallyContext> {
    let data_dir = get_data_dir()?;

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create tally directory: {:?}", data_dir))?;

    TallyContext::new(&data_dir, PromptChannel).context("Failed to initialize tally context")
}

/// Delivers passcodes on the terminal and reads the owner's answer back
///
/// Printing the code stands in for an out-of-band delivery such as SMS.
pub struct PromptChannel;

impl OtpChannel for PromptChannel {
    fn exchange(
        &mut self,
        account_number: u32,
        code: OneTimeCode,
    ) -> tally_core::domain::result::Result<OneTimeCode> {
        output::info(&format!(
            "One-time passcode for account {}: {}",
            account_number, code
        ));
        let answer: u32 = Input::new()
            .with_prompt("Enter passcode")
            .interact_text()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        Ok(OneTimeCode::new(answer))
    }
}
