//! Unlock command - clear a PIN lockout in the stored accounts

use anyhow::{Context, Result};
use tally_core::LogEvent;

use super::{get_context, get_logger, log_event};
use crate::output;

pub fn run(account: u32) -> Result<()> {
    let logger = get_logger();
    let mut ctx = get_context()?;

    ctx.ledger
        .unlock_account(account)
        .with_context(|| format!("Cannot unlock account {}", account))?;
    ctx.save()?;

    log_event(&logger, LogEvent::new("command_executed").with_command("unlock"));
    output::success(&format!("Account {} unlocked", account));
    Ok(())
}
