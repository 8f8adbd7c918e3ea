//! Config command - show or change settings.json

use anyhow::{Context, Result};
use colored::Colorize;
use tally_core::config::Config;

use super::get_data_dir;
use crate::output::{self, create_table};

fn limit_label(max_accounts: Option<usize>) -> String {
    max_accounts.map_or_else(|| "unbounded".to_string(), |max| max.to_string())
}

pub fn run(two_factor: Option<bool>, json: bool) -> Result<()> {
    let data_dir = get_data_dir()?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create tally directory: {:?}", data_dir))?;
    let mut config = Config::load(&data_dir)?;

    if let Some(enabled) = two_factor {
        config.two_factor = enabled;
        config.save(&data_dir).context("Failed to save settings")?;
        if !json {
            output::success(&format!(
                "Passcode step {}",
                if enabled { "enabled" } else { "disabled" }
            ));
        }
    }

    if json {
        println!(
            "{}",
            serde_json::json!({
                "maxAccounts": config.max_accounts,
                "auditCapacity": config.audit_capacity,
                "queueCapacity": config.queue_capacity,
                "maxFailedAttempts": config.max_failed_attempts,
                "twoFactor": config.two_factor,
                "accountsFile": config.accounts_file,
            })
        );
        return Ok(());
    }

    println!("{}", "Settings".bold());
    let mut table = create_table();
    table.add_row(vec!["Account limit".to_string(), limit_label(config.max_accounts)]);
    table.add_row(vec!["Audit capacity".to_string(), config.audit_capacity.to_string()]);
    table.add_row(vec!["Queue capacity".to_string(), config.queue_capacity.to_string()]);
    table.add_row(vec![
        "PIN attempts".to_string(),
        config.max_failed_attempts.to_string(),
    ]);
    table.add_row(vec!["Passcode step".to_string(), config.two_factor.to_string()]);
    table.add_row(vec!["Accounts file".to_string(), config.accounts_file.clone()]);
    println!("{}", table);
    Ok(())
}
