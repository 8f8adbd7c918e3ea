//! Logs command - view and manage application logs

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::get_data_dir;
use crate::output::create_table;
use tally_core::{EntryPoint, LoggingService};

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent log entries
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Show only errors
        #[arg(long)]
        errors: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear old log entries
    Clear {
        /// Delete logs older than N days
        #[arg(long, default_value = "30")]
        older_than_days: u32,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn get_logging_service() -> Result<LoggingService> {
    let data_dir = get_data_dir()?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
}

fn format_timestamp(timestamp_ms: i64) -> String {
    use chrono::{TimeZone, Utc};
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

/// Unix milliseconds `days` before `now_ms`
fn cutoff_ms(now_ms: i64, days: u32) -> i64 {
    now_ms - i64::from(days) * 24 * 60 * 60 * 1000
}

pub fn run(command: LogsCommands) -> Result<()> {
    match command {
        LogsCommands::List { limit, errors, json } => list(limit, errors, json),
        LogsCommands::Clear {
            older_than_days,
            force,
            json,
        } => clear(older_than_days, force, json),
    }
}

fn list(limit: usize, errors: bool, json: bool) -> Result<()> {
    let service = get_logging_service()?;
    let entries = if errors {
        service.get_errors(limit)?
    } else {
        service.get_recent(limit)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No log entries found.");
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec!["Time", "Entry", "Event", "Command", "Error"]);

    for entry in entries {
        let error = match entry.error_message {
            Some(message) => message.red().to_string(),
            None => String::new(),
        };

        table.add_row(vec![
            format_timestamp(entry.timestamp),
            entry.entry_point,
            entry.event,
            entry.command.unwrap_or_default(),
            error,
        ]);
    }

    println!("{}", table);
    println!(
        "{}",
        format!("{} entries in {}", service.count()?, service.log_path().display()).dimmed()
    );

    Ok(())
}

fn clear(older_than_days: u32, force: bool, json: bool) -> Result<()> {
    let service = get_logging_service()?;
    let cutoff = cutoff_ms(chrono::Utc::now().timestamp_millis(), older_than_days);

    if !force && !json {
        use dialoguer::Confirm;
        if !Confirm::new()
            .with_prompt(format!("Delete logs older than {} days?", older_than_days))
            .default(false)
            .interact()?
        {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let deleted = service.delete_before(cutoff)?;

    if json {
        println!("{}", serde_json::json!({ "deleted": deleted }));
    } else {
        println!("Deleted {} log entries", deleted);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_counts_whole_days() {
        assert_eq!(cutoff_ms(10 * 86_400_000, 3), 7 * 86_400_000);
        assert_eq!(cutoff_ms(5_000, 0), 5_000);
    }
}
