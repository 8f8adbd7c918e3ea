//! Status command - summary of the stored accounts

use anyhow::Result;
use colored::Colorize;
use tally_core::LedgerStatus;

use super::get_context;
use crate::output::{create_table, format_amount};

pub fn print_status(status: &LedgerStatus) {
    println!("{}", "Ledger Status".bold());
    println!();

    let mut table = create_table();
    table.add_row(vec!["Accounts".to_string(), status.total_accounts.to_string()]);
    table.add_row(vec!["Locked".to_string(), status.locked_accounts.to_string()]);
    table.add_row(vec!["Total balance".to_string(), format_amount(status.total_balance)]);
    table.add_row(vec!["Ledger records".to_string(), status.ledger_records.to_string()]);
    table.add_row(vec![
        "Audit trail".to_string(),
        format!("{}/{}", status.audit_depth, status.audit_capacity),
    ]);
    table.add_row(vec![
        "Pending queue".to_string(),
        format!("{}/{}", status.pending_depth, status.pending_capacity),
    ]);
    table.add_row(vec![
        "Passcode step".to_string(),
        if status.two_factor { "on" } else { "off" }.to_string(),
    ]);

    println!("{}", table);
}

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let status = ctx.ledger.status();

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    print_status(&status);
    Ok(())
}
