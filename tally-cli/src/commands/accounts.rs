//! Accounts command - list stored accounts ordered by balance

use anyhow::Result;
use comfy_table::Table;
use tally_core::AccountView;

use super::get_context;
use crate::output::{self, create_table, format_amount, format_locked};

/// Table of accounts; PINs are never shown
pub fn accounts_table(accounts: &[AccountView]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["Account", "Name", "Balance", "Failed PINs", "Status"]);
    for account in accounts {
        table.add_row(vec![
            account.account_number.to_string(),
            account.name.clone(),
            format_amount(account.balance),
            account.failed_attempts.to_string(),
            format_locked(account.locked),
        ]);
    }
    table
}

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let accounts = ctx.ledger.accounts_by_balance();

    if json {
        println!("{}", serde_json::to_string_pretty(&accounts)?);
        return Ok(());
    }

    if accounts.is_empty() {
        output::info("No accounts yet. Run `tally shell` to create one.");
        return Ok(());
    }

    println!("{}", accounts_table(&accounts));
    Ok(())
}
