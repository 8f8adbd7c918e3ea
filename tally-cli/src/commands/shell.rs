//! Shell command - interactive banking menu
//!
//! Accounts are loaded once when the shell starts and written back when it
//! exits. Only command names and error kinds reach the log.

use anyhow::{anyhow, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input, Password, Select};
use rust_decimal::Decimal;
use tally_core::services::LedgerService;
use tally_core::{Credentials, Error, LogEvent, Outcome};

use super::accounts::accounts_table;
use super::status::print_status;
use super::{faq, get_context, get_logger, log_event};
use crate::output::{self, create_table, format_amount, format_locked};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    CreateAccount,
    AccountDetails,
    UpdateAccount,
    DeleteAccount,
    Deposit,
    Withdraw,
    Transfer,
    History,
    Ledger,
    QueuePending,
    ProcessPending,
    SortByBalance,
    Interest,
    DetectSuspicious,
    AuditTrail,
    Status,
    HelpDesk,
    Exit,
}

impl Action {
    const ALL: [Action; 18] = [
        Action::CreateAccount,
        Action::AccountDetails,
        Action::UpdateAccount,
        Action::DeleteAccount,
        Action::Deposit,
        Action::Withdraw,
        Action::Transfer,
        Action::History,
        Action::Ledger,
        Action::QueuePending,
        Action::ProcessPending,
        Action::SortByBalance,
        Action::Interest,
        Action::DetectSuspicious,
        Action::AuditTrail,
        Action::Status,
        Action::HelpDesk,
        Action::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            Action::CreateAccount => "Create new account",
            Action::AccountDetails => "Account details",
            Action::UpdateAccount => "Update account information",
            Action::DeleteAccount => "Delete account",
            Action::Deposit => "Deposit money",
            Action::Withdraw => "Withdraw money",
            Action::Transfer => "Transfer funds",
            Action::History => "Transaction history",
            Action::Ledger => "Full ledger",
            Action::QueuePending => "Queue pending transaction",
            Action::ProcessPending => "Process pending transactions",
            Action::SortByBalance => "Accounts by balance",
            Action::Interest => "Compound interest projection",
            Action::DetectSuspicious => "Detect suspicious activity",
            Action::AuditTrail => "Audit trail",
            Action::Status => "Status",
            Action::HelpDesk => "Help desk",
            Action::Exit => "Save and exit",
        }
    }

    /// Name used in log entries
    fn command(self) -> &'static str {
        match self {
            Action::CreateAccount => "create_account",
            Action::AccountDetails => "account_details",
            Action::UpdateAccount => "update_account",
            Action::DeleteAccount => "delete_account",
            Action::Deposit => "deposit",
            Action::Withdraw => "withdraw",
            Action::Transfer => "transfer",
            Action::History => "history",
            Action::Ledger => "ledger",
            Action::QueuePending => "queue_pending",
            Action::ProcessPending => "process_pending",
            Action::SortByBalance => "sort_by_balance",
            Action::Interest => "interest",
            Action::DetectSuspicious => "detect_suspicious",
            Action::AuditTrail => "audit_trail",
            Action::Status => "status",
            Action::HelpDesk => "help_desk",
            Action::Exit => "exit",
        }
    }
}

pub fn run() -> Result<()> {
    let logger = get_logger();
    let mut ctx = get_context()?;
    log_event(&logger, LogEvent::new("shell_started"));

    let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();
    println!("{}", "Banking System".bold());

    loop {
        println!();
        let choice = match Select::new()
            .with_prompt("Choose an option")
            .items(&labels)
            .default(0)
            .interact()
        {
            Ok(choice) => choice,
            Err(e) => {
                // terminal closed or interrupted; keep what was done so far
                ctx.save()?;
                return Err(e.into());
            }
        };

        let action = Action::ALL[choice];
        if action == Action::Exit {
            break;
        }

        match perform(&mut ctx.ledger, action) {
            Ok(()) => log_event(
                &logger,
                LogEvent::new("command_executed").with_command(action.command()),
            ),
            Err(e) => {
                output::error(&e.to_string());
                let domain = e.downcast_ref::<Error>();
                let kind = domain.map(Error::kind).unwrap_or("prompt_failed");
                let event = match domain {
                    Some(err) if err.is_auth_failure() => "auth_failed",
                    _ => "command_failed",
                };
                log_event(
                    &logger,
                    LogEvent::new(event)
                        .with_command(action.command())
                        .with_error(kind),
                );
            }
        }
    }

    ctx.save()?;
    log_event(&logger, LogEvent::new("shell_exited"));
    output::success("Accounts saved. Goodbye!");
    Ok(())
}

fn perform(ledger: &mut LedgerService, action: Action) -> Result<()> {
    match action {
        Action::CreateAccount => {
            let name: String = Input::new().with_prompt("Account holder name").interact_text()?;
            let pin = parse_pin(
                &Password::new()
                    .with_prompt("Choose a 4-digit PIN")
                    .with_confirmation("Confirm PIN", "PINs do not match")
                    .interact()?,
            )?;
            let outcome = ledger.register(&name, pin)?;
            report_audit(&outcome);
            output::success(&format!(
                "Account created. Your account number is {}",
                outcome.value
            ));
        }
        Action::AccountDetails => {
            let outcome = ledger.account_details(prompt_credentials()?)?;
            report_audit(&outcome);
            let account = outcome.value;

            let mut table = create_table();
            table.add_row(vec!["Account".to_string(), account.account_number.to_string()]);
            table.add_row(vec!["Name".to_string(), account.name]);
            table.add_row(vec!["Balance".to_string(), format_amount(account.balance)]);
            table.add_row(vec!["Status".to_string(), format_locked(account.locked)]);
            println!("{}", table);
        }
        Action::UpdateAccount => {
            let credentials = prompt_credentials()?;
            let name: String = Input::new().with_prompt("New name").interact_text()?;
            let outcome = ledger.update_account(credentials, &name)?;
            report_audit(&outcome);
            output::success("Account updated");
        }
        Action::DeleteAccount => {
            let credentials = prompt_credentials()?;
            if !Confirm::new()
                .with_prompt(format!("Delete account {}?", credentials.account_number))
                .default(false)
                .interact()?
            {
                println!("Cancelled.");
                return Ok(());
            }
            let outcome = ledger.delete_account(credentials)?;
            report_audit(&outcome);
            output::success(&format!("Account {} deleted", outcome.value.account_number));
        }
        Action::Deposit => {
            let credentials = prompt_credentials()?;
            let amount = prompt_amount("Amount to deposit")?;
            let outcome = ledger.deposit(credentials, amount)?;
            report_audit(&outcome);
            output::success(&format!(
                "Deposit successful. New balance: {}",
                format_amount(outcome.value)
            ));
        }
        Action::Withdraw => {
            let credentials = prompt_credentials()?;
            let amount = prompt_amount("Amount to withdraw")?;
            let outcome = ledger.withdraw(credentials, amount)?;
            report_audit(&outcome);
            output::success(&format!(
                "Withdrawal successful. New balance: {}",
                format_amount(outcome.value)
            ));
        }
        Action::Transfer => {
            let credentials = prompt_credentials()?;
            let receiver: u32 = Input::new()
                .with_prompt("Receiver account number")
                .interact_text()?;
            let amount = prompt_amount("Amount to transfer")?;
            let outcome = ledger.transfer(credentials, receiver, amount)?;
            report_audit(&outcome);
            output::success(&format!(
                "Transfer successful. New balance: {}",
                format_amount(outcome.value)
            ));
        }
        Action::History => {
            let account: u32 = Input::new().with_prompt("Account number").interact_text()?;
            let mut table = create_table();
            table.set_header(vec!["Type", "Amount", "Recorded"]);
            for record in ledger.history(account) {
                table.add_row(vec![
                    record.kind().to_string(),
                    format_amount(record.amount()),
                    record.recorded_at().format("%Y-%m-%d %H:%M:%S").to_string(),
                ]);
            }
            if ledger.history(account).next().is_none() {
                output::info(&format!("No transactions for account {}", account));
            } else {
                println!("{}", table);
            }
        }
        Action::Ledger => {
            if ledger.ledger().is_empty() {
                output::info("The ledger is empty");
                return Ok(());
            }
            let mut table = create_table();
            table.set_header(vec!["Account", "Type", "Amount", "Recorded"]);
            for record in ledger.ledger().iter() {
                table.add_row(vec![
                    record.account_number().to_string(),
                    record.kind().to_string(),
                    format_amount(record.amount()),
                    record.recorded_at().format("%Y-%m-%d %H:%M:%S").to_string(),
                ]);
            }
            println!("{}", table);
        }
        Action::QueuePending => {
            let account: u32 = Input::new().with_prompt("Account number").interact_text()?;
            ledger.enqueue_pending(account)?;
            output::success(&format!(
                "Queued account {} ({}/{})",
                account,
                ledger.pending().len(),
                ledger.pending().capacity()
            ));
        }
        Action::ProcessPending => {
            let drained = ledger.process_pending();
            if drained.is_empty() {
                output::info("No pending transactions");
            }
            for account in drained {
                println!("Processing pending transaction for account {}", account);
            }
        }
        Action::SortByBalance => {
            let accounts = ledger.accounts_by_balance();
            if accounts.is_empty() {
                output::info("No accounts yet");
            } else {
                println!("{}", accounts_table(&accounts));
            }
        }
        Action::Interest => {
            let credentials = prompt_credentials()?;
            let rate: Decimal = Input::new()
                .with_prompt("Annual interest rate (0.05 = 5%)")
                .interact_text()?;
            let years: u32 = Input::new().with_prompt("Years").interact_text()?;
            let projected = ledger.project_interest(credentials, rate, years)?;
            output::success(&format!(
                "Balance after {} years: {}",
                years,
                format_amount(projected)
            ));
        }
        Action::DetectSuspicious => {
            let report = ledger.detect_suspicious_activity();
            if report.is_clean() {
                output::success("No suspicious activity detected");
            }
            for pair in &report.suspicious {
                output::warning(&format!(
                    "Suspicious activity detected between accounts {} and {}",
                    pair.from, pair.to
                ));
            }
        }
        Action::AuditTrail => {
            let audit = ledger.audit();
            if audit.is_empty() {
                output::info("The audit trail is empty");
                return Ok(());
            }
            let mut table = create_table();
            table.set_header(vec!["Code", "Operation"]);
            for kind in audit.entries().iter().rev() {
                table.add_row(vec![kind.code().to_string(), kind.to_string()]);
            }
            println!("{}", table);
            println!("{}/{} entries", audit.len(), audit.capacity());

            if Confirm::new()
                .with_prompt("Clear the audit trail?")
                .default(false)
                .interact()?
            {
                let cleared = ledger.drain_audit();
                output::success(&format!("Cleared {} entries", cleared.len()));
            }
        }
        Action::Status => print_status(&ledger.status()),
        Action::HelpDesk => loop {
            let question: String = Input::new()
                .with_prompt("Ask a question ('exit' to leave)")
                .interact_text()?;
            if question.trim().eq_ignore_ascii_case("exit") {
                break;
            }
            faq::run(&question)?;
        },
        Action::Exit => {}
    }
    Ok(())
}

fn prompt_credentials() -> Result<Credentials> {
    let account_number: u32 = Input::new().with_prompt("Account number").interact_text()?;
    let pin = parse_pin(&Password::new().with_prompt("PIN").interact()?)?;
    Ok(Credentials::new(account_number, pin))
}

fn prompt_amount(prompt: &str) -> Result<Decimal> {
    let amount: Decimal = Input::new().with_prompt(prompt).interact_text()?;
    Ok(amount)
}

fn parse_pin(text: &str) -> Result<u16> {
    text.trim()
        .parse::<u16>()
        .map_err(|_| anyhow!("PIN must be a number between 0 and 9999"))
}

fn report_audit<T>(outcome: &Outcome<T>) {
    if !outcome.audited {
        output::warning("Audit trail is full; this operation was not recorded");
    }
}
