//! Tally CLI - personal banking ledger in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{accounts, config, faq, logs, shell, status, unlock};
use commands::logs::LogsCommands;

/// Tally - personal banking ledger in your terminal
#[derive(Parser)]
#[command(name = "tally", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive banking menu (default)
    Shell,

    /// List stored accounts ordered by balance
    Accounts {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a summary of the stored accounts
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Clear the lockout on an account
    Unlock {
        /// Account number to unlock
        account: u32,
    },

    /// Ask the help desk a question
    Faq {
        /// Question text, or part of it
        question: Vec<String>,
    },

    /// Show or change settings
    Config {
        /// Turn the one-time passcode step on or off
        #[arg(long)]
        two_factor: Option<bool>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::run(),
        Commands::Accounts { json } => accounts::run(json),
        Commands::Status { json } => status::run(json),
        Commands::Unlock { account } => unlock::run(account),
        Commands::Faq { question } => faq::run(&question.join(" ")),
        Commands::Config { two_factor, json } => config::run(two_factor, json),
        Commands::Logs { command } => logs::run(command),
    }
}
