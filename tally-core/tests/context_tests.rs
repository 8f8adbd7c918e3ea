//! Tests for opening, saving and reopening a data directory
//!
//! Run with: cargo test --test context_tests

use rust_decimal_macros::dec;
use tempfile::TempDir;

use tally_core::adapters::otp::ScriptedChannel;
use tally_core::{Credentials, Error, TallyContext};

fn data_dir_with_settings(settings: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), settings).unwrap();
    dir
}

#[test]
fn test_fresh_directory_opens_empty() {
    let dir = data_dir_with_settings(r#"{ "ledger": { "twoFactor": false } }"#);

    let context = TallyContext::new(dir.path(), ScriptedChannel::echo()).unwrap();

    assert!(context.ledger.registry().is_empty());
    assert_eq!(context.store.path(), dir.path().join("accounts.txt"));
}

#[test]
fn test_accounts_survive_reopen() {
    let dir = data_dir_with_settings(r#"{ "ledger": { "twoFactor": false } }"#);

    {
        let mut context = TallyContext::new(dir.path(), ScriptedChannel::echo()).unwrap();
        let alice = context.ledger.register("alice", 1111).unwrap().value;
        let bob = context.ledger.register("bob", 2222).unwrap().value;
        context
            .ledger
            .deposit(Credentials::new(alice, 1111), dec!(80.40))
            .unwrap();
        context
            .ledger
            .transfer(Credentials::new(alice, 1111), bob, dec!(30.15))
            .unwrap();
        // one bad PIN should persist as a failed attempt
        let _ = context.ledger.account_details(Credentials::new(bob, 9));
        context.save().unwrap();
    }

    let mut context = TallyContext::new(dir.path(), ScriptedChannel::echo()).unwrap();
    let accounts = context.ledger.accounts();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].balance, dec!(50.25));
    assert_eq!(accounts[1].balance, dec!(30.15));
    assert_eq!(accounts[1].failed_attempts, 1);

    // ledger, audit and queue are not persisted
    assert!(context.ledger.ledger().is_empty());
    assert!(context.ledger.audit().is_empty());

    // numbering continues after the highest stored account
    assert_eq!(context.ledger.register("carol", 3333).unwrap().value, 3);
}

#[test]
fn test_locked_accounts_stay_locked_after_reopen() {
    let dir = data_dir_with_settings(r#"{ "ledger": { "twoFactor": false } }"#);

    {
        let mut context = TallyContext::new(dir.path(), ScriptedChannel::echo()).unwrap();
        context.ledger.register("alice", 1111).unwrap();
        for _ in 0..3 {
            let _ = context.ledger.account_details(Credentials::new(1, 1));
        }
        context.save().unwrap();
    }

    let mut context = TallyContext::new(dir.path(), ScriptedChannel::echo()).unwrap();
    assert!(matches!(
        context.ledger.account_details(Credentials::new(1, 1111)),
        Err(Error::LockedOrUnknown)
    ));
}

#[test]
fn test_passcode_step_follows_settings() {
    let dir = data_dir_with_settings(r#"{ "ledger": { "twoFactor": true } }"#);

    let mut context =
        TallyContext::new(dir.path(), ScriptedChannel::replying([Some(1)])).unwrap();
    if !context.config.two_factor {
        // TALLY_TWO_FACTOR overrides the file in this environment
        return;
    }

    context.ledger.register("alice", 1111).unwrap();
    assert!(matches!(
        context.ledger.account_details(Credentials::new(1, 1111)),
        Err(Error::InvalidOtp)
    ));
    assert!(context.ledger.status().two_factor);
}

#[test]
fn test_custom_accounts_file_and_capacity() {
    let dir = data_dir_with_settings(
        r#"{
            "ledger": { "twoFactor": false, "maxAccounts": 1 },
            "storage": { "accountsFile": "bank.txt" }
        }"#,
    );

    let mut context = TallyContext::new(dir.path(), ScriptedChannel::echo()).unwrap();
    context.ledger.register("only", 1).unwrap();
    assert!(matches!(
        context.ledger.register("extra", 2),
        Err(Error::CapacityExceeded)
    ));
    context.save().unwrap();

    let content = std::fs::read_to_string(dir.path().join("bank.txt")).unwrap();
    assert_eq!(content, "1 only 0.00 1 0 0\n");
}

#[test]
fn test_duplicate_stored_accounts_are_rejected() {
    let dir = data_dir_with_settings(r#"{ "ledger": { "twoFactor": false } }"#);
    std::fs::write(
        dir.path().join("accounts.txt"),
        "1 alice 10.00 1111 0 0\n1 bob 5.00 2222 0 0\n",
    )
    .unwrap();

    assert!(TallyContext::new(dir.path(), ScriptedChannel::echo()).is_err());
}

#[test]
fn test_accepted_amounts_reload_exactly() {
    let dir = data_dir_with_settings(r#"{ "ledger": { "twoFactor": false } }"#);

    let deposited = {
        let mut context = TallyContext::new(dir.path(), ScriptedChannel::echo()).unwrap();
        context.ledger.register("a", 1234).unwrap();
        let creds = Credentials::new(1, 1234);

        assert!(matches!(
            context.ledger.deposit(creds, dec!(0.009)),
            Err(Error::Validation(_))
        ));
        context.ledger.deposit(creds, dec!(0.01)).unwrap();
        context.ledger.deposit(creds, dec!(19.990)).unwrap();
        let balance = context.ledger.registry().find(1).unwrap().balance;
        context.save().unwrap();
        balance
    };

    let context = TallyContext::new(dir.path(), ScriptedChannel::echo()).unwrap();
    assert_eq!(context.ledger.registry().find(1).unwrap().balance, deposited);
    assert_eq!(deposited, dec!(20.00));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("accounts.txt")).unwrap(),
        "1 a 20.00 1234 0 0\n"
    );
}

#[test]
fn test_sub_cent_stored_balance_is_rejected() {
    let dir = data_dir_with_settings(r#"{ "ledger": { "twoFactor": false } }"#);
    std::fs::write(dir.path().join("accounts.txt"), "1 a 0.009 1234 0 0\n").unwrap();

    assert!(TallyContext::new(dir.path(), ScriptedChannel::echo()).is_err());
}
