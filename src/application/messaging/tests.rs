//! Dispatcher tests driven by raw chat text

use super::CommandDispatcher;
use crate::domain::entities::Ledger;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dispatcher() -> CommandDispatcher {
    CommandDispatcher::with_default_parser().unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Run a sequence of commands and return the last reply
fn run(dispatcher: &CommandDispatcher, ledger: &mut Ledger, commands: &[&str]) -> String {
    let mut reply = String::new();
    for text in commands {
        reply = dispatcher.process_text(text, ledger).reply;
    }
    reply
}

#[test]
fn test_add_records_sum_of_amounts() {
    let d = dispatcher();
    let mut ledger = Ledger::new(1);

    let outcome = d.process_text("/add @alice @bob 10 + 5.25", &mut ledger);
    assert!(outcome.changed);
    assert_eq!(outcome.reply, "Added a payment of *15.25*");
    assert_eq!(ledger.items[0].amount, dec("15.25"));
}

#[test]
fn test_add_unparsable_amount_leaves_ledger() {
    let d = dispatcher();
    let mut ledger = Ledger::new(1);

    let outcome = d.process_text("/add @alice ten", &mut ledger);
    assert!(!outcome.changed);
    assert!(outcome.reply.starts_with("I cannot parse value ten"));
    assert!(ledger.is_empty());
}

#[test]
fn test_add_overflowing_sum_is_rejected() {
    let d = dispatcher();
    let mut ledger = Ledger::new(1);

    let outcome = d.process_text("/add @a 79228162514264337593543950335 1", &mut ledger);
    assert!(!outcome.changed);
    assert_eq!(
        outcome.reply,
        "Amount 79228162514264337593543950335 + 1 does not fit into the bill :("
    );
    assert!(ledger.is_empty());
}

#[test]
fn test_bill_total_stays_summable() {
    let d = dispatcher();
    let mut ledger = Ledger::new(1);

    let first = d.process_text("/add @a 79228162514264337593543950335", &mut ledger);
    assert_eq!(first.reply, "Added a payment of *79228162514264337593543950335.00*");

    let second = d.process_text("/add @b 79228162514264337593543950335", &mut ledger);
    assert!(!second.changed);
    assert_eq!(ledger.len(), 1);

    let status = run(&d, &mut ledger, &["/payer @carol", "/status"]);
    assert!(status.contains("Total: *79228162514264337593543950335.00*"));

    let solve = d.process_text("/solve", &mut ledger).reply;
    assert!(solve.contains("*79228162514264337593543950335.00* from @a to @carol"));
}

#[test]
fn test_add_punctuation_without_amount_records_zero() {
    let d = dispatcher();
    let mut ledger = Ledger::new(1);

    let outcome = d.process_text("/add @alice, @bob", &mut ledger);
    assert_eq!(outcome.reply, "Added a payment of *0.00*");
    assert_eq!(ledger.items[0].members, vec!["@alice".to_string(), "@bob".to_string()]);
}

#[test]
fn test_add_without_separator() {
    let d = dispatcher();
    let mut ledger = Ledger::new(1);

    let outcome = d.process_text("/add", &mut ledger);
    assert_eq!(outcome.reply, "I cannot parse your message :(\nSend */help* to show help info");
    assert!(ledger.is_empty());
}

#[test]
fn test_remove_out_of_range() {
    let d = dispatcher();
    let mut ledger = Ledger::new(1);
    run(&d, &mut ledger, &["/add @a 1", "/add @b 2", "/add @c 3"]);
    let before = ledger.clone();

    let outcome = d.process_text("/remove 5", &mut ledger);
    assert!(!outcome.changed);
    assert_eq!(outcome.reply, "Index 5 is invalid. Index must be in range [1, 3]");
    assert_eq!(ledger, before);
}

#[test]
fn test_remove_then_status_shifts_indices() {
    let d = dispatcher();
    let mut ledger = Ledger::new(1);
    run(&d, &mut ledger, &["/add @a 1", "/add @b 2", "/add @c 3"]);

    let outcome = d.process_text("/remove 2", &mut ledger);
    assert!(outcome.changed);
    assert_eq!(outcome.reply, "Bill item 2 has been removed");

    let status = d.process_text("/status", &mut ledger).reply;
    assert_eq!(
        status,
        "Bill items:\n1. *1.00* by @a\n2. *3.00* by @c\n\nTotal: *4.00*\nDefault payer is unset"
    );
}

#[test]
fn test_clear_keeps_payer() {
    let d = dispatcher();
    let mut ledger = Ledger::new(1);
    run(&d, &mut ledger, &["/payer @carol", "/add @a 1", "/clear"]);

    assert!(ledger.is_empty());
    let status = d.process_text("/status", &mut ledger).reply;
    assert_eq!(status, "Bill is empty\n\nDefault payer is @carol");
}

#[test]
fn test_solve_example() {
    let d = dispatcher();
    let mut ledger = Ledger::new(1);
    let reply = run(
        &d,
        &mut ledger,
        &["/payer @carol", "/add @alice @bob 30.00", "/add @alice 20.00", "/solve"],
    );

    assert_eq!(
        reply,
        "Payments:\n\n*35.00* from @alice to @carol\n*15.00* from @bob to @carol"
    );
}

#[test]
fn test_solve_without_payer() {
    let d = dispatcher();
    let mut ledger = Ledger::new(1);
    let reply = run(&d, &mut ledger, &["/add @alice 9", "/solve"]);
    assert_eq!(reply, "Payments:\n\n*9.00* from @alice to unset");
}

#[test]
fn test_solve_nothing_owed() {
    let d = dispatcher();
    let mut ledger = Ledger::new(1);
    let reply = run(&d, &mut ledger, &["/payer @carol", "/add @carol 10", "/solve"]);
    assert_eq!(reply, "Payments:\n\nNobody owes anything");
}

#[test]
fn test_read_only_commands_do_not_mutate() {
    let d = dispatcher();
    let mut ledger = Ledger::new(1);
    run(&d, &mut ledger, &["/payer @carol", "/add @alice @bob 30", "/add @alice 20"]);

    for text in ["/status", "/solve", "/help", "/status", "/solve"] {
        let snapshot = ledger.clone();
        let outcome = d.process_text(text, &mut ledger);
        assert!(!outcome.changed, "{} reported a change", text);
        assert_eq!(ledger, snapshot, "{} changed the ledger", text);
    }
}

#[test]
fn test_unsupported_command() {
    let d = dispatcher();
    let mut ledger = Ledger::new(1);

    for text in ["/start", "", "just chatting", "/STATUS"] {
        let outcome = d.process_text(text, &mut ledger);
        assert!(!outcome.changed);
        assert_eq!(
            outcome.reply,
            "This command is not supported\nSend */help* to show all available commands"
        );
    }
}

#[test]
fn test_payer_without_handle() {
    let d = dispatcher();
    let mut ledger = Ledger::new(1);

    let outcome = d.process_text("/payer carol", &mut ledger);
    assert!(!outcome.changed);
    assert!(ledger.payer.is_none());

    let outcome = d.process_text("/payer @carol", &mut ledger);
    assert_eq!(outcome.reply, "Set @carol as the default payer");
    assert_eq!(ledger.payer.as_deref(), Some("@carol"));
}

#[test]
fn test_help_lists_every_command() {
    let reply = dispatcher().process_text("/help", &mut Ledger::new(1)).reply;
    for name in ["/help", "/payer", "/add", "/remove", "/status", "/solve", "/clear"] {
        assert!(reply.contains(name), "help is missing {}", name);
    }
    assert!(reply.contains("/add @alice @bob 30.50"));
}

#[test]
fn test_group_mention_form() {
    let d = dispatcher();
    let mut ledger = Ledger::new(-100);
    run(&d, &mut ledger, &["/add@accountant_bot @alice 4", "/payer@accountant_bot @bob"]);

    assert_eq!(ledger.items[0].members, vec!["@alice".to_string()]);
    assert_eq!(ledger.payer.as_deref(), Some("@bob"));
}

#[test]
fn test_payer_glued_to_command() {
    let d = dispatcher();
    let mut ledger = Ledger::new(-100);

    let reply = d.process_text("/payer@carol", &mut ledger).reply;
    assert_eq!(reply, "Set @carol as the default payer");
    assert_eq!(ledger.payer.as_deref(), Some("@carol"));
}
