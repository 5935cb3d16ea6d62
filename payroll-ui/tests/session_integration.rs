//! Scripted end-to-end sessions: commands in, rendered text out.

use std::time::Duration;

use payroll_ui::{App, Session};
use pretty_assertions::assert_eq;

fn run(
    script: &str,
    assume_yes: bool,
) -> (Session, String) {
    let session = Session::new(Duration::from_secs(3), true);
    let mut app = App::new(session, script.as_bytes(), Vec::new(), "₱", assume_yes);
    app.run().expect("in-memory session should not fail");

    let (session, output) = app.into_parts();
    (session, String::from_utf8(output).unwrap())
}

const ALICE_AND_BOB: &str = "\
add
Alice
40
25
10
50
add
Bob
20
15
5
0
";

#[test]
fn test_add_two_records_shows_totals() {
    let (session, out) = run(&format!("{ALICE_AND_BOB}quit\n"), false);

    let summary = session.ledger().summarize();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.total_net, 1135.0);
    assert!(out.contains("Total Gross:      ₱1,300.00"));
    assert!(out.contains("Total Deductions: ₱165.00"));
    assert!(out.contains("Total Net:        ₱1,135.00"));
}

#[test]
fn test_edit_and_save_updates_in_place() {
    // Edit row 1, keep every value except the rate.
    let script = format!("{ALICE_AND_BOB}edit 1\nsave\n\n\n30\n\n\nquit\n");
    let (session, out) = run(&script, false);

    let records = session.ledger().list();
    assert_eq!(records[0].name, "Alice");
    assert_eq!(records[0].gross, 1200.0);
    assert_eq!(records[0].net, 1030.0);
    assert_eq!(records[1].name, "Bob");
    assert!(out.contains("Editing record..."));
    assert!(out.contains("Rate [25]: "));
    assert!(out.contains("Record updated successfully!"));
    assert!(out.contains("Total Net:        ₱1,315.00"));
}

#[test]
fn test_delete_confirmed_removes_row() {
    let script = format!("{ALICE_AND_BOB}delete 2\ny\nquit\n");
    let (session, out) = run(&script, false);

    assert_eq!(session.ledger().len(), 1);
    assert_eq!(session.ledger().list()[0].name, "Alice");
    assert!(out.contains("Are you sure you want to delete this record? [y/N] "));
    assert!(out.contains("Record deleted."));
    assert!(out.contains("Total Net:        ₱850.00"));
}

#[test]
fn test_delete_declined_keeps_row() {
    let script = format!("{ALICE_AND_BOB}delete 2\nn\nquit\n");
    let (session, out) = run(&script, false);

    assert_eq!(session.ledger().len(), 2);
    assert!(out.contains("Cancelled."));
}

#[test]
fn test_clear_with_assume_yes() {
    let script = format!("{ALICE_AND_BOB}clear\nquit\n");
    let (session, out) = run(&script, true);

    assert!(session.ledger().is_empty());
    assert!(!out.contains("[y/N]"));
    assert!(out.contains("All records cleared."));
    assert!(out.ends_with("> "));
}

#[test]
fn test_non_numeric_input_shows_nan() {
    let script = "add\nDana\nlots\n25\n10\n0\nquit\n";
    let (_, out) = run(script, false);

    assert!(out.contains("Total Gross:      ₱NaN"));
    assert!(out.contains("Total Net:        ₱NaN"));
}

#[test]
fn test_edit_zero_gross_record_keeps_tax_percent() {
    let script = "add\nIdle\n0\n25\n12\n0\nedit 1\nsave\n\n40\n\n\n\nquit\n";
    let (session, out) = run(script, false);

    let record = &session.ledger().list()[0];
    assert_eq!(record.gross, 1000.0);
    assert_eq!(record.tax_amount, 120.0);
    assert_eq!(record.net, 880.0);
    assert!(out.contains("Tax % [12]: "));
}

#[test]
fn test_edit_prompt_shows_entered_tax_percent() {
    let script = "add\nCruz\n40\n33.33\n7\n0\nedit 1\nreset\nquit\n";
    let (_, out) = run(script, false);

    assert!(out.contains("Tax %:           7\n"));
}
