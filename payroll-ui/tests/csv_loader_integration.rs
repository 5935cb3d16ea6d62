//! Integration tests that exercise the loader against on-disk fixture files.
//!
//! These complement the unit tests inside csv_loader.rs (which all use
//! inline string literals) by verifying the full read-from-disk path and the
//! hand-off into a session.

use std::path::{Path, PathBuf};
use std::time::Duration;

use payroll_core::PayrollEntry;
use payroll_ui::{AppConfig, Session, csv_loader};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_fixture_file_succeeds() {
    let entries = csv_loader::load_from_file(&fixture("sample_payroll.csv"))
        .expect("fixture file should load without error");

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0], PayrollEntry::new("Alice", 40.0, 25.0, 10.0, 50.0));
    assert_eq!(entries[2], PayrollEntry::new("Carol", 35.0, 20.0, 12.0, 25.0));
}

#[test]
fn test_imported_fixture_totals() {
    let entries = csv_loader::load_from_file(&fixture("sample_payroll.csv")).unwrap();
    let mut session = Session::new(Duration::from_secs(3), true);

    let added = session.import(entries);

    assert_eq!(added, 3);
    let summary = session.ledger().summarize();
    assert_eq!(summary.count, 3);
    assert_eq!(summary.total_gross, 2000.0);
    assert_eq!(summary.total_deductions, 274.0);
    assert_eq!(summary.total_net, 1726.0);

    let names: Vec<_> = session.ledger().list().into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
}

#[test]
fn test_settings_fixture_loads() {
    let config = AppConfig::load(&fixture("settings.toml")).expect("settings should parse");

    assert_eq!(config.currency_symbol, "$");
    assert_eq!(config.message_ttl(), Duration::from_secs(5));
    assert!(!config.confirm_destructive);
    assert_eq!(config.log_level.as_deref(), Some("warn"));
    assert_eq!(config.log_file, None);
}
