use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use payroll_ui::{App, AppConfig, Session, csv_loader, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Interactive payroll ledger.
///
/// Keeps pay-period entries in memory, derives gross, tax and net pay, and
/// shows a running summary. Nothing is saved when the session ends.
#[derive(Debug, Parser)]
#[command(name = "payroll", version, about)]
struct Cli {
    /// Settings file. Defaults to `payroll.toml` in the working directory
    /// when that file exists.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV file of entries to add before the session starts.
    #[arg(short, long)]
    import: Option<PathBuf>,

    /// Log filter (e.g. `debug` or `payroll_core=trace`). `RUST_LOG` wins.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Answer yes to every delete/clear confirmation.
    #[arg(short, long, default_value_t = false)]
    yes: bool,

    /// Hide log output on the console.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::resolve(cli.config.as_deref()).context("Failed to load settings")?;

    let level = cli.log_level.as_deref().or(config.log_level.as_deref());
    logging::init_logging(level);
    if cli.quiet {
        logging::set_console_enabled(false)?;
    }
    if let Some(path) = cli.log_file.as_ref().or(config.log_file.as_ref()) {
        logging::enable_file_logging(path)?;
    }
    debug!(?config, "settings loaded");

    let mut session = Session::new(config.message_ttl(), config.confirm_destructive);

    if let Some(path) = &cli.import {
        let entries = csv_loader::load_from_file(path)
            .with_context(|| format!("Failed to import: {}", path.display()))?;
        let added = session.import(entries);
        info!("imported {} payroll entries from {}", added, path.display());
    }

    let stdin = io::stdin();
    let mut app = App::new(
        session,
        stdin.lock(),
        io::stdout(),
        config.currency_symbol.clone(),
        cli.yes,
    );
    app.run().context("Payroll session failed")?;

    Ok(())
}
