//! CSV loader for batches of payroll entries.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does **not** matter. Header
//! names are case-sensitive and every column is required.
//!
//! | Column            | Type   | Notes                                  |
//! |-------------------|--------|----------------------------------------|
//! | `name`            | string | Employee name, free text               |
//! | `hours`           | number | Hours worked in the period             |
//! | `rate`            | number | Pay per hour                           |
//! | `tax_percent`     | number | e.g. `10` for 10%                      |
//! | `other_deduction` | number | Flat deduction, `0` if none            |
//!
//! Numeric cells are read the same way the entry form reads them, so an
//! unreadable cell becomes `NaN` instead of failing the whole file.
//!
//! ### Example
//!
//! ```csv
//! name,hours,rate,tax_percent,other_deduction
//! Alice,40,25,10,50
//! Bob,20,15,5,0
//! ```
use std::path::Path;

use payroll_core::PayrollEntry;
use serde::Deserialize;

use crate::utils::parse_number;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    hours: String,
    rate: String,
    tax_percent: String,
    other_deduction: String,
}

impl From<CsvRow> for PayrollEntry {
    fn from(row: CsvRow) -> Self {
        PayrollEntry {
            name: row.name,
            hours: parse_number(&row.hours),
            rate: parse_number(&row.rate),
            tax_percent: parse_number(&row.tax_percent),
            other_deduction: parse_number(&row.other_deduction),
        }
    }
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The CSV structure is invalid (missing column, wrong field count).
    /// `row` is 1-based, the header being row 0.
    #[error("CSV parse error on row {row}: {source}")]
    Parse {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Parse CSV text and return the entries in file order.
///
/// # Errors
///
/// [`CsvLoadError::Parse`] if the CSV is structurally invalid or a required
/// column is missing.
pub fn load_from_str(input: &str) -> Result<Vec<PayrollEntry>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            result
                .map(PayrollEntry::from)
                .map_err(|source| CsvLoadError::Parse {
                    row: idx + 1,
                    source,
                })
        })
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<PayrollEntry>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let entries = load_from_str(&contents)?;
    tracing::debug!(path = %path.display(), rows = entries.len(), "loaded payroll CSV");
    Ok(entries)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
