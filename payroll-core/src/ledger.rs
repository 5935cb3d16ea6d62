//! The in-memory payroll ledger.
//!
//! [`PayrollLedger`] is the single owner of the ordered record collection and
//! the only source of totals. Callers never get a mutable handle to the
//! records: every change goes through [`add`](PayrollLedger::add),
//! [`update`](PayrollLedger::update), [`delete`](PayrollLedger::delete) or
//! [`clear`](PayrollLedger::clear), and reads return copies.
//!
//! # Example
//!
//! ```
//! use payroll_core::{PayrollEntry, PayrollLedger};
//!
//! let mut ledger = PayrollLedger::new();
//! let alice = ledger.add(PayrollEntry::new("Alice", 40.0, 25.0, 10.0, 50.0));
//! ledger.add(PayrollEntry::new("Bob", 20.0, 15.0, 5.0, 0.0));
//!
//! let summary = ledger.summarize();
//! assert_eq!(summary.count, 2);
//! assert_eq!(summary.total_net, 1135.0);
//!
//! ledger
//!     .update(alice.id, PayrollEntry::new("Alice", 40.0, 30.0, 10.0, 50.0))
//!     .unwrap();
//! assert_eq!(ledger.summarize().total_net, 1315.0);
//! ```

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calculations::compute_derived;
use crate::models::{IdAllocator, PayrollEntry, PayrollRecord, PayrollSummary, RecordId};

/// Errors surfaced by ledger operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// No record with the given id exists in the ledger.
    #[error("payroll record {0} not found")]
    NotFound(RecordId),
}

/// Ordered, in-memory collection of payroll records.
#[derive(Debug, Default)]
pub struct PayrollLedger {
    records: Vec<PayrollRecord>,
    ids: IdAllocator,
}

impl PayrollLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new record built from `entry` and returns a copy of it.
    pub fn add(
        &mut self,
        entry: PayrollEntry,
    ) -> PayrollRecord {
        let id = self.ids.allocate();
        let record = Self::build_record(id, entry);

        debug!(%id, name = %record.name, net = record.net, "payroll record added");
        self.records.push(record.clone());
        record
    }

    /// Replaces the record with `id` in place, recomputing every derived field.
    ///
    /// The record keeps its id and its position in the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if no record has this id. The ledger
    /// is left untouched in that case.
    pub fn update(
        &mut self,
        id: RecordId,
        entry: PayrollEntry,
    ) -> Result<PayrollRecord, LedgerError> {
        let Some(index) = self.position(id) else {
            warn!(%id, "update requested for unknown payroll record");
            return Err(LedgerError::NotFound(id));
        };

        let record = Self::build_record(id, entry);
        self.records[index] = record.clone();

        debug!(%id, position = index, net = record.net, "payroll record updated");
        Ok(record)
    }

    /// Removes the record with `id`. Returns `true` if a record was removed.
    pub fn delete(
        &mut self,
        id: RecordId,
    ) -> bool {
        match self.position(id) {
            Some(index) => {
                self.records.remove(index);
                debug!(%id, "payroll record deleted");
                true
            }
            None => {
                debug!(%id, "delete ignored, payroll record not present");
                false
            }
        }
    }

    /// Removes every record. Ids already issued are not handed out again.
    pub fn clear(&mut self) {
        let removed = self.records.len();
        self.records.clear();
        info!(removed, "payroll ledger cleared");
    }

    /// Totals over the current records, recomputed on every call.
    pub fn summarize(&self) -> PayrollSummary {
        self.records.iter().fold(
            PayrollSummary::default(),
            |mut summary, record| {
                summary.count += 1;
                summary.total_gross += record.gross;
                summary.total_deductions += record.deductions();
                summary.total_net += record.net;
                summary
            },
        )
    }

    /// Snapshot of the records in insertion order.
    pub fn list(&self) -> Vec<PayrollRecord> {
        self.records.clone()
    }

    /// Copy of the record with `id`, if present.
    pub fn get(
        &self,
        id: RecordId,
    ) -> Option<PayrollRecord> {
        self.records.iter().find(|r| r.id == id).cloned()
    }

    /// Zero-based position of the record with `id` in the display order.
    pub fn position(
        &self,
        id: RecordId,
    ) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn build_record(
        id: RecordId,
        entry: PayrollEntry,
    ) -> PayrollRecord {
        let derived = compute_derived(
            entry.hours,
            entry.rate,
            entry.tax_percent,
            entry.other_deduction,
        );
        PayrollRecord::from_entry(id, entry, derived)
    }
}
