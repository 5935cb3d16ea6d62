//! Session state and the action dispatch table.
//!
//! A [`Session`] owns the ledger together with everything the presentation
//! layer tracks around it: the entry form, the id of the record being edited
//! and the transient status message. User actions arrive as [`Action`]
//! values and are translated into ledger calls by [`Session::dispatch`].

use std::collections::HashMap;
use std::time::{Duration, Instant};

use payroll_core::{LedgerError, PayrollEntry, PayrollLedger, PayrollRecord, RecordId};
use tracing::{debug, info};

use crate::components::Confirm;
use crate::models::PayrollForm;
use crate::views::StatusMessage;

pub const MSG_ADDED: &str = "Record added!";
pub const MSG_UPDATED: &str = "Record updated successfully!";
pub const MSG_EDITING: &str = "Editing record...";
pub const MSG_DELETED: &str = "Record deleted.";
pub const MSG_CLEARED: &str = "All records cleared.";
pub const MSG_NOTHING_TO_SAVE: &str = "Nothing to save: record no longer exists.";

pub const PROMPT_DELETE: &str = "Are you sure you want to delete this record?";
pub const PROMPT_CLEAR: &str = "Clear all payroll data?";

/// A user action, optionally tied to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Save the form: add a record, or update the one being edited.
    Submit,
    /// Load a record into the form and switch to edit mode.
    Edit(RecordId),
    Delete(RecordId),
    ClearAll,
    /// Leave edit mode and blank the form.
    Reset,
}

/// What a dispatched action did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Added(PayrollRecord),
    Updated(PayrollRecord),
    /// The record under edit disappeared before it was saved.
    NothingToSave(RecordId),
    Editing(RecordId),
    Deleted(RecordId),
    ClearedAll,
    /// The user declined a confirmation prompt.
    Declined,
    /// The action referenced an id the ledger does not hold.
    Missing(RecordId),
    Reset,
}

impl Outcome {
    /// Whether the ledger changed and the table must be rendered again.
    pub fn mutated(&self) -> bool {
        matches!(
            self,
            Self::Added(_) | Self::Updated(_) | Self::Deleted(_) | Self::ClearedAll
        )
    }
}

#[derive(Debug)]
pub struct Session {
    ledger: PayrollLedger,
    /// Values currently typed into the entry form.
    pub form: PayrollForm,
    editing: Option<RecordId>,
    /// Tax percent last entered for each record. Records keep only the
    /// derived amount, which cannot give the percent back when gross is 0.
    tax_percents: HashMap<RecordId, f64>,
    status: StatusMessage,
    confirm_destructive: bool,
}

impl Session {
    pub fn new(
        message_ttl: Duration,
        confirm_destructive: bool,
    ) -> Self {
        Self {
            ledger: PayrollLedger::new(),
            form: PayrollForm::default(),
            editing: None,
            tax_percents: HashMap::new(),
            status: StatusMessage::new(message_ttl),
            confirm_destructive,
        }
    }

    /// Read-only access for rendering.
    pub fn ledger(&self) -> &PayrollLedger {
        &self.ledger
    }

    /// Id of the record being edited, if any.
    pub fn editing(&self) -> Option<RecordId> {
        self.editing
    }

    pub fn status(
        &self,
        now: Instant,
    ) -> Option<&str> {
        self.status.current(now)
    }

    /// Maps a 1-based table row number to the id displayed in that row.
    pub fn row_id(
        &self,
        row: usize,
    ) -> Option<RecordId> {
        let index = row.checked_sub(1)?;
        self.ledger.list().get(index).map(|r| r.id)
    }

    /// Adds a batch of entries in order, returning how many were added.
    pub fn import(
        &mut self,
        entries: Vec<PayrollEntry>,
    ) -> usize {
        let count = entries.len();
        for entry in entries {
            let tax_percent = entry.tax_percent;
            let record = self.ledger.add(entry);
            self.tax_percents.insert(record.id, tax_percent);
        }
        info!(count, "payroll entries imported");
        count
    }

    /// Applies `action` to the ledger.
    ///
    /// Delete and clear ask `confirm` first unless confirmation is disabled.
    pub fn dispatch(
        &mut self,
        action: Action,
        confirm: &mut dyn Confirm,
        now: Instant,
    ) -> Outcome {
        debug!(?action, "dispatching");
        match action {
            Action::Submit => self.submit(now),
            Action::Edit(id) => self.edit(id, now),
            Action::Delete(id) => {
                if !self.approved(confirm, PROMPT_DELETE) {
                    return Outcome::Declined;
                }
                if self.ledger.delete(id) {
                    self.tax_percents.remove(&id);
                    self.status.show(MSG_DELETED, now);
                    Outcome::Deleted(id)
                } else {
                    Outcome::Missing(id)
                }
            }
            Action::ClearAll => {
                if !self.approved(confirm, PROMPT_CLEAR) {
                    return Outcome::Declined;
                }
                self.ledger.clear();
                self.tax_percents.clear();
                self.status.show(MSG_CLEARED, now);
                Outcome::ClearedAll
            }
            Action::Reset => {
                self.editing = None;
                self.form.reset();
                self.status.clear();
                Outcome::Reset
            }
        }
    }

    fn submit(
        &mut self,
        now: Instant,
    ) -> Outcome {
        let entry = self.form.to_entry();
        let tax_percent = entry.tax_percent;
        self.form.reset();

        match self.editing.take() {
            Some(id) => match self.ledger.update(id, entry) {
                Ok(record) => {
                    self.tax_percents.insert(id, tax_percent);
                    self.status.show(MSG_UPDATED, now);
                    Outcome::Updated(record)
                }
                Err(LedgerError::NotFound(id)) => {
                    self.status.show(MSG_NOTHING_TO_SAVE, now);
                    Outcome::NothingToSave(id)
                }
            },
            None => {
                let record = self.ledger.add(entry);
                self.tax_percents.insert(record.id, tax_percent);
                self.status.show(MSG_ADDED, now);
                Outcome::Added(record)
            }
        }
    }

    fn edit(
        &mut self,
        id: RecordId,
        now: Instant,
    ) -> Outcome {
        let Some(record) = self.ledger.get(id) else {
            return Outcome::Missing(id);
        };

        self.form
            .load_record(&record, self.tax_percents.get(&id).copied());
        self.editing = Some(id);
        self.status.show(MSG_EDITING, now);
        Outcome::Editing(id)
    }

    fn approved(
        &self,
        confirm: &mut dyn Confirm,
        prompt: &str,
    ) -> bool {
        !self.confirm_destructive || confirm.confirm(prompt)
    }
}
