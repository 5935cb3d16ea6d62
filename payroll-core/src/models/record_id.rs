use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a [`PayrollRecord`](super::PayrollRecord) within a ledger.
///
/// Ids are issued by the ledger and never reused, even after the record they
/// named has been deleted or the ledger has been cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic source of [`RecordId`]s.
///
/// The first id handed out is `1`; every later id is strictly greater than
/// all earlier ones for the lifetime of the allocator.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns a fresh id and advances the counter.
    pub fn allocate(&mut self) -> RecordId {
        let id = RecordId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
