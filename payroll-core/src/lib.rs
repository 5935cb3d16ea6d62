pub mod calculations;
pub mod ledger;
pub mod models;

pub use ledger::{LedgerError, PayrollLedger};
pub use models::*;
