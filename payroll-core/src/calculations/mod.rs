//! Pay calculations for payroll entries.
//!
//! This module derives the monetary fields of a record from its raw inputs.

pub mod derived_pay;

pub use derived_pay::{DerivedPay, compute_derived};
