//! Derived pay fields for a single payroll entry.
//!
//! | Field        | Formula                                 |
//! |--------------|-----------------------------------------|
//! | `gross`      | `hours * rate`                          |
//! | `tax_amount` | `gross * (tax_percent / 100)`           |
//! | `net`        | `gross - tax_amount - other_deduction`  |
//!
//! The computation is plain `f64` arithmetic and performs no validation.
//! A `NaN` input (for instance from an unparseable form field) flows through
//! into every field that depends on it.
//!
//! # Example
//!
//! ```
//! use payroll_core::calculations::compute_derived;
//!
//! let pay = compute_derived(40.0, 25.0, 10.0, 50.0);
//!
//! assert_eq!(pay.gross, 1000.0);
//! assert_eq!(pay.tax_amount, 100.0);
//! assert_eq!(pay.net, 850.0);
//! ```

use serde::{Deserialize, Serialize};

/// Monetary values derived from hours, rate, tax percent and deduction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedPay {
    /// Pay before deductions.
    pub gross: f64,

    /// Tax withheld from gross.
    pub tax_amount: f64,

    /// Final payout after tax and the flat deduction.
    pub net: f64,
}

/// Computes gross, tax amount and net pay.
///
/// All three values are produced together so they can never drift apart.
pub fn compute_derived(
    hours: f64,
    rate: f64,
    tax_percent: f64,
    other_deduction: f64,
) -> DerivedPay {
    let gross = hours * rate;
    let tax_amount = gross * (tax_percent / 100.0);
    let net = gross - tax_amount - other_deduction;

    DerivedPay {
        gross,
        tax_amount,
        net,
    }
}
