use serde::{Deserialize, Serialize};

/// Aggregate totals over every record in a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PayrollSummary {
    pub count: usize,
    pub total_gross: f64,
    /// Sum of tax amounts and flat deductions.
    pub total_deductions: f64,
    pub total_net: f64,
}
