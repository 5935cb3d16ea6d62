use serde::{Deserialize, Serialize};

use super::RecordId;
use crate::calculations::DerivedPay;

/// Raw inputs for one pay-period entry, as gathered from a form or a file.
///
/// `tax_percent` is only used to derive the tax amount and is not kept on
/// the stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollEntry {
    pub name: String,
    pub hours: f64,
    pub rate: f64,
    pub tax_percent: f64,
    pub other_deduction: f64,
}

impl PayrollEntry {
    pub fn new(
        name: impl Into<String>,
        hours: f64,
        rate: f64,
        tax_percent: f64,
        other_deduction: f64,
    ) -> Self {
        Self {
            name: name.into(),
            hours,
            rate,
            tax_percent,
            other_deduction,
        }
    }
}

/// One employee's pay-period entry as stored in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub id: RecordId,
    pub name: String,
    pub hours: f64,
    pub rate: f64,

    // Calculated values
    pub gross: f64,
    pub tax_amount: f64,
    pub other_deduction: f64,
    pub net: f64,
}

impl PayrollRecord {
    pub(crate) fn from_entry(
        id: RecordId,
        entry: PayrollEntry,
        derived: DerivedPay,
    ) -> Self {
        Self {
            id,
            name: entry.name,
            hours: entry.hours,
            rate: entry.rate,
            gross: derived.gross,
            tax_amount: derived.tax_amount,
            other_deduction: entry.other_deduction,
            net: derived.net,
        }
    }

    /// Tax plus the flat deduction.
    pub fn deductions(&self) -> f64 {
        self.tax_amount + self.other_deduction
    }

    /// Recovers the tax percent from the stored amounts.
    ///
    /// Returns `None` when gross is zero or not finite: every percent gives
    /// the same tax then, so the original one cannot be known. The result
    /// is a float quotient and may carry rounding noise.
    pub fn tax_percent(&self) -> Option<f64> {
        if self.gross == 0.0 || !self.gross.is_finite() {
            None
        } else {
            Some(self.tax_amount / self.gross * 100.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculations::compute_derived;

    fn record(entry: PayrollEntry) -> PayrollRecord {
        let derived = compute_derived(
            entry.hours,
            entry.rate,
            entry.tax_percent,
            entry.other_deduction,
        );
        PayrollRecord::from_entry(RecordId::from(1), entry, derived)
    }

    #[test]
    fn from_entry_keeps_raw_inputs() {
        let r = record(PayrollEntry::new("Alice", 40.0, 25.0, 10.0, 50.0));

        assert_eq!(r.name, "Alice");
        assert_eq!(r.hours, 40.0);
        assert_eq!(r.rate, 25.0);
        assert_eq!(r.other_deduction, 50.0);
    }

    #[test]
    fn deductions_sums_tax_and_other() {
        let r = record(PayrollEntry::new("Alice", 40.0, 25.0, 10.0, 50.0));

        assert_eq!(r.deductions(), 150.0);
    }

    #[test]
    fn tax_percent_is_recovered() {
        let r = record(PayrollEntry::new("Bob", 20.0, 15.0, 5.0, 0.0));

        assert_eq!(r.tax_percent(), Some(5.0));
    }

    #[test]
    fn tax_percent_is_unknown_without_gross() {
        let r = record(PayrollEntry::new("Idle", 0.0, 25.0, 12.0, 0.0));

        assert_eq!(r.tax_percent(), None);
    }

    #[test]
    fn tax_percent_is_unknown_for_nan_gross() {
        let r = record(PayrollEntry::new("Broken", f64::NAN, 25.0, 12.0, 0.0));

        assert_eq!(r.tax_percent(), None);
    }
}
