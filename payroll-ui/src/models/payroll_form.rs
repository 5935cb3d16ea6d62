use std::fmt;

use payroll_core::{PayrollEntry, PayrollRecord};

use crate::utils::{format_plain, format_recovered, parse_number};

/// Raw text of the payroll entry form, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PayrollForm {
    pub name: String,
    pub hours: String,
    pub rate: String,
    pub tax_percent: String,
    pub other_deduction: String,
}

impl PayrollForm {
    /// Converts the typed values into a ledger entry.
    ///
    /// Numeric fields go through [`parse_number`], so unparseable text
    /// becomes `NaN` rather than an error.
    pub fn to_entry(&self) -> PayrollEntry {
        PayrollEntry {
            name: self.name.clone(),
            hours: parse_number(&self.hours),
            rate: parse_number(&self.rate),
            tax_percent: parse_number(&self.tax_percent),
            other_deduction: parse_number(&self.other_deduction),
        }
    }

    /// Fills the form from a stored record so it can be edited.
    ///
    /// Records keep only the tax amount, so the percent comes from the
    /// caller when it is known. Otherwise it is recovered from the record,
    /// and left blank when gross is zero.
    pub fn load_record(
        &mut self,
        record: &PayrollRecord,
        tax_percent: Option<f64>,
    ) {
        self.name = record.name.clone();
        self.hours = format_plain(record.hours);
        self.rate = format_plain(record.rate);
        self.tax_percent = match tax_percent {
            Some(percent) => format_plain(percent),
            None => record.tax_percent().map(format_recovered).unwrap_or_default(),
        };
        self.other_deduction = format_plain(record.other_deduction);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for PayrollForm {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Employee:        {}", self.name)?;
        writeln!(f, "Hours:           {}", self.hours)?;
        writeln!(f, "Rate:            {}", self.rate)?;
        writeln!(f, "Tax %:           {}", self.tax_percent)?;
        writeln!(f, "Other deduction: {}", self.other_deduction)
    }
}
