//! Text rendering of the payroll table and summary block.
//!
//! Both functions take plain snapshots (`list()` / `summarize()` output) and
//! never touch the ledger itself.

use payroll_core::{PayrollRecord, PayrollSummary};

use crate::utils::{format_money, format_plain, format_total};

const HEADERS: [&str; 9] = [
    "#", "Name", "Hours", "Rate", "Gross", "Tax", "Other Ded", "Net", "ID",
];

/// Renders one line per record, numbered from 1, under a header row.
pub fn render_table(
    records: &[PayrollRecord],
    symbol: &str,
) -> String {
    let rows: Vec<[String; 9]> = records
        .iter()
        .enumerate()
        .map(|(index, r)| {
            [
                (index + 1).to_string(),
                r.name.clone(),
                format_plain(r.hours),
                format_plain(r.rate),
                format_money(r.gross, symbol),
                format_money(r.tax_amount, symbol),
                format_money(r.other_deduction, symbol),
                format_money(r.net, symbol),
                r.id.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);

    if rows.is_empty() {
        out.push_str("(no payroll records)\n");
    }
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row<S: AsRef<str>>(
    out: &mut String,
    cells: &[S],
    widths: &[usize],
) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(column, (cell, &width))| {
            // Name is left aligned, everything else is numeric.
            if column == 1 {
                format!("{:<width$}", cell.as_ref())
            } else {
                format!("{:>width$}", cell.as_ref())
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Renders the summary totals block.
pub fn render_summary(
    summary: &PayrollSummary,
    symbol: &str,
) -> String {
    format!(
        "Employees:        {}\n\
         Total Gross:      {}\n\
         Total Deductions: {}\n\
         Total Net:        {}\n",
        summary.count,
        format_total(summary.total_gross, symbol),
        format_total(summary.total_deductions, symbol),
        format_total(summary.total_net, symbol),
    )
}
