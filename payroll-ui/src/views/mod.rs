pub mod payroll_table;
pub mod status_bar;

pub use payroll_table::{render_summary, render_table};
pub use status_bar::{KeyHint, StatusMessage, build_status_bar, hints};
