mod payroll_record;
mod payroll_summary;
mod record_id;

pub use payroll_record::{PayrollEntry, PayrollRecord};
pub use payroll_summary::PayrollSummary;
pub use record_id::{IdAllocator, RecordId};
