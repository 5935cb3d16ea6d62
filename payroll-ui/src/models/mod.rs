mod payroll_form;

pub use payroll_form::PayrollForm;
