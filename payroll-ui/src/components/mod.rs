pub mod dialogs;

pub use dialogs::{AutoConfirm, Confirm, TerminalConfirm};
