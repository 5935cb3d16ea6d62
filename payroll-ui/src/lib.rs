pub mod app;
pub mod components;
pub mod config;
pub mod csv_loader;
pub mod logging;
pub mod models;
pub mod state;
pub mod utils;
pub mod views;

pub use app::{App, Command};
pub use config::AppConfig;
pub use state::{Action, Outcome, Session};
