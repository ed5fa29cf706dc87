//! log4rs setup for run log files.
//!
//! The CLI calls [`setup_file_logging`] once per process. Core modules only
//! use the `log` facade and never configure logging themselves.

pub mod setup;

pub use setup::{log_file_path, setup_file_logging};
