//! Command-line interface for showcase.

mod commands;

pub use commands::{is_verbose, run};
