//! Command line interface for pybuild_packager.
//!
//! Parses arguments, dispatches to the extra-help, clean or build command and
//! turns the outcome into a process exit code.

mod args;
pub mod commands;
mod output;

pub use args::{Args, EXTRA_HELP, RuntimeConfig};
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute_command(args).await
}
