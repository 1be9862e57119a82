//! CLI module
//!
//! Turns MHA's `--key=value` argument list into a parameter set and runs
//! one action. Usage errors exit with their own code before anything runs.

mod args;
mod commands;
mod errors;

pub use args::Cli;
pub use commands::{parse_params, run, run_from, run_with, run_with_config};
pub use errors::{CliError, CliErrorCode, CliResult};
