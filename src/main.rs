//! mha-failover entry point
//!
//! Parses MHA's arguments, runs one action, exits with the code MHA
//! interprets: 0 success, 10 secondary success, 20 failure, 2 usage error.
//!
//! All logic is delegated to the CLI module.

use mha_failover::cli;

fn main() {
    std::process::exit(cli::run());
}
