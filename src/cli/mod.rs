//! CLI module for sirsim.
//!
//! This module contains all CLI logic kept out of main.rs so it can be
//! tested. The entry point `run_cli` is called from main.rs with parsed
//! arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, RunOverrides};
pub use commands::{execute_run, resolve_config, run_cli, run_simulation};
pub use output::{print_help, print_version, version_string, HELP};
