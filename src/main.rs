//! sirsim CLI - SIRS epidemic lattice Monte Carlo
//!
//! Command-line interface for running simulations.

use std::process::ExitCode;

use sirsim::cli::{run_cli, Args};

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.is_verbose() { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    run_cli(args)
}
