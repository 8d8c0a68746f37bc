//! CLI command handlers.
//!
//! This module contains the execution logic for each CLI command.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::args::RunOverrides;
use super::output::{print_help, print_version};
use super::{Args, Command};
use crate::config::SirsConfig;
use crate::driver::output::{resolve_directory, OutputWriter};
use crate::driver::report::{format_input_parameters, format_results};
use crate::driver::{SimulationDriver, SirsResults};
use crate::error::SirsResult;

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run {
            config_path,
            overrides,
            ..
        } => run_simulation(config_path.as_deref(), &overrides),
        Command::Invalid { message } => {
            eprintln!("Error: {message}\n");
            print_help();
            ExitCode::from(2)
        }
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Run a simulation and report the outcome as an exit code.
#[must_use]
pub fn run_simulation(config_path: Option<&Path>, overrides: &RunOverrides) -> ExitCode {
    match execute_run(config_path, overrides) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Run failed: {e}");
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Resolve the configuration from file and overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the result is invalid.
pub fn resolve_config(
    config_path: Option<&Path>,
    overrides: &RunOverrides,
) -> SirsResult<SirsConfig> {
    let mut config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            SirsConfig::load(path)?
        }
        None => SirsConfig::default(),
    };
    overrides.apply(&mut config);
    config.output.directory = Some(resolve_directory(&config));
    config.check()?;
    Ok(config)
}

/// Run a simulation, writing all output files.
///
/// Returns the output directory and the results.
///
/// # Errors
///
/// Returns an error if configuration, file output or the run fails.
pub fn execute_run(
    config_path: Option<&Path>,
    overrides: &RunOverrides,
) -> SirsResult<(PathBuf, SirsResults)> {
    let config = resolve_config(config_path, overrides)?;
    let directory = resolve_directory(&config);

    println!("{}", format_input_parameters(&config));

    let mut writer = OutputWriter::create(&directory, &config)?;
    let results = SimulationDriver::new(config)?.run_with(&mut writer)?;

    println!("{}", format_results(&results));
    Ok((directory, results))
}
