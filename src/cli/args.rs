//! CLI argument parsing.
//!
//! This module provides the argument parser for the sirsim CLI.
//! Parsing is pure so that every flag combination can be tested.

use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{InitialState, SirsConfig};

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Run a simulation
    Run {
        /// Optional YAML configuration file.
        config_path: Option<PathBuf>,
        /// Command-line overrides applied on top of the configuration.
        overrides: RunOverrides,
        /// Enable verbose output.
        verbose: bool,
    },
    /// Arguments could not be parsed
    Invalid {
        /// What was wrong.
        message: String,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

/// Values given on the command line for a `run`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOverrides {
    /// `--rows`, `-r`
    pub rows: Option<usize>,
    /// `--cols`, `-c`
    pub cols: Option<usize>,
    /// `--prob-si`, `-p`
    pub prob_si: Option<f64>,
    /// `--prob-ir`, `-q`
    pub prob_ir: Option<f64>,
    /// `--prob-rs`, `-g`
    pub prob_rs: Option<f64>,
    /// `--burn-in`, `-b`
    pub burn_in: Option<usize>,
    /// `--sweeps`, `-s`
    pub sweeps: Option<usize>,
    /// `--interval`, `-i`
    pub measurement_interval: Option<usize>,
    /// `--initial`
    pub initial: Option<InitialState>,
    /// `--bootstrap`
    pub bootstrap_iterations: Option<usize>,
    /// `--seed`
    pub seed: Option<u64>,
    /// `--output`, `-o`
    pub output: Option<PathBuf>,
    /// `--animate`, `-a`
    pub animate: bool,
}

impl RunOverrides {
    /// Overwrite the fields of `config` that were given on the command line.
    pub fn apply(&self, config: &mut SirsConfig) {
        if let Some(rows) = self.rows {
            config.lattice.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.lattice.cols = cols;
        }
        if let Some(p) = self.prob_si {
            config.lattice.prob_si = p;
        }
        if let Some(p) = self.prob_ir {
            config.lattice.prob_ir = p;
        }
        if let Some(p) = self.prob_rs {
            config.lattice.prob_rs = p;
        }
        if let Some(initial) = self.initial {
            config.lattice.initial = initial;
        }
        if let Some(burn_in) = self.burn_in {
            config.run.burn_in = burn_in;
        }
        if let Some(sweeps) = self.sweeps {
            config.run.sweeps = sweeps;
        }
        if let Some(interval) = self.measurement_interval {
            config.run.measurement_interval = interval;
        }
        if let Some(iterations) = self.bootstrap_iterations {
            config.run.bootstrap_iterations = iterations;
        }
        if let Some(seed) = self.seed {
            config.reproducibility.seed = seed;
        }
        if let Some(output) = &self.output {
            config.output.directory = Some(output.clone());
        }
        if self.animate {
            config.run.animate = true;
        }
    }
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// This method is testable as it accepts any iterator of strings,
    /// not just `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// True if a `run` asked for verbose output.
    #[must_use]
    pub fn is_verbose(&self) -> bool {
        matches!(self.command, Command::Run { verbose: true, .. })
    }

    /// Internal parsing from a vector of strings.
    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(&args[2..]),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => Command::Invalid {
                message: format!("unknown command '{unknown}'"),
            },
        };

        Self { command }
    }

    /// Parse the arguments following `run`.
    fn parse_run_command(args: &[String]) -> Command {
        match Self::parse_run_options(args) {
            Ok(command) => command,
            Err(message) => Command::Invalid { message },
        }
    }

    fn parse_run_options(args: &[String]) -> Result<Command, String> {
        let mut config_path = None;
        let mut overrides = RunOverrides::default();
        let mut verbose = false;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let flag = arg.as_str();
            let mut value = || {
                iter.next()
                    .map(String::as_str)
                    .ok_or_else(|| format!("{flag} requires a value"))
            };

            match flag {
                "-r" | "--rows" => overrides.rows = Some(parse_value(flag, value()?)?),
                "-c" | "--cols" => overrides.cols = Some(parse_value(flag, value()?)?),
                "-p" | "--prob-si" => overrides.prob_si = Some(parse_value(flag, value()?)?),
                "-q" | "--prob-ir" => overrides.prob_ir = Some(parse_value(flag, value()?)?),
                "-g" | "--prob-rs" => overrides.prob_rs = Some(parse_value(flag, value()?)?),
                "-b" | "--burn-in" => overrides.burn_in = Some(parse_value(flag, value()?)?),
                "-s" | "--sweeps" => overrides.sweeps = Some(parse_value(flag, value()?)?),
                "-i" | "--interval" => {
                    overrides.measurement_interval = Some(parse_value(flag, value()?)?);
                }
                "--initial" => overrides.initial = Some(parse_value(flag, value()?)?),
                "--bootstrap" => {
                    overrides.bootstrap_iterations = Some(parse_value(flag, value()?)?);
                }
                "--seed" => overrides.seed = Some(parse_value(flag, value()?)?),
                "-o" | "--output" => overrides.output = Some(PathBuf::from(value()?)),
                "-a" | "--animate" => overrides.animate = true,
                "-v" | "--verbose" => verbose = true,
                other if other.starts_with('-') => {
                    return Err(format!("unknown option '{other}'"));
                }
                path => {
                    if config_path.is_some() {
                        return Err(format!("unexpected argument '{path}'"));
                    }
                    config_path = Some(PathBuf::from(path));
                }
            }
        }

        Ok(Command::Run {
            config_path,
            overrides,
            verbose,
        })
    }
}

fn parse_value<T: FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid value '{value}' for {flag}"))
}
