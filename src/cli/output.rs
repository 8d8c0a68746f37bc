//! CLI output formatting.
//!
//! This module contains the help and version text for the CLI.

/// Version string including the git hash embedded at build time, if any.
#[must_use]
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => {
            let short = hash.get(..12).unwrap_or(hash);
            format!("sirsim {version} ({short})")
        }
        _ => format!("sirsim {version}"),
    }
}

/// Print version information.
pub fn print_version() {
    println!("{}", version_string());
    if let Some(timestamp) = option_env!("BUILD_TIMESTAMP") {
        println!("built at unix time {timestamp}");
    }
}

/// Help text.
pub const HELP: &str = r"sirsim - SIRS epidemic lattice Monte Carlo

USAGE:
    sirsim <COMMAND> [OPTIONS]

COMMANDS:
    run [config.yaml]           Run a simulation (defaults if no file is given)
        -r, --rows <N>          Lattice rows (default: 50)
        -c, --cols <N>          Lattice columns (default: 50)
        -p, --prob-si <P>       Probability S -> I on contact (default: 1.0)
        -q, --prob-ir <P>       Probability I -> R (default: 1.0)
        -g, --prob-rs <P>       Probability R -> S (default: 1.0)
        -b, --burn-in <N>       Discarded sweeps (default: 5000)
        -s, --sweeps <N>        Measured sweeps (default: 10000)
        -i, --interval <N>      Sweeps between measurements (default: 10)
            --bootstrap <N>     Bootstrap resamples (default: 100)
            --initial <STATE>   random|susceptible|infected|recovered (default: random)
            --seed <N>          Random seed (default: 42)
        -o, --output <DIR>      Output directory (default: sirs-<timestamp>)
        -a, --animate           Rewrite Lattice.dat at every measurement
        -v, --verbose           Enable debug logging

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    sirsim run
    sirsim run sirs.yaml --seed 12345
    sirsim run -r 100 -c 100 -p 0.8 -q 0.1 -g 0.01 -o epidemic

Logging is controlled by RUST_LOG (default: info).
";

/// Print help message.
pub fn print_help() {
    println!("{HELP}");
}
