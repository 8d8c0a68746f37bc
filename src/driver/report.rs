//! Plain-text reports and lattice snapshots.
//!
//! Reports are a title line followed by rows of a left-aligned label padded to
//! [`LABEL_WIDTH`] columns and a value.

use std::fmt::{self, Display};

use super::SirsResults;
use crate::config::SirsConfig;
use crate::engine::lattice::SirsLattice;

/// Width of the label column in reports.
pub const LABEL_WIDTH: usize = 30;

fn row(f: &mut fmt::Formatter<'_>, label: &str, value: impl Display) -> fmt::Result {
    writeln!(f, "{label:<LABEL_WIDTH$}{value}")
}

/// Display adapter for the run's input parameters.
#[derive(Debug, Clone, Copy)]
pub struct InputReport<'a>(pub &'a SirsConfig);

impl Display for InputReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.0;
        writeln!(f, "Input-Parameters...")?;
        row(f, "Rows: ", config.lattice.rows)?;
        row(f, "Columns: ", config.lattice.cols)?;
        row(f, "p_1: ", config.lattice.prob_si)?;
        row(f, "p_2: ", config.lattice.prob_ir)?;
        row(f, "p_3: ", config.lattice.prob_rs)?;
        row(f, "Initial-State: ", format!("{:?}", config.lattice.initial))?;
        row(f, "Burn-Period: ", config.run.burn_in)?;
        row(f, "Sweeps: ", config.run.sweeps)?;
        row(f, "Measurement-Interval: ", config.run.measurement_interval)?;
        row(f, "Bootstrap-Iterations: ", config.run.bootstrap_iterations)?;
        row(f, "Seed: ", config.reproducibility.seed)?;
        match &config.output.directory {
            Some(dir) => row(f, "Output-Directory: ", dir.display()),
            None => row(f, "Output-Directory: ", "-"),
        }
    }
}

/// Display adapter for a run's results.
#[derive(Debug, Clone, Copy)]
pub struct ResultsReport<'a>(pub &'a SirsResults);

impl Display for ResultsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let results = self.0;
        writeln!(f, "Results...")?;
        row(
            f,
            "Order-Parameter: ",
            format_args!(
                "{} +/- {}",
                results.order_parameter, results.order_parameter_error
            ),
        )?;
        row(f, "Susceptibility: ", results.susceptibility)?;
        row(
            f,
            "Susceptibility-Error (boot): ",
            results.susceptibility_bootstrap_error,
        )?;
        row(
            f,
            "Susceptibility-Error (jack): ",
            results.susceptibility_jackknife_error,
        )?;
        row(f, "Measurements: ", results.measurements)?;
        row(f, "Execution-Time (s): ", results.elapsed_secs)
    }
}

/// Render the input-parameter report.
#[must_use]
pub fn format_input_parameters(config: &SirsConfig) -> String {
    InputReport(config).to_string()
}

/// Render the results report.
#[must_use]
pub fn format_results(results: &SirsResults) -> String {
    ResultsReport(results).to_string()
}

/// Render a lattice snapshot: one line per row, each symbol followed by a space.
#[must_use]
pub fn format_lattice(lattice: &SirsLattice) -> String {
    let mut out = String::with_capacity(lattice.size() * 2 + lattice.rows());
    for row in lattice.cells().chunks(lattice.cols()) {
        for cell in row {
            out.push(char::from(b'0' + cell.symbol()));
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InitialState;
    use crate::engine::lattice::{CellState, TransitionProbabilities};

    fn sample_results() -> SirsResults {
        SirsResults {
            order_parameter: 0.25,
            order_parameter_error: 0.01,
            susceptibility: 0.002,
            susceptibility_bootstrap_error: 0.0003,
            susceptibility_jackknife_error: 0.0004,
            measurements: 500,
            elapsed_secs: 1.5,
        }
    }

    #[test]
    fn test_input_report_layout() {
        let config = SirsConfig::builder()
            .dimensions(20, 30)
            .probabilities(0.8, 0.1, 0.01)
            .initial(InitialState::Random)
            .seed(7)
            .output_dir("runs/a")
            .build();
        let report = format_input_parameters(&config);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Input-Parameters...");
        assert_eq!(lines[1], format!("{:<30}20", "Rows: "));
        assert_eq!(lines[2], format!("{:<30}30", "Columns: "));
        assert_eq!(lines[3], format!("{:<30}0.8", "p_1: "));
        assert!(report.contains("Random"));
        assert!(lines.last().unwrap().ends_with("runs/a"));
        assert_eq!(lines.len(), 13);
    }

    #[test]
    fn test_input_report_without_directory() {
        let mut config = SirsConfig::default();
        config.output.directory = None;
        let report = format_input_parameters(&config);
        assert!(report.lines().last().unwrap().ends_with('-'));
    }

    #[test]
    fn test_results_report_layout() {
        let report = format_results(&sample_results());
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Results...");
        assert_eq!(lines[1], format!("{:<30}0.25 +/- 0.01", "Order-Parameter: "));
        assert_eq!(lines[2], format!("{:<30}0.002", "Susceptibility: "));
        assert!(lines[3].ends_with("0.0003"));
        assert!(lines[4].ends_with("0.0004"));
        assert!(lines[5].ends_with("500"));
        assert!(lines[6].ends_with("1.5"));
        for line in &lines[1..] {
            assert_eq!(line.find(|c: char| c.is_ascii_digit()), Some(LABEL_WIDTH));
        }
    }

    #[test]
    fn test_lattice_snapshot_format() {
        let p = TransitionProbabilities::new(0.5, 0.5, 0.5).unwrap();
        let mut lattice = SirsLattice::new(2, 3, p, CellState::Susceptible).unwrap();
        lattice.set(0, 1, CellState::Infected);
        lattice.set(1, 2, CellState::Recovered);

        assert_eq!(format_lattice(&lattice), "0 1 0 \n0 0 2 \n");
    }
}
