//! Sweep loop, measurement harvesting and final error analysis.
//!
//! A run is `burn_in + sweeps` sweeps of `rows * cols` single-cell updates.
//! After burn-in, every sweep that is a multiple of the measurement interval
//! records the infected fraction. When the loop ends the series is reduced to
//! the order parameter, its standard error, the susceptibility and the
//! susceptibility's bootstrap and jackknife errors.

pub mod output;
pub mod report;

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::SirsConfig;
use crate::engine::lattice::{CellState, SirsLattice};
use crate::engine::rng::SimRng;
use crate::error::{SirsError, SirsResult};
use crate::statistics::{bootstrap, jackknife, SampleSeries, ScalarStatistic, Susceptibility};

pub use output::OutputWriter;

/// Upper bound on measurements reserved up front.
const MAX_RESERVED_MEASUREMENTS: usize = 1 << 20;

/// One recorded order-parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Zero-based sweep index, burn-in included.
    pub sweep: usize,
    /// Fraction of infected cells after the sweep.
    pub order_parameter: f64,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SirsResults {
    /// Mean infected fraction.
    pub order_parameter: f64,
    /// Standard error of the mean infected fraction.
    pub order_parameter_error: f64,
    /// Variance of the infected fraction.
    pub susceptibility: f64,
    /// Bootstrap error of the susceptibility.
    pub susceptibility_bootstrap_error: f64,
    /// Jackknife error of the susceptibility.
    pub susceptibility_jackknife_error: f64,
    /// Number of recorded measurements.
    pub measurements: usize,
    /// Wall-clock run time in seconds.
    pub elapsed_secs: f64,
}

/// Hooks invoked by [`SimulationDriver::run_with`].
///
/// All methods default to doing nothing.
pub trait RunObserver {
    /// Called once with the initial lattice, before the first sweep.
    ///
    /// # Errors
    ///
    /// An error aborts the run.
    fn on_start(&mut self, _lattice: &SirsLattice) -> SirsResult<()> {
        Ok(())
    }

    /// Called after each recorded measurement.
    ///
    /// # Errors
    ///
    /// An error aborts the run.
    fn on_measurement(
        &mut self,
        _measurement: &Measurement,
        _lattice: &SirsLattice,
    ) -> SirsResult<()> {
        Ok(())
    }

    /// Called once with the final results.
    ///
    /// # Errors
    ///
    /// An error is returned from the run.
    fn on_finish(&mut self, _results: &SirsResults) -> SirsResult<()> {
        Ok(())
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl RunObserver for NullObserver {}

/// Owns the lattice, the generator and the measurement series for one run.
///
/// # Example
///
/// ```rust
/// use sirsim::config::SirsConfig;
/// use sirsim::driver::SimulationDriver;
///
/// let config = SirsConfig::builder()
///     .dimensions(8, 8)
///     .probabilities(0.8, 0.1, 0.01)
///     .burn_in(10)
///     .sweeps(50)
///     .measurement_interval(5)
///     .seed(42)
///     .build();
///
/// let results = SimulationDriver::new(config).unwrap().run().unwrap();
/// assert_eq!(results.measurements, 10);
/// assert!((0.0..=1.0).contains(&results.order_parameter));
/// ```
#[derive(Debug, Clone)]
pub struct SimulationDriver {
    config: SirsConfig,
    lattice: SirsLattice,
    rng: SimRng,
    series: SampleSeries,
    measurements: Vec<Measurement>,
}

impl SimulationDriver {
    /// Validate `config` and build the initial lattice.
    ///
    /// A random initial lattice is drawn from the seeded generator before any
    /// sweep, so the whole run is a function of the seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: SirsConfig) -> SirsResult<Self> {
        config.check()?;
        let probabilities = config.transition_probabilities()?;
        let mut rng = SimRng::new(config.reproducibility.seed);

        let (rows, cols) = (config.lattice.rows, config.lattice.cols);
        let lattice = match config.lattice.initial.uniform_state() {
            Some(state) => SirsLattice::new(rows, cols, probabilities, state)?,
            None => SirsLattice::random(rows, cols, probabilities, &mut rng)?,
        };

        let reserved = config
            .run
            .expected_measurements()
            .unwrap_or(0)
            .min(MAX_RESERVED_MEASUREMENTS);
        let series = SampleSeries::with_capacity(reserved);

        Ok(Self {
            config,
            lattice,
            rng,
            series,
            measurements: Vec::new(),
        })
    }

    /// Configuration driving this run.
    #[must_use]
    pub const fn config(&self) -> &SirsConfig {
        &self.config
    }

    /// Current lattice.
    #[must_use]
    pub const fn lattice(&self) -> &SirsLattice {
        &self.lattice
    }

    /// Order-parameter series recorded so far.
    #[must_use]
    pub const fn series(&self) -> &SampleSeries {
        &self.series
    }

    /// Measurements recorded so far.
    #[must_use]
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Perform one sweep: `rows * cols` single-cell updates.
    pub fn sweep(&mut self) {
        for _ in 0..self.lattice.size() {
            self.lattice.update(&mut self.rng);
        }
    }

    /// Run to completion without observers.
    ///
    /// # Errors
    ///
    /// Returns an error if error analysis fails.
    pub fn run(self) -> SirsResult<SirsResults> {
        self.run_with(&mut NullObserver)
    }

    /// Run to completion, reporting to `observer`.
    ///
    /// # Errors
    ///
    /// Returns the first observer error, or an error if error analysis fails.
    pub fn run_with<O: RunObserver + ?Sized>(mut self, observer: &mut O) -> SirsResult<SirsResults> {
        let start = Instant::now();
        let total = self
            .config
            .run
            .total_sweeps()
            .ok_or_else(|| SirsError::config("run schedule overflows usize"))?;

        log::info!(
            "Starting SIRS run: {}x{} lattice, {} burn-in + {} sweeps, seed {}",
            self.lattice.rows(),
            self.lattice.cols(),
            self.config.run.burn_in,
            self.config.run.sweeps,
            self.config.reproducibility.seed
        );

        observer.on_start(&self.lattice)?;

        for sweep in 0..total {
            self.sweep();

            if self.config.run.is_measurement_sweep(sweep) {
                let measurement = Measurement {
                    sweep,
                    order_parameter: self.lattice.fraction_in_state(CellState::Infected),
                };
                log::debug!(
                    "sweep {}: infected fraction {:.6}",
                    measurement.sweep,
                    measurement.order_parameter
                );
                self.series.push(measurement.order_parameter);
                self.measurements.push(measurement);
                observer.on_measurement(&measurement, &self.lattice)?;
            }
        }

        let results = self.analyze(start.elapsed().as_secs_f64())?;
        log::info!(
            "Run finished in {:.3}s: order parameter {:.6} +/- {:.6}",
            results.elapsed_secs,
            results.order_parameter,
            results.order_parameter_error
        );

        observer.on_finish(&results)?;
        Ok(results)
    }

    /// Reduce the recorded series to the final estimates.
    fn analyze(&mut self, elapsed_secs: f64) -> SirsResult<SirsResults> {
        let series = &self.series;
        let susceptibility = Susceptibility.evaluate(series);
        let bootstrap_error = bootstrap(
            &Susceptibility,
            series,
            &mut self.rng,
            self.config.run.bootstrap_iterations,
        )?;
        let jackknife_error = jackknife(&Susceptibility, series)?;

        Ok(SirsResults {
            order_parameter: series.mean()?,
            order_parameter_error: series.standard_error()?,
            susceptibility,
            susceptibility_bootstrap_error: bootstrap_error,
            susceptibility_jackknife_error: jackknife_error,
            measurements: series.len(),
            elapsed_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InitialState;
    use crate::error::SirsError;

    fn small_config(seed: u64) -> SirsConfig {
        SirsConfig::builder()
            .dimensions(10, 10)
            .probabilities(0.8, 0.1, 0.01)
            .burn_in(20)
            .sweeps(100)
            .measurement_interval(5)
            .bootstrap_iterations(50)
            .seed(seed)
            .build()
    }

    #[derive(Default)]
    struct Recorder {
        started: usize,
        sweeps: Vec<usize>,
        finished: Option<SirsResults>,
    }

    impl RunObserver for Recorder {
        fn on_start(&mut self, lattice: &SirsLattice) -> SirsResult<()> {
            assert_eq!(lattice.size(), 100);
            self.started += 1;
            Ok(())
        }

        fn on_measurement(
            &mut self,
            measurement: &Measurement,
            lattice: &SirsLattice,
        ) -> SirsResult<()> {
            let fraction = lattice.fraction_in_state(CellState::Infected);
            assert!((measurement.order_parameter - fraction).abs() < f64::EPSILON);
            self.sweeps.push(measurement.sweep);
            Ok(())
        }

        fn on_finish(&mut self, results: &SirsResults) -> SirsResult<()> {
            self.finished = Some(results.clone());
            Ok(())
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SirsConfig::builder().dimensions(0, 5).build();
        assert!(matches!(
            SimulationDriver::new(config),
            Err(SirsError::Validation(_))
        ));
    }

    #[test]
    fn test_new_handles_extreme_schedules() {
        let overflowing = SirsConfig::builder().burn_in(1).sweeps(usize::MAX).build();
        assert!(matches!(
            SimulationDriver::new(overflowing),
            Err(SirsError::Config { .. })
        ));

        let long = SirsConfig::builder()
            .dimensions(2, 2)
            .burn_in(0)
            .sweeps(usize::MAX / 2)
            .measurement_interval(1)
            .build();
        let driver = SimulationDriver::new(long).unwrap();
        assert!(driver.series().is_empty());
    }

    #[test]
    fn test_uniform_initial_state() {
        let config = SirsConfig::builder()
            .initial(InitialState::Recovered)
            .dimensions(4, 6)
            .build();
        let driver = SimulationDriver::new(config).unwrap();
        assert_eq!(driver.lattice().count_in_state(CellState::Recovered), 24);
        assert!(driver.series().is_empty());
        assert!(driver.measurements().is_empty());
    }

    #[test]
    fn test_measurement_schedule() {
        let mut recorder = Recorder::default();
        let results = SimulationDriver::new(small_config(42))
            .unwrap()
            .run_with(&mut recorder)
            .unwrap();

        let expected: Vec<usize> = (20..120).step_by(5).collect();
        assert_eq!(recorder.started, 1);
        assert_eq!(recorder.sweeps, expected);
        assert_eq!(results.measurements, expected.len());
        assert_eq!(recorder.finished, Some(results));
    }

    #[test]
    fn test_results_are_in_fraction_units() {
        let results = SimulationDriver::new(small_config(7)).unwrap().run().unwrap();
        assert!((0.0..=1.0).contains(&results.order_parameter));
        assert!((0.0..=0.25).contains(&results.susceptibility));
        assert!(results.order_parameter_error >= 0.0);
        assert!(results.susceptibility_bootstrap_error >= 0.0);
        assert!(results.susceptibility_jackknife_error >= 0.0);
        assert!(results.elapsed_secs >= 0.0);
    }

    #[test]
    fn test_run_reproducible_under_seed() {
        let a = SimulationDriver::new(small_config(3)).unwrap().run().unwrap();
        let b = SimulationDriver::new(small_config(3)).unwrap().run().unwrap();
        assert_eq!(a.order_parameter.to_bits(), b.order_parameter.to_bits());
        assert_eq!(a.susceptibility.to_bits(), b.susceptibility.to_bits());
        assert_eq!(
            a.susceptibility_bootstrap_error.to_bits(),
            b.susceptibility_bootstrap_error.to_bits()
        );
    }

    #[test]
    fn test_all_susceptible_stays_disease_free() {
        let config = SirsConfig::builder()
            .initial(InitialState::Susceptible)
            .dimensions(5, 5)
            .burn_in(0)
            .sweeps(20)
            .measurement_interval(2)
            .build();
        let results = SimulationDriver::new(config).unwrap().run().unwrap();
        assert_eq!(results.measurements, 10);
        assert!(results.order_parameter.abs() < f64::EPSILON);
        assert!(results.susceptibility.abs() < f64::EPSILON);
        assert!(results.susceptibility_jackknife_error.abs() < f64::EPSILON);
    }

    #[test]
    fn test_sweep_preserves_lattice_size() {
        let mut driver = SimulationDriver::new(small_config(9)).unwrap();
        driver.sweep();
        let total: usize = CellState::ALL
            .iter()
            .map(|&s| driver.lattice().count_in_state(s))
            .sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_observer_error_aborts_run() {
        struct Failing;
        impl RunObserver for Failing {
            fn on_measurement(&mut self, _: &Measurement, _: &SirsLattice) -> SirsResult<()> {
                Err(SirsError::io("disk full"))
            }
        }

        let result = SimulationDriver::new(small_config(1))
            .unwrap()
            .run_with(&mut Failing);
        assert!(matches!(result, Err(SirsError::Io(_))));
    }

    #[test]
    fn test_results_serialize() {
        let results = SimulationDriver::new(small_config(5)).unwrap().run().unwrap();
        let json = serde_json::to_string(&results).unwrap();
        let parsed: SirsResults = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.measurements, results.measurements);
        assert!((parsed.susceptibility - results.susceptibility).abs() < 1e-12);
    }
}
