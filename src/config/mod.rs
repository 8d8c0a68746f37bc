//! Configuration system with YAML schema and validation.
//!
//! Implements mistake-proofing through:
//! - Type-safe configuration structs
//! - Schema validation via `validator`
//! - Semantic validation of the run schedule

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::engine::lattice::{CellState, TransitionProbabilities};
use crate::error::{SirsError, SirsResult};
use crate::statistics::DEFAULT_BOOTSTRAP_ITERATIONS;

/// Top-level simulation configuration.
///
/// Loaded from YAML files with full schema validation:
///
/// ```yaml
/// lattice:
///   rows: 50
///   cols: 50
///   prob_si: 0.8
///   prob_ir: 0.1
///   prob_rs: 0.01
/// run:
///   sweeps: 10000
///   burn_in: 5000
///   measurement_interval: 10
/// reproducibility:
///   seed: 42
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SirsConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Lattice shape, transition probabilities and initial state.
    #[validate(nested)]
    #[serde(default)]
    pub lattice: LatticeConfig,

    /// Sweep schedule and estimator settings.
    #[validate(nested)]
    #[serde(default)]
    pub run: RunConfig,

    /// Reproducibility settings.
    #[serde(default)]
    pub reproducibility: ReproducibilityConfig,

    /// Output file settings.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl SirsConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SirsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SirsResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize configuration to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> SirsResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> SirsConfigBuilder {
        SirsConfigBuilder::default()
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn check(&self) -> SirsResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Validate constraints the schema cannot express.
    fn validate_semantic(&self) -> SirsResult<()> {
        // Jackknife needs two measurements to be defined.
        let measurements = self.run.expected_measurements().ok_or_else(|| {
            SirsError::config(format!(
                "run schedule overflows usize (sweeps={}, burn_in={}, measurement_interval={})",
                self.run.sweeps, self.run.burn_in, self.run.measurement_interval
            ))
        })?;
        if measurements < 2 {
            return Err(SirsError::config(format!(
                "run schedule records {measurements} measurement(s); at least 2 are required \
                 (sweeps={}, burn_in={}, measurement_interval={})",
                self.run.sweeps, self.run.burn_in, self.run.measurement_interval
            )));
        }
        Ok(())
    }

    /// Validated transition probabilities for the lattice.
    ///
    /// # Errors
    ///
    /// Returns error if any probability is outside `[0, 1]`.
    pub fn transition_probabilities(&self) -> SirsResult<TransitionProbabilities> {
        TransitionProbabilities::new(
            self.lattice.prob_si,
            self.lattice.prob_ir,
            self.lattice.prob_rs,
        )
    }
}

impl Default for SirsConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            lattice: LatticeConfig::default(),
            run: RunConfig::default(),
            reproducibility: ReproducibilityConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct SirsConfigBuilder {
    rows: Option<usize>,
    cols: Option<usize>,
    prob_si: Option<f64>,
    prob_ir: Option<f64>,
    prob_rs: Option<f64>,
    initial: Option<InitialState>,
    sweeps: Option<usize>,
    burn_in: Option<usize>,
    measurement_interval: Option<usize>,
    bootstrap_iterations: Option<usize>,
    animate: Option<bool>,
    seed: Option<u64>,
    directory: Option<PathBuf>,
}

impl SirsConfigBuilder {
    /// Set the lattice dimensions.
    #[must_use]
    pub const fn dimensions(mut self, rows: usize, cols: usize) -> Self {
        self.rows = Some(rows);
        self.cols = Some(cols);
        self
    }

    /// Set the three transition probabilities.
    #[must_use]
    pub const fn probabilities(mut self, prob_si: f64, prob_ir: f64, prob_rs: f64) -> Self {
        self.prob_si = Some(prob_si);
        self.prob_ir = Some(prob_ir);
        self.prob_rs = Some(prob_rs);
        self
    }

    /// Set the initial lattice state.
    #[must_use]
    pub const fn initial(mut self, initial: InitialState) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Set the number of measured sweeps.
    #[must_use]
    pub const fn sweeps(mut self, sweeps: usize) -> Self {
        self.sweeps = Some(sweeps);
        self
    }

    /// Set the number of discarded burn-in sweeps.
    #[must_use]
    pub const fn burn_in(mut self, burn_in: usize) -> Self {
        self.burn_in = Some(burn_in);
        self
    }

    /// Set the sweep interval between measurements.
    #[must_use]
    pub const fn measurement_interval(mut self, interval: usize) -> Self {
        self.measurement_interval = Some(interval);
        self
    }

    /// Set the bootstrap resample count.
    #[must_use]
    pub const fn bootstrap_iterations(mut self, iterations: usize) -> Self {
        self.bootstrap_iterations = Some(iterations);
        self
    }

    /// Rewrite the lattice snapshot at every measurement.
    #[must_use]
    pub const fn animate(mut self, animate: bool) -> Self {
        self.animate = Some(animate);
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the output directory.
    #[must_use]
    pub fn output_dir(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Build the configuration.
    ///
    /// The result is not validated; call [`SirsConfig::check`] before use.
    #[must_use]
    pub fn build(self) -> SirsConfig {
        let mut config = SirsConfig::default();

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
        if let Some(sweeps) = self.sweeps {
            config.run.sweeps = sweeps;
        }
        if let Some(burn_in) = self.burn_in {
            config.run.burn_in = burn_in;
        }
        if let Some(interval) = self.measurement_interval {
            config.run.measurement_interval = interval;
        }
        if let Some(iterations) = self.bootstrap_iterations {
            config.run.bootstrap_iterations = iterations;
        }
        if let Some(animate) = self.animate {
            config.run.animate = animate;
        }
        if let Some(seed) = self.seed {
            config.reproducibility.seed = seed;
        }
        if self.directory.is_some() {
            config.output.directory = self.directory;
        }

        config
    }
}

/// Lattice configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LatticeConfig {
    /// Number of rows.
    #[validate(range(min = 1))]
    #[serde(default = "default_extent")]
    pub rows: usize,
    /// Number of columns.
    #[validate(range(min = 1))]
    #[serde(default = "default_extent")]
    pub cols: usize,
    /// Probability of S → I on contact with an infected neighbour.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_probability")]
    pub prob_si: f64,
    /// Probability of I → R.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_probability")]
    pub prob_ir: f64,
    /// Probability of R → S.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_probability")]
    pub prob_rs: f64,
    /// Initial cell states.
    #[serde(default)]
    pub initial: InitialState,
}

const fn default_extent() -> usize {
    50
}

const fn default_probability() -> f64 {
    1.0
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            rows: default_extent(),
            cols: default_extent(),
            prob_si: default_probability(),
            prob_ir: default_probability(),
            prob_rs: default_probability(),
            initial: InitialState::default(),
        }
    }
}

/// How the lattice is populated before the first sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitialState {
    /// Each cell drawn uniformly from the three states.
    #[default]
    Random,
    /// Every cell susceptible.
    Susceptible,
    /// Every cell infected.
    Infected,
    /// Every cell recovered.
    Recovered,
}

impl InitialState {
    /// The uniform fill state, or `None` for a random lattice.
    #[must_use]
    pub const fn uniform_state(self) -> Option<CellState> {
        match self {
            Self::Random => None,
            Self::Susceptible => Some(CellState::Susceptible),
            Self::Infected => Some(CellState::Infected),
            Self::Recovered => Some(CellState::Recovered),
        }
    }
}

impl std::str::FromStr for InitialState {
    type Err = SirsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Self::Random),
            "susceptible" => Ok(Self::Susceptible),
            "infected" => Ok(Self::Infected),
            "recovered" => Ok(Self::Recovered),
            other => Err(SirsError::config(format!("unknown initial state '{other}'"))),
        }
    }
}

/// Sweep schedule and estimator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Number of measured sweeps after burn-in.
    #[validate(range(min = 1))]
    #[serde(default = "default_sweeps")]
    pub sweeps: usize,
    /// Number of discarded sweeps before measurement starts.
    #[serde(default = "default_burn_in")]
    pub burn_in: usize,
    /// Sweeps between measurements.
    #[validate(range(min = 1))]
    #[serde(default = "default_measurement_interval")]
    pub measurement_interval: usize,
    /// Bootstrap resample count.
    #[validate(range(min = 1))]
    #[serde(default = "default_bootstrap_iterations")]
    pub bootstrap_iterations: usize,
    /// Rewrite the lattice snapshot file at each measurement.
    #[serde(default)]
    pub animate: bool,
}

const fn default_sweeps() -> usize {
    10_000
}

const fn default_burn_in() -> usize {
    5_000
}

const fn default_measurement_interval() -> usize {
    10
}

const fn default_bootstrap_iterations() -> usize {
    DEFAULT_BOOTSTRAP_ITERATIONS
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sweeps: default_sweeps(),
            burn_in: default_burn_in(),
            measurement_interval: default_measurement_interval(),
            bootstrap_iterations: default_bootstrap_iterations(),
            animate: false,
        }
    }
}

impl RunConfig {
    /// Total sweeps including burn-in, or `None` if the sum overflows.
    #[must_use]
    pub const fn total_sweeps(&self) -> Option<usize> {
        self.burn_in.checked_add(self.sweeps)
    }

    /// True if `sweep` is recorded.
    #[must_use]
    pub const fn is_measurement_sweep(&self, sweep: usize) -> bool {
        sweep >= self.burn_in && sweep % self.measurement_interval == 0
    }

    /// Number of sweeps in `[burn_in, burn_in + sweeps)` that are multiples of
    /// the measurement interval. `None` if the schedule overflows `usize`.
    #[must_use]
    pub fn expected_measurements(&self) -> Option<usize> {
        if self.measurement_interval == 0 || self.sweeps == 0 {
            return Some(0);
        }
        let interval = self.measurement_interval;
        let end = self.total_sweeps()?;
        let first = self.burn_in.div_ceil(interval).checked_mul(interval)?;
        if first >= end {
            Some(0)
        } else {
            Some((end - 1 - first) / interval + 1)
        }
    }
}

/// Reproducibility settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReproducibilityConfig {
    /// Master seed for the single simulation stream.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

const fn default_seed() -> u64 {
    42
}

impl Default for ReproducibilityConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output directory; a timestamped name is used when absent.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}
