//! # sirsim
//!
//! Monte Carlo simulation of the SIRS epidemic model on a toroidal lattice,
//! with bootstrap and jackknife error analysis.
//!
//! - [`engine`]: the lattice, its transition rule and the seeded generator
//! - [`statistics`]: sample series, scalar statistics and resampling estimators
//! - [`config`]: YAML configuration with validation
//! - [`driver`]: sweep loop, measurements, reports and output files
//! - [`cli`]: the `sirsim` command line
//!
//! ## Example
//!
//! ```rust
//! use sirsim::prelude::*;
//!
//! let config = SirsConfig::builder()
//!     .dimensions(10, 10)
//!     .probabilities(0.8, 0.1, 0.01)
//!     .burn_in(20)
//!     .sweeps(100)
//!     .measurement_interval(5)
//!     .seed(42)
//!     .build();
//!
//! let results = SimulationDriver::new(config).unwrap().run().unwrap();
//! assert!(results.susceptibility >= 0.0);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::suspicious_operation_groupings,  // False positive for variance = E[X²] - E[X]²
    clippy::imprecise_flops,   // Numerical code choices are intentional
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
)]

pub mod cli;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod statistics;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{InitialState, SirsConfig, SirsConfigBuilder};
    pub use crate::driver::{Measurement, RunObserver, SimulationDriver, SirsResults};
    pub use crate::engine::lattice::{CellState, SirsLattice, TransitionProbabilities};
    pub use crate::engine::rng::{RandomSource, SimRng};
    pub use crate::error::{SirsError, SirsResult};
    pub use crate::statistics::{bootstrap, jackknife, SampleSeries, ScalarStatistic, Susceptibility};
}

/// Re-export for public API
pub use error::{SirsError, SirsResult};
