//! Measurement statistics and resampling error analysis.
//!
//! - [`SampleSeries`]: append-only measurements with running moments
//! - [`ScalarStatistic`]: any pure map from a series to one number
//! - [`bootstrap`] / [`jackknife`]: error of a statistic by resampling

pub mod resampling;
pub mod series;
pub mod statistic;

pub use resampling::{bootstrap, jackknife, DEFAULT_BOOTSTRAP_ITERATIONS};
pub use series::SampleSeries;
pub use statistic::{Mean, ScalarStatistic, Susceptibility};
