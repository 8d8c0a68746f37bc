//! Scalar statistics of a sample series.

use super::series::SampleSeries;

/// A pure map from a sample series to one scalar.
///
/// Implementations must be deterministic and hold no state between calls:
/// the resampling estimators evaluate them many times on freshly built
/// series. They must also be total, returning a value for series of any
/// length, including zero.
///
/// Closures of type `Fn(&SampleSeries) -> f64` implement this trait, so ad-hoc
/// statistics can be passed straight to the estimators:
///
/// ```rust
/// use sirsim::statistics::{jackknife, SampleSeries, ScalarStatistic};
///
/// let max = |s: &SampleSeries| s.iter().copied().fold(f64::MIN, f64::max);
/// let series: SampleSeries = vec![1.0, 3.0, 2.0].into();
/// assert_eq!(max.evaluate(&series), 3.0);
/// assert!(jackknife(&max, &series).is_ok());
/// ```
pub trait ScalarStatistic {
    /// Evaluate the statistic on `data`.
    fn evaluate(&self, data: &SampleSeries) -> f64;
}

impl<F> ScalarStatistic for F
where
    F: Fn(&SampleSeries) -> f64,
{
    fn evaluate(&self, data: &SampleSeries) -> f64 {
        self(data)
    }
}

/// Fluctuation of an observable: `E[x²] − E[x]²`.
///
/// Applied to the order parameter this is the (statistical) susceptibility.
/// An empty series has zero susceptibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Susceptibility;

impl ScalarStatistic for Susceptibility {
    fn evaluate(&self, data: &SampleSeries) -> f64 {
        data.variance().unwrap_or(0.0)
    }
}

/// Arithmetic mean; zero for an empty series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mean;

impl ScalarStatistic for Mean {
    fn evaluate(&self, data: &SampleSeries) -> f64 {
        data.mean().unwrap_or(0.0)
    }
}
