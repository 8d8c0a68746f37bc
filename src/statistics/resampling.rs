//! Bootstrap and jackknife error estimates for any scalar statistic.
//!
//! Both estimators answer the same question: given one realized series and a
//! statistic evaluated on the whole of it, how uncertain is that statistic?
//! Neither mutates `data`.

use super::series::{clamped_spread, SampleSeries};
use super::statistic::ScalarStatistic;
use crate::engine::rng::RandomSource;
use crate::error::{SirsError, SirsResult};

/// Resample count used when the caller has no preference.
pub const DEFAULT_BOOTSTRAP_ITERATIONS: usize = 100;

/// Bootstrap error of `statistic` on `data`.
///
/// Each of `iterations` rounds draws `data.len()` indices uniformly with
/// replacement, evaluates the statistic on the resample, and records it. The
/// result is the standard deviation of the recorded values,
/// `sqrt(E[θ²] − E[θ]²)`.
///
/// Cost is O(`iterations` × `data.len()`).
///
/// # Errors
///
/// Returns an error if `data` is empty or `iterations` is zero.
///
/// # Example
///
/// ```rust
/// use sirsim::engine::rng::SimRng;
/// use sirsim::statistics::{bootstrap, SampleSeries, Susceptibility};
///
/// let data: SampleSeries = vec![0.2, 0.25, 0.3, 0.22, 0.28].into();
/// let mut rng = SimRng::new(42);
/// let error = bootstrap(&Susceptibility, &data, &mut rng, 100).unwrap();
/// assert!(error >= 0.0);
/// ```
pub fn bootstrap<S, R>(
    statistic: &S,
    data: &SampleSeries,
    rng: &mut R,
    iterations: usize,
) -> SirsResult<f64>
where
    S: ScalarStatistic + ?Sized,
    R: RandomSource + ?Sized,
{
    if data.is_empty() {
        return Err(SirsError::InsufficientSamples {
            operation: "bootstrap",
            required: 1,
            found: 0,
        });
    }
    if iterations == 0 {
        return Err(SirsError::estimator("bootstrap needs at least one iteration"));
    }

    let n = data.len();
    let samples = data.as_slice();
    let mut estimates = SampleSeries::with_capacity(iterations);

    for _ in 0..iterations {
        let resample: SampleSeries = (0..n).map(|_| samples[rng.next_index(n)]).collect();
        estimates.push(statistic.evaluate(&resample));
    }

    Ok(clamped_spread(estimates.square_mean()?, estimates.mean()?).sqrt())
}

/// Jackknife error of `statistic` on `data`.
///
/// Evaluates the statistic on every leave-one-out series (order preserved) and
/// returns `sqrt((E[θ²] − E[θ]²) · n)`. The factor `n` inflates the spread of
/// the nearly identical leave-one-out values.
///
/// Cost is O(`n²`).
///
/// # Errors
///
/// Returns an error if `data` has fewer than two samples.
pub fn jackknife<S>(statistic: &S, data: &SampleSeries) -> SirsResult<f64>
where
    S: ScalarStatistic + ?Sized,
{
    let n = data.len();
    if n < 2 {
        return Err(SirsError::InsufficientSamples {
            operation: "jackknife",
            required: 2,
            found: n,
        });
    }

    let estimates: SampleSeries = (0..n)
        .map(|i| statistic.evaluate(&data.without(i)))
        .collect();

    let spread = clamped_spread(estimates.square_mean()?, estimates.mean()?);
    Ok((spread * n as f64).sqrt())
}
