//! Append-only series of measurements with running moments.

use crate::error::{SirsError, SirsResult};

/// Ordered, append-only sequence of `f64` samples.
///
/// Keeps running sums of `x` and `x²` so that [`mean`](Self::mean) and
/// [`square_mean`](Self::square_mean) are O(1). Insertion order is preserved
/// for the jackknife's leave-one-out enumeration.
///
/// # Example
///
/// ```rust
/// use sirsim::statistics::SampleSeries;
///
/// let series: SampleSeries = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter().collect();
/// assert_eq!(series.mean().unwrap(), 5.0);
/// assert_eq!(series.variance().unwrap(), 4.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSeries {
    samples: Vec<f64>,
    sum: f64,
    sum_sq: f64,
}

impl SampleSeries {
    /// Create an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty series with room for `capacity` samples.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            sum: 0.0,
            sum_sq: 0.0,
        }
    }

    /// Append a sample.
    pub fn push(&mut self, value: f64) {
        self.samples.push(value);
        self.sum += value;
        self.sum_sq += value * value;
    }

    /// Reserve room for at least `additional` more samples.
    pub fn reserve(&mut self, additional: usize) {
        self.samples.reserve(additional);
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if no samples have been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SirsError::IndexOutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> SirsResult<f64> {
        self.samples
            .get(index)
            .copied()
            .ok_or(SirsError::IndexOutOfRange {
                index,
                len: self.samples.len(),
            })
    }

    /// All samples in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Iterate over samples in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.samples.iter()
    }

    fn require_samples(&self, operation: &'static str) -> SirsResult<f64> {
        if self.samples.is_empty() {
            return Err(SirsError::InsufficientSamples {
                operation,
                required: 1,
                found: 0,
            });
        }
        Ok(self.samples.len() as f64)
    }

    /// Arithmetic mean `E[x]`.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty series.
    pub fn mean(&self) -> SirsResult<f64> {
        let n = self.require_samples("mean")?;
        Ok(self.sum / n)
    }

    /// Uncentered second moment `E[x²]`.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty series.
    pub fn square_mean(&self) -> SirsResult<f64> {
        let n = self.require_samples("square mean")?;
        Ok(self.sum_sq / n)
    }

    /// Population variance `E[x²] − E[x]²`, clamped at zero.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty series.
    pub fn variance(&self) -> SirsResult<f64> {
        let mean = self.mean()?;
        Ok(clamped_spread(self.square_mean()?, mean))
    }

    /// Standard error of the mean, `sqrt(variance / n)`.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty series.
    pub fn standard_error(&self) -> SirsResult<f64> {
        let n = self.require_samples("standard error")?;
        Ok((self.variance()? / n).sqrt())
    }

    /// Copy of the series without the sample at `skip`, order preserved.
    #[must_use]
    pub fn without(&self, skip: usize) -> Self {
        let mut reduced = Self::with_capacity(self.len().saturating_sub(1));
        for (i, &x) in self.samples.iter().enumerate() {
            if i != skip {
                reduced.push(x);
            }
        }
        reduced
    }
}

/// `E[x²] − E[x]²`, clamping cancellation noise below zero.
#[inline]
pub(crate) fn clamped_spread(square_mean: f64, mean: f64) -> f64 {
    (square_mean - mean * mean).max(0.0)
}

impl From<Vec<f64>> for SampleSeries {
    fn from(samples: Vec<f64>) -> Self {
        let sum = samples.iter().sum();
        let sum_sq = samples.iter().map(|x| x * x).sum();
        Self {
            samples,
            sum,
            sum_sq,
        }
    }
}

impl FromIterator<f64> for SampleSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut series = Self::new();
        series.extend(iter);
        series
    }
}

impl Extend<f64> for SampleSeries {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a> IntoIterator for &'a SampleSeries {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
