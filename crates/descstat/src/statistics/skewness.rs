//! Skewness.

use descstat_core::kernels::derived;
use descstat_core::kernels::moments::{MomentOrder, Moments};
use descstat_core::{check_range, Result};

use super::impl_double_statistic;

/// Skewness of `f64` values.
///
/// The default is the adjusted Fisher-Pearson coefficient
/// `n sqrt(n - 1) S3 / ((n - 2) S2^1.5)`; the biased form is
/// `sqrt(n) S3 / S2^1.5`. Fewer than three values, a zero variance, or any
/// non-finite value give `NaN`.
///
/// # Example
///
/// ```
/// use descstat::statistics::Skewness;
///
/// let s = Skewness::of(&[1.0, 2.0, 4.0, 8.0]);
/// assert!((s.get_as_double() - 1.137_624_366_957_688_9).abs() < 1e-14);
/// assert!(Skewness::of(&[1.0, 2.0]).get_as_double().is_nan());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Skewness {
    moments: Moments,
    biased: bool,
}

impl Skewness {
    /// Creates an empty, unbiased skewness.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            moments: Moments::new(MomentOrder::Third),
            biased: false,
        }
    }

    /// Creates the skewness of an array.
    #[must_use]
    pub fn of(values: &[f64]) -> Self {
        Self {
            moments: Moments::of(MomentOrder::Third, values),
            biased: false,
        }
    }

    /// Creates the skewness of `values[from..to]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds)
    /// unless `from <= to <= values.len()`.
    pub fn of_range(values: &[f64], from: usize, to: usize) -> Result<Self> {
        check_range(values.len(), from, to)?;
        Ok(Self::of(&values[from..to]))
    }

    /// Adds a value.
    #[inline]
    pub fn accept(&mut self, x: f64) {
        self.moments.accept(x);
    }

    /// Merges another skewness into this one. The bias mode of `self` is kept.
    pub fn combine(&mut self, other: &Self) -> &mut Self {
        self.moments.combine(&other.moments);
        self
    }

    /// Selects the biased estimator.
    pub fn set_biased(&mut self, biased: bool) -> &mut Self {
        self.biased = biased;
        self
    }

    /// Returns `true` if the biased estimator is selected.
    #[must_use]
    pub const fn is_biased(&self) -> bool {
        self.biased
    }

    /// Number of values accepted.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.moments.count()
    }

    /// The skewness under the selected estimator.
    #[must_use]
    pub fn get_as_double(&self) -> f64 {
        derived::skewness(
            self.moments.count(),
            self.moments.sum_of_squared_deviations(),
            self.moments.sum_of_cubed_deviations(),
            self.biased,
        )
    }
}

impl_double_statistic!(Skewness, biased);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skewness_known_values() {
        let mut s = Skewness::of(&[1.0, 2.0, 4.0, 8.0]);
        assert!((s.get_as_double() - 1.137_624_366_957_688_9).abs() < 1e-14);
        assert!((s.set_biased(true).get_as_double() - 0.656_807_734_499_699_3).abs() < 1e-14);
    }

    #[test]
    fn test_skewness_symmetric_is_zero() {
        let s = Skewness::of(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(s.get_as_double(), 0.0);
    }

    #[test]
    fn test_skewness_needs_three_values() {
        for biased in [false, true] {
            let mut s = Skewness::of(&[1.0, 5.0]);
            assert!(s.set_biased(biased).get_as_double().is_nan());
            assert!(Skewness::new().set_biased(biased).get_as_double().is_nan());
        }
    }

    #[test]
    fn test_skewness_zero_variance_is_nan() {
        assert!(Skewness::of(&[2.0, 2.0, 2.0, 2.0]).get_as_double().is_nan());
        let streamed: Skewness = [7.0; 10].into_iter().collect();
        assert!(streamed.get_as_double().is_nan());
    }

    #[test]
    fn test_skewness_streaming_and_combine() {
        let data = [1.0, 2.0, 4.0, 8.0, 16.0, -3.0, 0.5];
        let whole = Skewness::of(&data).get_as_double();
        let streamed: Skewness = data.into_iter().collect();
        assert!((streamed.get_as_double() - whole).abs() < 1e-13);

        let mut left = Skewness::of(&data[..2]);
        left.combine(&Skewness::of(&data[2..]));
        assert!((left.get_as_double() - whole).abs() < 1e-13);
    }

    #[test]
    fn test_skewness_non_finite_is_nan() {
        assert!(Skewness::of(&[1.0, 2.0, f64::NEG_INFINITY, 3.0])
            .get_as_double()
            .is_nan());
    }
}
