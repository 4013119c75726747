//! Excess kurtosis.

use descstat_core::kernels::derived;
use descstat_core::kernels::moments::{MomentOrder, Moments};
use descstat_core::{check_range, Result};

use super::impl_double_statistic;

/// Excess kurtosis of `f64` values.
///
/// The default is the bias-corrected estimator
///
/// ```text
/// (n+1) n (n-1) S4 / ((n-2)(n-3) S2^2) - 3 (n-1)^2 / ((n-2)(n-3))
/// ```
///
/// and the biased form is `n S4 / S2^2 - 3`. Fewer than four values, a zero
/// variance, or any non-finite value give `NaN`.
///
/// # Example
///
/// ```
/// use descstat::statistics::Kurtosis;
///
/// let mut k = Kurtosis::of(&[1.0, 2.0, 4.0, 8.0]);
/// assert!((k.set_biased(true).get_as_double() + 1.098_979_206_049_149_4).abs() < 1e-14);
/// assert!(Kurtosis::of(&[1.0, 2.0, 4.0]).get_as_double().is_nan());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Kurtosis {
    moments: Moments,
    biased: bool,
}

impl Kurtosis {
    /// Creates an empty, unbiased kurtosis.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            moments: Moments::new(MomentOrder::Fourth),
            biased: false,
        }
    }

    /// Creates the kurtosis of an array.
    #[must_use]
    pub fn of(values: &[f64]) -> Self {
        Self {
            moments: Moments::of(MomentOrder::Fourth, values),
            biased: false,
        }
    }

    /// Creates the kurtosis of `values[from..to]`.
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

    /// Merges another kurtosis into this one. The bias mode of `self` is kept.
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

    /// The excess kurtosis under the selected estimator.
    #[must_use]
    pub fn get_as_double(&self) -> f64 {
        derived::kurtosis(
            self.moments.count(),
            self.moments.sum_of_squared_deviations(),
            self.moments.sum_of_fourth_deviations(),
            self.biased,
        )
    }
}

impl_double_statistic!(Kurtosis, biased);
