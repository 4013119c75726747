//! Variance and standard deviation.

use descstat_core::kernels::derived;
use descstat_core::kernels::moments::{MomentOrder, Moments};
use descstat_core::{check_range, Result};

use super::impl_double_statistic;

/// Variance of `f64` values.
///
/// By default the unbiased (sample) estimator `S2 / (n - 1)` is reported;
/// [`set_biased(true)`](Self::set_biased) selects the population estimator
/// `S2 / n`.
///
/// | n | unbiased | biased |
/// |---|----------|--------|
/// | 0 | `NaN` | `NaN` |
/// | 1 | `NaN` | `0` |
///
/// Any infinite or NaN input makes the variance `NaN`.
///
/// # Example
///
/// ```
/// use descstat::statistics::Variance;
///
/// let mut v = Variance::of(&[1.0, 2.0, 3.0, 4.0]);
/// assert!((v.get_as_double() - 1.666_666_666_666_666_7).abs() < 1e-15);
/// assert_eq!(v.set_biased(true).get_as_double(), 1.25);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Variance {
    moments: Moments,
    biased: bool,
}

impl Variance {
    /// Creates an empty, unbiased variance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            moments: Moments::new(MomentOrder::Second),
            biased: false,
        }
    }

    /// Creates the variance of an array.
    #[must_use]
    pub fn of(values: &[f64]) -> Self {
        Self {
            moments: Moments::of(MomentOrder::Second, values),
            biased: false,
        }
    }

    /// Creates the variance of `values[from..to]`.
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

    /// Merges another variance into this one. The bias mode of `self` is kept.
    pub fn combine(&mut self, other: &Self) -> &mut Self {
        self.moments.combine(&other.moments);
        self
    }

    /// Selects the biased (population) estimator.
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

    /// The variance under the selected estimator.
    #[must_use]
    pub fn get_as_double(&self) -> f64 {
        derived::variance(
            self.moments.count(),
            self.moments.sum_of_squared_deviations(),
            self.biased,
        )
    }
}

impl_double_statistic!(Variance, biased);

/// Standard deviation of `f64` values: the square root of [`Variance`].
///
/// # Example
///
/// ```
/// use descstat::statistics::StandardDeviation;
///
/// let mut sd = StandardDeviation::of(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert_eq!(sd.set_biased(true).get_as_double(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StandardDeviation {
    variance: Variance,
}

impl StandardDeviation {
    /// Creates an empty, unbiased standard deviation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            variance: Variance::new(),
        }
    }

    /// Creates the standard deviation of an array.
    #[must_use]
    pub fn of(values: &[f64]) -> Self {
        Self {
            variance: Variance::of(values),
        }
    }

    /// Creates the standard deviation of `values[from..to]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds)
    /// unless `from <= to <= values.len()`.
    pub fn of_range(values: &[f64], from: usize, to: usize) -> Result<Self> {
        Ok(Self {
            variance: Variance::of_range(values, from, to)?,
        })
    }

    /// Adds a value.
    #[inline]
    pub fn accept(&mut self, x: f64) {
        self.variance.accept(x);
    }

    /// Merges another standard deviation into this one.
    pub fn combine(&mut self, other: &Self) -> &mut Self {
        self.variance.combine(&other.variance);
        self
    }

    /// Selects the biased (population) estimator.
    pub fn set_biased(&mut self, biased: bool) -> &mut Self {
        self.variance.set_biased(biased);
        self
    }

    /// Returns `true` if the biased estimator is selected.
    #[must_use]
    pub const fn is_biased(&self) -> bool {
        self.variance.is_biased()
    }

    /// Number of values accepted.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.variance.count()
    }

    /// The standard deviation under the selected estimator.
    #[must_use]
    pub fn get_as_double(&self) -> f64 {
        self.variance.get_as_double().sqrt()
    }
}

impl_double_statistic!(StandardDeviation, biased);
