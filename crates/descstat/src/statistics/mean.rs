//! Arithmetic mean.

use descstat_core::kernels::moments::{MomentOrder, Moments};
use descstat_core::{check_range, Result};

use super::impl_double_statistic;

/// Arithmetic mean of `f64` values.
///
/// The running mean is updated as `m += (x - m) / n`, so it never forms the
/// raw sum and cannot overflow for finite input. The array algorithm adds a
/// compensated correction pass.
///
/// If any value is infinite or NaN the mean is the IEEE-754 sum of those
/// values: `inf`, `-inf`, or `NaN` when both infinities (or a NaN) were seen.
///
/// # Example
///
/// ```
/// use descstat::statistics::Mean;
///
/// let mean = Mean::of(&[f64::MAX, f64::MAX]);
/// assert_eq!(mean.get_as_double(), f64::MAX);
/// assert!(Mean::new().get_as_double().is_nan());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mean {
    moments: Moments,
}

impl Mean {
    /// Creates an empty mean.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            moments: Moments::new(MomentOrder::First),
        }
    }

    /// Creates the mean of an array.
    #[must_use]
    pub fn of(values: &[f64]) -> Self {
        Self {
            moments: Moments::of(MomentOrder::First, values),
        }
    }

    /// Creates the mean of `values[from..to]`.
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

    /// Merges another mean into this one.
    pub fn combine(&mut self, other: &Self) -> &mut Self {
        self.moments.combine(&other.moments);
        self
    }

    /// Number of values accepted.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.moments.count()
    }

    /// The mean, `NaN` when empty.
    #[must_use]
    pub fn get_as_double(&self) -> f64 {
        self.moments.mean()
    }
}

impl_double_statistic!(Mean);
