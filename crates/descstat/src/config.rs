//! Statistic configuration.
//!
//! [`StatisticsConfig`] bundles the options that apply to evaluating a
//! statistic over an array: the estimator bias, the [`NanPolicy`], and
//! whether NaN preprocessing may reorder the caller's array.
//!
//! # Example
//!
//! ```
//! use descstat::config::StatisticsConfig;
//! use descstat::nan::NanPolicy;
//! use descstat::statistics::Variance;
//!
//! let config = StatisticsConfig::new()
//!     .biased(true)
//!     .nan_policy(NanPolicy::Exclude);
//!
//! let v: Variance = config.of(&[1.0, f64::NAN, 2.0, 3.0, 4.0]).unwrap();
//! assert_eq!(v.get_as_double(), 1.25);
//! ```

use crate::nan::{NanPolicy, NanTransformer};
use descstat_core::{ArrayStatistic, Result};

/// Minimum number of elements per partition used by
/// [`PartitionedEvaluator`](crate::batch::PartitionedEvaluator) by default.
///
/// Below this size the cost of merging outweighs splitting the work.
pub const DEFAULT_MIN_PARTITION_LEN: usize = 4096;

/// Options for evaluating a statistic over an array.
///
/// Defaults: unbiased, [`NanPolicy::Include`], copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatisticsConfig {
    biased: bool,
    nan_policy: NanPolicy,
    copy: bool,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StatisticsConfig {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            biased: false,
            nan_policy: NanPolicy::Include,
            copy: true,
        }
    }

    /// Sets the estimator bias for statistics that have one.
    ///
    /// Default: `false`
    #[must_use]
    pub const fn biased(mut self, biased: bool) -> Self {
        self.biased = biased;
        self
    }

    /// Sets the NaN policy.
    ///
    /// Default: [`NanPolicy::Include`]
    #[must_use]
    pub const fn nan_policy(mut self, nan_policy: NanPolicy) -> Self {
        self.nan_policy = nan_policy;
        self
    }

    /// Sets whether NaN preprocessing works on a copy.
    ///
    /// Only [`of_range_in_place`](Self::of_range_in_place) honours `false`.
    ///
    /// Default: `true`
    #[must_use]
    pub const fn copy(mut self, copy: bool) -> Self {
        self.copy = copy;
        self
    }

    /// Returns the estimator bias.
    #[must_use]
    pub const fn get_biased(&self) -> bool {
        self.biased
    }

    /// Returns the NaN policy.
    #[must_use]
    pub const fn get_nan_policy(&self) -> NanPolicy {
        self.nan_policy
    }

    /// Returns whether NaN preprocessing works on a copy.
    #[must_use]
    pub const fn get_copy(&self) -> bool {
        self.copy
    }

    /// The NaN transformer for this configuration.
    #[must_use]
    pub const fn transformer(&self) -> NanTransformer {
        NanTransformer::new(self.nan_policy, self.copy)
    }

    /// Evaluates a statistic over a whole array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NanValue`](crate::Error::NanValue) under
    /// [`NanPolicy::Error`] if the array holds a NaN.
    pub fn of<S: ArrayStatistic>(&self, values: &[f64]) -> Result<S> {
        self.of_range(values, 0, values.len())
    }

    /// Evaluates a statistic over `values[from..to]` without modifying it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds)
    /// for an invalid range, or [`Error::NanValue`](crate::Error::NanValue)
    /// under [`NanPolicy::Error`].
    pub fn of_range<S: ArrayStatistic>(&self, values: &[f64], from: usize, to: usize) -> Result<S> {
        let (data, range) = self.transformer().apply_copy(values, from, to)?;
        Ok(self.build(&data[range]))
    }

    /// Evaluates a statistic over `values[from..to]`, letting NaN exclusion
    /// reorder that range in place unless the configuration copies.
    ///
    /// Elements outside `[from, to)` are never touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds)
    /// for an invalid range, or [`Error::NanValue`](crate::Error::NanValue)
    /// under [`NanPolicy::Error`]. `values` is unchanged on error.
    pub fn of_range_in_place<S: ArrayStatistic>(
        &self,
        values: &mut [f64],
        from: usize,
        to: usize,
    ) -> Result<S> {
        let (data, range) = self.transformer().apply(values, from, to)?;
        Ok(self.build(&data[range]))
    }

    fn build<S: ArrayStatistic>(&self, values: &[f64]) -> S {
        let mut stat = S::of(values);
        stat.configure(self.biased);
        stat
    }
}
