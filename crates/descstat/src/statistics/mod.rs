//! Statistic objects.
//!
//! Every statistic is a small mutable accumulator. It can be created empty
//! with `new()`, seeded from an array with `of()` (which may use a more
//! accurate multi-pass algorithm), fed values with `accept()`, merged with a
//! statistic of the same type built over other data with `combine()`, and
//! read at any time.
//!
//! # Double statistics
//!
//! | Statistic | Value | Empty |
//! |-----------|-------|-------|
//! | [`Mean`] | arithmetic mean | `NaN` |
//! | [`Variance`] | unbiased (default) or biased variance | `NaN` |
//! | [`StandardDeviation`] | square root of the variance | `NaN` |
//! | [`Skewness`] | adjusted Fisher-Pearson skewness | `NaN` |
//! | [`Kurtosis`] | excess kurtosis | `NaN` |
//! | [`Sum`] | compensated sum | `0` |
//! | [`Product`] | product | `1` |
//! | [`SumOfSquares`] | `sum(x^2)` | `0` |
//! | [`SumOfSquaredDeviations`] | `sum((x - mean)^2)` | `0` |
//! | [`SumOfCubedDeviations`] | `sum((x - mean)^3)` | `0` |
//! | [`SumOfFourthDeviations`] | `sum((x - mean)^4)` | `0` |
//!
//! # Integer statistics
//!
//! [`IntSum`], [`LongSum`], [`IntSumOfSquares`], [`LongSumOfSquares`],
//! [`IntMean`], [`LongMean`], [`IntVariance`], [`LongVariance`],
//! [`IntStandardDeviation`] and [`LongStandardDeviation`] accumulate exactly
//! in wide integers and round once when read.
//!
//! # Example
//!
//! ```
//! use descstat::statistics::{Mean, Variance};
//!
//! let mut left = Variance::of(&[1.0, 2.0]);
//! let right = Variance::of(&[3.0, 4.0]);
//! left.combine(&right);
//! assert!((left.get_as_double() - 1.666_666_666_666_666_7).abs() < 1e-15);
//!
//! let mean: Mean = [1.0, 2.0, 3.0].into_iter().collect();
//! assert_eq!(mean.get_as_double(), 2.0);
//! ```

mod deviations;
mod integer;
mod kurtosis;
mod mean;
mod skewness;
mod sums;
mod variance;

pub use deviations::{SumOfCubedDeviations, SumOfFourthDeviations, SumOfSquaredDeviations};
pub use integer::{
    IntMean, IntStandardDeviation, IntSum, IntSumOfSquares, IntVariance, IntegerMean,
    IntegerStandardDeviation, IntegerSum, IntegerSumOfSquares, IntegerVariance, LongMean,
    LongStandardDeviation, LongSum, LongSumOfSquares, LongVariance,
};
pub use kurtosis::Kurtosis;
pub use mean::Mean;
pub use skewness::Skewness;
pub use sums::{Product, Sum, SumOfSquares};
pub use variance::{StandardDeviation, Variance};

/// Implements the capability traits of a double statistic by delegating to
/// its inherent `new`, `of`, `accept`, `combine` and `get_as_double`.
///
/// The `biased` form also forwards `set_biased`/`is_biased` and applies the
/// configured bias in [`ArrayStatistic::configure`].
///
/// [`ArrayStatistic::configure`]: crate::ArrayStatistic::configure
macro_rules! impl_double_statistic {
    ($ty:ty) => {
        impl_double_statistic!(@common $ty);

        impl $crate::ArrayStatistic for $ty {
            fn of(values: &[f64]) -> Self {
                <$ty>::of(values)
            }
        }
    };
    ($ty:ty, biased) => {
        impl_double_statistic!(@common $ty);

        impl $crate::ArrayStatistic for $ty {
            fn of(values: &[f64]) -> Self {
                <$ty>::of(values)
            }

            fn configure(&mut self, biased: bool) {
                <$ty>::set_biased(self, biased);
            }
        }

        impl $crate::BiasConfigurable for $ty {
            fn set_biased(&mut self, biased: bool) -> &mut Self {
                <$ty>::set_biased(self, biased)
            }

            fn is_biased(&self) -> bool {
                <$ty>::is_biased(self)
            }
        }
    };
    (@common $ty:ty) => {
        impl Default for $ty {
            fn default() -> Self {
                <$ty>::new()
            }
        }

        impl $crate::Statistic for $ty {
            fn get_as_double(&self) -> f64 {
                <$ty>::get_as_double(self)
            }
        }

        impl $crate::Accept<f64> for $ty {
            fn accept(&mut self, value: f64) {
                <$ty>::accept(self, value);
            }
        }

        impl $crate::Combine for $ty {
            fn combine(&mut self, other: &Self) -> &mut Self {
                <$ty>::combine(self, other)
            }
        }

        impl Extend<f64> for $ty {
            fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
                for x in iter {
                    <$ty>::accept(self, x);
                }
            }
        }

        impl<'a> Extend<&'a f64> for $ty {
            fn extend<I: IntoIterator<Item = &'a f64>>(&mut self, iter: I) {
                for &x in iter {
                    <$ty>::accept(self, x);
                }
            }
        }

        impl FromIterator<f64> for $ty {
            fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
                let mut stat = <$ty>::new();
                stat.extend(iter);
                stat
            }
        }
    };
}

pub(crate) use impl_double_statistic;
