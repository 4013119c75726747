//! Core traits shared by every statistic.
//!
//! A statistic is a mutable accumulator: it [`Accept`]s observations one at a
//! time, [`Combine`]s with another accumulator of the same type built over
//! disjoint data, and reports its current value through [`Statistic`].
//! Statistics that also have a dedicated array algorithm implement
//! [`ArrayStatistic`], which is what the configuration and partitioned
//! evaluation helpers are generic over.

use num_traits::{PrimInt, Signed};

/// A statistic whose current value can be read as an `f64`.
pub trait Statistic {
    /// The current value of the statistic.
    ///
    /// Undefined results (too few observations, non-finite input) are `NaN`
    /// rather than errors.
    fn get_as_double(&self) -> f64;
}

/// An accumulator of observations of type `T`.
pub trait Accept<T> {
    /// Adds one observation.
    fn accept(&mut self, value: T);
}

/// An accumulator that can absorb another accumulator of the same type.
pub trait Combine {
    /// Merges `other` into `self` as if every value accepted by `other` had
    /// been accepted by `self`.
    ///
    /// `other` is never modified. To merge a statistic with itself, merge a
    /// clone.
    fn combine(&mut self, other: &Self) -> &mut Self;
}

/// A statistic with a biased and an unbiased estimator.
pub trait BiasConfigurable {
    /// Selects the biased (population) or unbiased (sample) estimator.
    fn set_biased(&mut self, biased: bool) -> &mut Self;

    /// Returns `true` if the biased estimator is selected.
    fn is_biased(&self) -> bool;
}

/// A double statistic with an array algorithm.
///
/// The array algorithm may be more accurate than accepting the values one by
/// one (for example the multi-pass moment computation).
///
/// # Example
///
/// ```
/// use descstat_core::traits::{Accept, ArrayStatistic, Combine, Statistic};
///
/// fn merged<S: ArrayStatistic>(a: &[f64], b: &[f64]) -> f64 {
///     let mut left = S::of(a);
///     left.combine(&S::of(b));
///     left.get_as_double()
/// }
/// # #[derive(Clone)]
/// # struct Count(u64);
/// # impl Statistic for Count { fn get_as_double(&self) -> f64 { self.0 as f64 } }
/// # impl Accept<f64> for Count { fn accept(&mut self, _: f64) { self.0 += 1; } }
/// # impl Combine for Count { fn combine(&mut self, o: &Self) -> &mut Self { self.0 += o.0; self } }
/// # impl ArrayStatistic for Count { fn of(v: &[f64]) -> Self { Count(v.len() as u64) } }
/// assert_eq!(merged::<Count>(&[1.0, 2.0], &[3.0]), 3.0);
/// ```
pub trait ArrayStatistic: Statistic + Accept<f64> + Combine + Clone + Sized {
    /// Creates the statistic from an array of values.
    fn of(values: &[f64]) -> Self;

    /// Applies the bias mode of a configuration.
    ///
    /// Statistics without a bias mode ignore it.
    fn configure(&mut self, _biased: bool) {}
}

/// An integer type accepted by the exact integer statistics.
///
/// Implemented for `i32` and `i64`. Every sample widens losslessly to `i64`,
/// and its magnitude fits in a `u64`, so squares fit in 128 bits.
pub trait IntegerSample: PrimInt + Signed + Into<i64> + Send + Sync + 'static {
    /// Short type name used in error context and logs.
    const NAME: &'static str;

    /// Widens to `i64`.
    #[inline]
    fn widen(self) -> i64 {
        self.into()
    }

    /// The magnitude of the value.
    #[inline]
    fn magnitude(self) -> u64 {
        self.widen().unsigned_abs()
    }
}

impl IntegerSample for i32 {
    const NAME: &'static str = "i32";
}

impl IntegerSample for i64 {
    const NAME: &'static str = "i64";
}
