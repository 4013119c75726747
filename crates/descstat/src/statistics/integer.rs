//! Exact statistics of `i32` and `i64` values.
//!
//! Sums are held in an [`Int128`] and sums of squares in a [`UInt192`], so
//! accumulation never rounds and never overflows for fewer than 2^63 values.
//! The variance numerator `n * sum(x^2) - sum(x)^2` is formed exactly in 256
//! bits and divided once in double-double precision.

use std::marker::PhantomData;

use num_bigint::BigInt;

use descstat_core::kernels::dd::DD;
use descstat_core::kernels::int128::Int128;
use descstat_core::kernels::wide::{UInt128, UInt192};
use descstat_core::{check_range, IntegerSample, Result};

/// Implements the capability traits of an integer statistic by delegating to
/// its inherent methods.
macro_rules! impl_integer_statistic {
    ($name:ident) => {
        impl<T: IntegerSample> Default for $name<T> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T: IntegerSample> $crate::Statistic for $name<T> {
            fn get_as_double(&self) -> f64 {
                $name::get_as_double(self)
            }
        }

        impl<T: IntegerSample> $crate::Accept<T> for $name<T> {
            fn accept(&mut self, value: T) {
                $name::accept(self, value);
            }
        }

        impl<T: IntegerSample> $crate::Combine for $name<T> {
            fn combine(&mut self, other: &Self) -> &mut Self {
                $name::combine(self, other)
            }
        }

        impl<T: IntegerSample> Extend<T> for $name<T> {
            fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
                for x in iter {
                    $name::accept(self, x);
                }
            }
        }

        impl<'a, T: IntegerSample> Extend<&'a T> for $name<T> {
            fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
                for &x in iter {
                    $name::accept(self, x);
                }
            }
        }

        impl<T: IntegerSample> FromIterator<T> for $name<T> {
            fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
                let mut stat = Self::new();
                stat.extend(iter);
                stat
            }
        }
    };
}

/// Exact sum of integers.
///
/// # Example
///
/// ```
/// use descstat::statistics::{IntSum, LongSum};
///
/// let sum = IntSum::of(&[i32::MAX, i32::MAX]);
/// assert_eq!(sum.get_as_long().unwrap(), 2 * i64::from(i32::MAX));
/// assert!(sum.get_as_int().is_err());
///
/// let sum = LongSum::of(&[i64::MAX, 1]);
/// assert_eq!(sum.get_as_double(), 9.223_372_036_854_775_808e18);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerSum<T> {
    sum: Int128,
    _sample: PhantomData<T>,
}

impl<T: IntegerSample> IntegerSum<T> {
    /// Creates an empty sum.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sum: Int128::zero(),
            _sample: PhantomData,
        }
    }

    /// Creates the sum of an array.
    #[must_use]
    pub fn of(values: &[T]) -> Self {
        let mut s = Self::new();
        for &x in values {
            s.accept(x);
        }
        s
    }

    /// Creates the sum of `values[from..to]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds)
    /// unless `from <= to <= values.len()`.
    pub fn of_range(values: &[T], from: usize, to: usize) -> Result<Self> {
        check_range(values.len(), from, to)?;
        Ok(Self::of(&values[from..to]))
    }

    /// Adds a value.
    #[inline]
    pub fn accept(&mut self, x: T) {
        self.sum.add_i64(x.widen());
    }

    /// Merges another sum into this one.
    pub fn combine(&mut self, other: &Self) -> &mut Self {
        self.sum.add(&other.sum);
        self
    }

    /// The exact sum.
    #[must_use]
    pub const fn value(&self) -> Int128 {
        self.sum
    }

    /// The sum as an `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArithmeticOverflow`](crate::Error::ArithmeticOverflow)
    /// if the sum does not fit.
    pub fn get_as_int(&self) -> Result<i32> {
        self.sum.to_i32_exact()
    }

    /// The sum as an `i64`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArithmeticOverflow`](crate::Error::ArithmeticOverflow)
    /// if the sum does not fit.
    pub fn get_as_long(&self) -> Result<i64> {
        self.sum.to_i64_exact()
    }

    /// The sum rounded to the nearest `f64`.
    #[must_use]
    pub fn get_as_double(&self) -> f64 {
        self.sum.to_f64()
    }

    /// The sum as an arbitrary-precision integer.
    #[must_use]
    pub fn get_as_big_integer(&self) -> BigInt {
        self.sum.to_big_int()
    }
}

impl_integer_statistic!(IntegerSum);

/// Exact sum of squares of integers.
///
/// # Example
///
/// ```
/// use descstat::statistics::IntSumOfSquares;
/// use num_bigint::BigInt;
///
/// let s = IntSumOfSquares::of(&[i32::MIN, 3]);
/// assert_eq!(s.get_as_big_integer(), BigInt::from(1_u64 << 62) + 9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerSumOfSquares<T> {
    sum: UInt192,
    _sample: PhantomData<T>,
}

impl<T: IntegerSample> IntegerSumOfSquares<T> {
    /// Creates an empty sum of squares.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sum: UInt192::zero(),
            _sample: PhantomData,
        }
    }

    /// Creates the sum of squares of an array.
    #[must_use]
    pub fn of(values: &[T]) -> Self {
        let mut s = Self::new();
        for &x in values {
            s.accept(x);
        }
        s
    }

    /// Creates the sum of squares of `values[from..to]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds)
    /// unless `from <= to <= values.len()`.
    pub fn of_range(values: &[T], from: usize, to: usize) -> Result<Self> {
        check_range(values.len(), from, to)?;
        Ok(Self::of(&values[from..to]))
    }

    /// Adds the square of a value.
    #[inline]
    pub fn accept(&mut self, x: T) {
        self.sum.add_square(x.magnitude());
    }

    /// Merges another sum of squares into this one.
    pub fn combine(&mut self, other: &Self) -> &mut Self {
        self.sum.add(&other.sum);
        self
    }

    /// The exact sum of squares.
    #[must_use]
    pub const fn value(&self) -> UInt192 {
        self.sum
    }

    /// The sum of squares as an `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArithmeticOverflow`](crate::Error::ArithmeticOverflow)
    /// if the value does not fit.
    pub fn get_as_int(&self) -> Result<i32> {
        self.sum.to_i32_exact()
    }

    /// The sum of squares as an `i64`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArithmeticOverflow`](crate::Error::ArithmeticOverflow)
    /// if the value does not fit.
    pub fn get_as_long(&self) -> Result<i64> {
        self.sum.to_i64_exact()
    }

    /// The sum of squares rounded to the nearest `f64`.
    #[must_use]
    pub fn get_as_double(&self) -> f64 {
        self.sum.to_f64()
    }

    /// The sum of squares as an arbitrary-precision integer.
    #[must_use]
    pub fn get_as_big_integer(&self) -> BigInt {
        self.sum.to_big_int()
    }
}

impl_integer_statistic!(IntegerSumOfSquares);

/// Mean of integers, computed from the exact sum; `NaN` when empty.
///
/// # Example
///
/// ```
/// use descstat::statistics::LongMean;
///
/// let m = LongMean::of(&[i64::MAX, i64::MAX, i64::MAX]);
/// assert_eq!(m.get_as_double(), i64::MAX as f64);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerMean<T> {
    sum: Int128,
    n: u64,
    _sample: PhantomData<T>,
}

impl<T: IntegerSample> IntegerMean<T> {
    /// Creates an empty mean.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sum: Int128::zero(),
            n: 0,
            _sample: PhantomData,
        }
    }

    /// Creates the mean of an array.
    #[must_use]
    pub fn of(values: &[T]) -> Self {
        let mut m = Self::new();
        for &x in values {
            m.accept(x);
        }
        m
    }

    /// Creates the mean of `values[from..to]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds)
    /// unless `from <= to <= values.len()`.
    pub fn of_range(values: &[T], from: usize, to: usize) -> Result<Self> {
        check_range(values.len(), from, to)?;
        Ok(Self::of(&values[from..to]))
    }

    /// Adds a value.
    #[inline]
    pub fn accept(&mut self, x: T) {
        self.sum.add_i64(x.widen());
        self.n += 1;
    }

    /// Merges another mean into this one.
    pub fn combine(&mut self, other: &Self) -> &mut Self {
        self.sum.add(&other.sum);
        self.n += other.n;
        self
    }

    /// Number of values accepted.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.n
    }

    /// The mean.
    #[must_use]
    pub fn get_as_double(&self) -> f64 {
        if self.n == 0 {
            return f64::NAN;
        }
        (self.sum.to_dd() / DD::from_u64(self.n)).to_f64()
    }
}

impl_integer_statistic!(IntegerMean);

/// Variance of integers from exact sums.
///
/// The numerator `n * sum(x^2) - sum(x)^2` is exact; the only roundings are
/// in the final double-double division. Unbiased by default, with the same
/// small-count conventions as the `f64` variance.
///
/// # Example
///
/// ```
/// use descstat::statistics::IntVariance;
///
/// let mut v = IntVariance::of(&[1, 2, 3, 4]);
/// assert_eq!(v.get_as_double(), 5.0 / 3.0);
/// assert_eq!(v.set_biased(true).get_as_double(), 1.25);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerVariance<T> {
    sum: Int128,
    sum_sq: UInt192,
    n: u64,
    biased: bool,
    _sample: PhantomData<T>,
}

impl<T: IntegerSample> IntegerVariance<T> {
    /// Creates an empty, unbiased variance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sum: Int128::zero(),
            sum_sq: UInt192::zero(),
            n: 0,
            biased: false,
            _sample: PhantomData,
        }
    }

    /// Creates the variance of an array.
    #[must_use]
    pub fn of(values: &[T]) -> Self {
        let mut v = Self::new();
        for &x in values {
            v.accept(x);
        }
        v
    }

    /// Creates the variance of `values[from..to]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds)
    /// unless `from <= to <= values.len()`.
    pub fn of_range(values: &[T], from: usize, to: usize) -> Result<Self> {
        check_range(values.len(), from, to)?;
        Ok(Self::of(&values[from..to]))
    }

    /// Adds a value.
    #[inline]
    pub fn accept(&mut self, x: T) {
        self.sum.add_i64(x.widen());
        self.sum_sq.add_square(x.magnitude());
        self.n += 1;
    }

    /// Merges another variance into this one. The bias mode of `self` is kept.
    pub fn combine(&mut self, other: &Self) -> &mut Self {
        self.sum.add(&other.sum);
        self.sum_sq.add(&other.sum_sq);
        self.n += other.n;
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
        self.n
    }

    /// The variance under the selected estimator.
    #[must_use]
    pub fn get_as_double(&self) -> f64 {
        self.quotient().to_f64()
    }

    fn quotient(&self) -> DD {
        let n = self.n;
        if n == 0 || (n == 1 && !self.biased) {
            return DD::of(f64::NAN);
        }
        let Some(numerator) = self.sum_sq.mul_u64(n).checked_sub(&self.sum.square()) else {
            // n * sum(x^2) >= sum(x)^2 unless the sums wrapped
            return DD::of(f64::NAN);
        };
        if numerator.is_zero() {
            return DD::ZERO;
        }
        let d = if self.biased { n } else { n - 1 };
        numerator.to_dd() / UInt128::of_product(n, d).to_dd()
    }
}

impl_integer_statistic!(IntegerVariance);

/// Standard deviation of integers: the square root of [`IntegerVariance`].
///
/// # Example
///
/// ```
/// use descstat::statistics::LongStandardDeviation;
///
/// let mut sd = LongStandardDeviation::of(&[2, 4, 4, 4, 5, 5, 7, 9]);
/// assert_eq!(sd.set_biased(true).get_as_double(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerStandardDeviation<T> {
    variance: IntegerVariance<T>,
}

impl<T: IntegerSample> IntegerStandardDeviation<T> {
    /// Creates an empty, unbiased standard deviation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            variance: IntegerVariance::new(),
        }
    }

    /// Creates the standard deviation of an array.
    #[must_use]
    pub fn of(values: &[T]) -> Self {
        Self {
            variance: IntegerVariance::of(values),
        }
    }

    /// Creates the standard deviation of `values[from..to]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds)
    /// unless `from <= to <= values.len()`.
    pub fn of_range(values: &[T], from: usize, to: usize) -> Result<Self> {
        Ok(Self {
            variance: IntegerVariance::of_range(values, from, to)?,
        })
    }

    /// Adds a value.
    #[inline]
    pub fn accept(&mut self, x: T) {
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

impl_integer_statistic!(IntegerStandardDeviation);

macro_rules! impl_integer_bias {
    ($name:ident) => {
        impl<T: IntegerSample> $crate::BiasConfigurable for $name<T> {
            fn set_biased(&mut self, biased: bool) -> &mut Self {
                $name::set_biased(self, biased)
            }

            fn is_biased(&self) -> bool {
                $name::is_biased(self)
            }
        }
    };
}

impl_integer_bias!(IntegerVariance);
impl_integer_bias!(IntegerStandardDeviation);

/// Exact sum of `i32` values.
pub type IntSum = IntegerSum<i32>;
/// Exact sum of `i64` values.
pub type LongSum = IntegerSum<i64>;
/// Exact sum of squares of `i32` values.
pub type IntSumOfSquares = IntegerSumOfSquares<i32>;
/// Exact sum of squares of `i64` values.
pub type LongSumOfSquares = IntegerSumOfSquares<i64>;
/// Mean of `i32` values.
pub type IntMean = IntegerMean<i32>;
/// Mean of `i64` values.
pub type LongMean = IntegerMean<i64>;
/// Variance of `i32` values.
pub type IntVariance = IntegerVariance<i32>;
/// Variance of `i64` values.
pub type LongVariance = IntegerVariance<i64>;
/// Standard deviation of `i32` values.
pub type IntStandardDeviation = IntegerStandardDeviation<i32>;
/// Standard deviation of `i64` values.
pub type LongStandardDeviation = IntegerStandardDeviation<i64>;
