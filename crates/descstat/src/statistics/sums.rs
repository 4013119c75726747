//! Sum, product and sum of squares.

use descstat_core::kernels::dd::{two_product, CompensatedSum, DD};
use descstat_core::{check_range, Result};

use super::impl_double_statistic;

/// Compensated sum of `f64` values; `0` when empty.
///
/// The rounding error of every addition is accumulated separately and added
/// back once, so the result is as accurate as if it were computed in twice
/// the working precision. A non-finite running sum is reported as is.
///
/// # Example
///
/// ```
/// use descstat::statistics::Sum;
///
/// assert_eq!(Sum::of(&[1e100, 1.0, -1e100]).get_as_double(), 1.0);
/// assert_eq!(Sum::new().get_as_double(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sum {
    sum: CompensatedSum,
}

impl Sum {
    /// Creates an empty sum.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sum: CompensatedSum::new(),
        }
    }

    /// Creates the sum of an array.
    #[must_use]
    pub fn of(values: &[f64]) -> Self {
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
    pub fn of_range(values: &[f64], from: usize, to: usize) -> Result<Self> {
        check_range(values.len(), from, to)?;
        Ok(Self::of(&values[from..to]))
    }

    /// Adds a value.
    #[inline]
    pub fn accept(&mut self, x: f64) {
        self.sum.add(x);
    }

    /// Merges another sum into this one.
    pub fn combine(&mut self, other: &Self) -> &mut Self {
        self.sum.combine(&other.sum);
        self
    }

    /// The sum.
    #[must_use]
    pub fn get_as_double(&self) -> f64 {
        self.sum.value()
    }
}

impl_double_statistic!(Sum);

/// Product of `f64` values; `1` when empty.
///
/// The running product is kept as a double-double, so only the final
/// rounding is visible for products that stay in range.
///
/// # Example
///
/// ```
/// use descstat::statistics::Product;
///
/// assert_eq!(Product::of(&[2.0, 3.0, 0.5]).get_as_double(), 3.0);
/// assert_eq!(Product::new().get_as_double(), 1.0);
/// assert!(Product::of(&[0.0, f64::INFINITY]).get_as_double().is_nan());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    product: DD,
}

impl Product {
    /// Creates an empty product.
    #[must_use]
    pub const fn new() -> Self {
        Self { product: DD::ONE }
    }

    /// Creates the product of an array.
    #[must_use]
    pub fn of(values: &[f64]) -> Self {
        let mut p = Self::new();
        for &x in values {
            p.accept(x);
        }
        p
    }

    /// Creates the product of `values[from..to]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds)
    /// unless `from <= to <= values.len()`.
    pub fn of_range(values: &[f64], from: usize, to: usize) -> Result<Self> {
        check_range(values.len(), from, to)?;
        Ok(Self::of(&values[from..to]))
    }

    /// Multiplies in a value.
    #[inline]
    pub fn accept(&mut self, x: f64) {
        self.product = self.product.mul_f64(x);
    }

    /// Merges another product into this one.
    pub fn combine(&mut self, other: &Self) -> &mut Self {
        self.product = self.product.mul_dd(other.product);
        self
    }

    /// The product.
    #[must_use]
    pub fn get_as_double(&self) -> f64 {
        self.product.to_f64()
    }
}

impl_double_statistic!(Product);

/// Sum of squares `sum(x^2)` of `f64` values; `0` when empty.
///
/// Each square is split exactly into a rounded product and its error with a
/// fused multiply-add, and both parts are accumulated with compensation.
///
/// # Example
///
/// ```
/// use descstat::statistics::SumOfSquares;
///
/// assert_eq!(SumOfSquares::of(&[1.0, 2.0, 3.0]).get_as_double(), 14.0);
/// assert_eq!(SumOfSquares::of(&[1e200]).get_as_double(), f64::INFINITY);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SumOfSquares {
    sum: CompensatedSum,
}

impl SumOfSquares {
    /// Creates an empty sum of squares.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sum: CompensatedSum::new(),
        }
    }

    /// Creates the sum of squares of an array.
    #[must_use]
    pub fn of(values: &[f64]) -> Self {
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
    pub fn of_range(values: &[f64], from: usize, to: usize) -> Result<Self> {
        check_range(values.len(), from, to)?;
        Ok(Self::of(&values[from..to]))
    }

    /// Adds the square of a value.
    #[inline]
    pub fn accept(&mut self, x: f64) {
        let (p, e) = two_product(x, x);
        self.sum.add(p);
        // The error term is NaN once the square overflows
        if p.is_finite() {
            self.sum.add(e);
        }
    }

    /// Merges another sum of squares into this one.
    pub fn combine(&mut self, other: &Self) -> &mut Self {
        self.sum.combine(&other.sum);
        self
    }

    /// The sum of squares.
    #[must_use]
    pub fn get_as_double(&self) -> f64 {
        self.sum.value()
    }
}

impl_double_statistic!(SumOfSquares);
