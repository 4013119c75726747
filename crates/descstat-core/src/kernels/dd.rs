//! Extended precision ("double-double") arithmetic.
//!
//! A double-double value is an unevaluated sum `hi + lo` of two `f64` values
//! with `|lo| <= ulp(hi) / 2`, giving roughly 106 bits of significand. The
//! building blocks are the error-free transformations:
//!
//! ```text
//! two_sum(a, b)     -> (s, e)   s = fl(a + b),  a + b = s + e exactly
//! two_product(a, b) -> (p, e)   p = fl(a * b),  a * b = p + e exactly
//! ```
//!
//! [`CompensatedSum`] uses `two_sum` to carry the rounding error of every
//! addition in a separate correction term that is applied once, when the
//! value is read. This keeps long sums of squared, cubed or fourth-power
//! deviations accurate when the terms span many orders of magnitude.
//!
//! # Non-finite values
//!
//! The transformations are only error-free for finite results. Whenever the
//! leading component overflows or becomes NaN the value collapses to the
//! plain IEEE-754 result, so `inf` and `NaN` propagate exactly as they would
//! through ordinary `f64` arithmetic.
//!
//! # References
//!
//! - Dekker, T. J. (1971). "A floating-point technique for extending the
//!   available precision". Numerische Mathematik 18: 224–242.
//! - Knuth, D. E. (1997). The Art of Computer Programming, volume 2,
//!   Section 4.2.2.
//! - Hida, Li, Bailey (2008). "Library for double-double and quad-double
//!   arithmetic".

use std::ops::{Add, Div, Mul, Neg, Sub};

/// Error-free sum: returns `(s, e)` with `s = fl(a + b)` and `a + b = s + e`.
///
/// No ordering of the magnitudes of `a` and `b` is required.
///
/// # Example
///
/// ```
/// use descstat_core::kernels::dd::two_sum;
///
/// let (s, e) = two_sum(1.0, 1e-20);
/// assert_eq!(s, 1.0);
/// assert_eq!(e, 1e-20);
/// ```
#[inline]
#[must_use]
pub fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let e = (a - (s - bb)) + (b - bb);
    (s, e)
}

/// Error-free sum for `|a| >= |b|` (or `a == 0`).
#[inline]
#[must_use]
pub fn fast_two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let e = b - (s - a);
    (s, e)
}

/// Error-free product: returns `(p, e)` with `p = fl(a * b)` and `a * b = p + e`.
///
/// The low part is recovered with a fused multiply-add. The result is exact
/// unless the product overflows or `e` underflows below the subnormal range.
#[inline]
#[must_use]
pub fn two_product(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let e = a.mul_add(b, -p);
    (p, e)
}

/// A double-double value `hi + lo`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DD {
    hi: f64,
    lo: f64,
}

impl DD {
    /// Zero.
    pub const ZERO: Self = Self { hi: 0.0, lo: 0.0 };

    /// One.
    pub const ONE: Self = Self { hi: 1.0, lo: 0.0 };

    /// Creates a double-double equal to `x`.
    #[inline]
    #[must_use]
    pub const fn of(x: f64) -> Self {
        Self { hi: x, lo: 0.0 }
    }

    /// Creates the exact sum `a + b`.
    #[inline]
    #[must_use]
    pub fn of_sum(a: f64, b: f64) -> Self {
        let (s, e) = two_sum(a, b);
        Self::checked(s, e)
    }

    /// Creates the exact product `a * b`.
    #[inline]
    #[must_use]
    pub fn of_product(a: f64, b: f64) -> Self {
        let (p, e) = two_product(a, b);
        Self::checked(p, e)
    }

    /// Creates the exact value of `n`.
    ///
    /// `n` is split into two 32-bit halves, each exactly representable.
    #[must_use]
    pub fn from_u64(n: u64) -> Self {
        let high = ((n >> 32) as f64) * 4_294_967_296.0;
        let low = (n & 0xFFFF_FFFF) as f64;
        Self::of_sum(high, low)
    }

    /// Renormalizes `s + e` where `|e|` is at most of the order of `ulp(s)`.
    #[inline]
    fn renormalize(s: f64, e: f64) -> Self {
        if !s.is_finite() {
            return Self::of(s);
        }
        let (hi, lo) = fast_two_sum(s, e);
        Self::checked(hi, lo)
    }

    #[inline]
    fn checked(hi: f64, lo: f64) -> Self {
        if hi.is_finite() {
            Self { hi, lo }
        } else {
            Self::of(hi)
        }
    }

    /// The high (leading) component.
    #[inline]
    #[must_use]
    pub const fn hi(&self) -> f64 {
        self.hi
    }

    /// The low (correction) component.
    #[inline]
    #[must_use]
    pub const fn lo(&self) -> f64 {
        self.lo
    }

    /// Returns `true` if the value is finite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.hi.is_finite()
    }

    /// Rounds the value to the nearest `f64`.
    #[inline]
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        if self.hi.is_finite() {
            self.hi + self.lo
        } else {
            self.hi
        }
    }

    /// Adds a double.
    #[must_use]
    pub fn add_f64(self, x: f64) -> Self {
        let (s, e) = two_sum(self.hi, x);
        if !s.is_finite() {
            return Self::of(s);
        }
        Self::renormalize(s, e + self.lo)
    }

    /// Adds another double-double (the accurate, "IEEE style" addition).
    #[must_use]
    pub fn add_dd(self, other: Self) -> Self {
        let (s, e) = two_sum(self.hi, other.hi);
        if !s.is_finite() {
            return Self::of(s);
        }
        let (t, f) = two_sum(self.lo, other.lo);
        let (s, e) = fast_two_sum(s, e + t);
        Self::renormalize(s, e + f)
    }

    /// Multiplies by a double.
    #[must_use]
    pub fn mul_f64(self, x: f64) -> Self {
        let (p, e) = two_product(self.hi, x);
        if !p.is_finite() {
            return Self::of(p);
        }
        Self::renormalize(p, e + self.lo * x)
    }

    /// Multiplies by another double-double.
    #[must_use]
    pub fn mul_dd(self, other: Self) -> Self {
        let (p, e) = two_product(self.hi, other.hi);
        if !p.is_finite() {
            return Self::of(p);
        }
        Self::renormalize(p, e + (self.hi * other.lo + self.lo * other.hi))
    }

    /// Divides by another double-double.
    ///
    /// Three quotient digits are computed by long division; the result is
    /// accurate to a few units in the last place of the 106-bit significand.
    #[must_use]
    pub fn div_dd(self, other: Self) -> Self {
        let q1 = self.hi / other.hi;
        if !q1.is_finite() || q1 == 0.0 {
            return Self::of(q1);
        }
        let r = self.add_dd(-other.mul_f64(q1));
        let q2 = r.hi / other.hi;
        let r = r.add_dd(-other.mul_f64(q2));
        let q3 = r.hi / other.hi;
        Self::renormalize(q1, q2).add_f64(q3)
    }
}

impl Neg for DD {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            hi: -self.hi,
            lo: -self.lo,
        }
    }
}

impl Add for DD {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.add_dd(rhs)
    }
}

impl Add<f64> for DD {
    type Output = Self;

    #[inline]
    fn add(self, rhs: f64) -> Self {
        self.add_f64(rhs)
    }
}

impl Sub for DD {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.add_dd(-rhs)
    }
}

impl Mul for DD {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_dd(rhs)
    }
}

impl Mul<f64> for DD {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.mul_f64(rhs)
    }
}

impl Div for DD {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        self.div_dd(rhs)
    }
}

impl From<f64> for DD {
    fn from(x: f64) -> Self {
        Self::of(x)
    }
}

/// A running compensated sum.
///
/// Each term is folded in with [`two_sum`]; the rounding error is
/// accumulated separately and added back once when [`value`](Self::value)
/// is read. The leading component is always the plain floating-point sum, so
/// a non-finite running sum reports the IEEE-754 result.
///
/// # Example
///
/// ```
/// use descstat_core::kernels::dd::CompensatedSum;
///
/// let mut sum = CompensatedSum::new();
/// for x in [1e16, 1.0, 1.0, -1e16] {
///     sum.add(x);
/// }
/// assert_eq!(sum.value(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompensatedSum {
    sum: f64,
    correction: f64,
}

impl CompensatedSum {
    /// Creates an empty sum.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sum: 0.0,
            correction: 0.0,
        }
    }

    /// Creates a sum holding the single term `x`.
    #[inline]
    #[must_use]
    pub const fn of(x: f64) -> Self {
        Self {
            sum: x,
            correction: 0.0,
        }
    }

    /// Adds a term.
    #[inline]
    pub fn add(&mut self, x: f64) {
        let (s, e) = two_sum(self.sum, x);
        self.sum = s;
        self.correction += e;
    }

    /// Adds every term of another sum.
    #[inline]
    pub fn combine(&mut self, other: &Self) {
        self.add(other.sum);
        self.correction += other.correction;
    }

    /// Multiplies every accumulated term by `x`.
    #[inline]
    pub fn scale(&mut self, x: f64) {
        self.sum *= x;
        self.correction *= x;
    }

    /// The compensated value, rounded once.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.sum.is_finite() {
            self.sum + self.correction
        } else {
            self.sum
        }
    }

    /// The sum as a double-double.
    #[must_use]
    pub fn to_dd(&self) -> DD {
        DD::of_sum(self.sum, self.correction)
    }
}
