//! Central moments using Welford's online algorithm and its merge formulas.
//!
//! [`Moments`] is the single shared state behind the mean, variance,
//! skewness and kurtosis statistics. It keeps the running mean and the sums
//! of powers of deviations from the mean:
//!
//! ```text
//! S2 = sum((x - mean)^2)
//! S3 = sum((x - mean)^3)
//! S4 = sum((x - mean)^4)
//! ```
//!
//! Only the sums up to the requested [`MomentOrder`] are maintained, so a
//! mean does not pay for a fourth moment it never reports.
//!
//! # Formula
//!
//! For each new value x (n is the count including x):
//!
//! ```text
//! dev   = x - mean
//! nDev  = dev / n
//! term1 = dev * nDev * (n - 1)
//! S4   += term1 * nDev^2 * (n^2 - 3n + 3) + 6 * nDev^2 * S2 - 4 * nDev * S3
//! S3   += term1 * nDev * (n - 2) - 3 * nDev * S2
//! S2   += term1
//! mean += nDev
//! ```
//!
//! Two accumulators over disjoint data A and B merge with (a = nA/n,
//! b = nB/n, d = meanB - meanA):
//!
//! ```text
//! S2 = S2A + S2B + d^2 * nA * nB / n
//! S3 = S3A + S3B + d^3 * nA * nB / n * (a - b) + 3d * (a * S2B - b * S2A)
//! S4 = S4A + S4B + d^4 * nA * nB / n * (a^2 - ab + b^2)
//!      + 6d^2 * (a^2 * S2B + b^2 * S2A) + 4d * (a * S3B - b * S3A)
//! ```
//!
//! Both formulas are invariant under swapping A and B, so a merge gives the
//! same bits whichever side is the receiver.
//!
//! # Non-finite input
//!
//! Infinite and NaN observations are counted but kept out of the running
//! mean. Their IEEE-754 sum is tracked separately and reported as the mean
//! (`inf`, `-inf` or `NaN`); every sum of deviations reports `NaN`, which is
//! what the textbook formulas give for such data.
//!
//! # References
//!
//! - Welford, B. P. (1962). "Note on a method for calculating corrected sums
//!   of squares and products". Technometrics. 4 (3): 419–420.
//! - Chan, Golub, LeVeque (1983). "Algorithms for computing the sample
//!   variance: analysis and recommendations". The American Statistician 37.
//! - Terriberry, T. B. (2007). "Computing higher-order moments online".
//! - Pébay, P. (2008). "Formulas for robust, one-pass parallel computation of
//!   covariances and arbitrary-order statistical moments". Sandia Report.

use log::trace;

use crate::kernels::dd::{two_sum, CompensatedSum};

/// The highest central moment an accumulator maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MomentOrder {
    /// Mean only.
    First = 1,
    /// Mean and sum of squared deviations.
    Second = 2,
    /// Up to the sum of cubed deviations.
    Third = 3,
    /// Up to the sum of fourth-power deviations.
    Fourth = 4,
}

/// Running central moments of a stream of `f64` observations.
///
/// # Example
///
/// ```
/// use descstat_core::kernels::moments::{MomentOrder, Moments};
///
/// let mut m = Moments::new(MomentOrder::Second);
/// for x in [1.0, 2.0, 3.0, 4.0] {
///     m.accept(x);
/// }
/// assert_eq!(m.count(), 4);
/// assert!((m.mean() - 2.5).abs() < 1e-15);
/// assert!((m.sum_of_squared_deviations() - 5.0).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Moments {
    order: MomentOrder,
    n: u64,
    m1: f64,
    non_finite: f64, // IEEE sum of the non-finite observations
    s2: CompensatedSum,
    s3: f64,
    s4: f64,
}

impl Moments {
    /// Creates an empty accumulator maintaining moments up to `order`.
    #[must_use]
    pub const fn new(order: MomentOrder) -> Self {
        Self {
            order,
            n: 0,
            m1: 0.0,
            non_finite: 0.0,
            s2: CompensatedSum::new(),
            s3: 0.0,
            s4: 0.0,
        }
    }

    /// Creates an accumulator from an array using the multi-pass algorithm.
    ///
    /// 1. An overflow-safe rolling mean `m`.
    /// 2. A compensated correction `m += sum(x - m) / n`, where each
    ///    difference enters the sum together with its rounding error.
    /// 3. Compensated sums of `d^k` for `d = x - m`, adjusted for the
    ///    residual `delta = sum(d) / n` so they are sums about `m + delta`.
    ///    The residual is again summed from exact differences.
    ///
    /// This is more accurate than streaming the values through
    /// [`accept`](Self::accept), in particular for the mean and `S2`.
    ///
    /// # Example
    ///
    /// ```
    /// use descstat_core::kernels::moments::{MomentOrder, Moments};
    ///
    /// let m = Moments::of(MomentOrder::Fourth, &[1.0, 2.0, 4.0, 8.0]);
    /// assert_eq!(m.mean(), 3.75);
    /// assert_eq!(m.sum_of_squared_deviations(), 28.75);
    /// assert_eq!(m.sum_of_cubed_deviations(), 50.625);
    /// ```
    #[must_use]
    pub fn of(order: MomentOrder, values: &[f64]) -> Self {
        let mut first = Self::new(MomentOrder::First);
        for &x in values {
            first.accept(x);
        }
        let mut m = Self {
            order,
            ..first
        };
        if m.n == 0 || m.has_non_finite() {
            return m;
        }

        let n = m.n as f64;
        let mut correction = CompensatedSum::new();
        for &x in values {
            add_difference(&mut correction, x, first.m1);
        }
        let c = correction.value() / n;
        if c.is_finite() {
            m.m1 += c;
        }
        if order == MomentOrder::First {
            return m;
        }

        let mean = m.m1;
        let mut s1 = CompensatedSum::new();
        let mut s2 = CompensatedSum::new();
        let mut s3 = CompensatedSum::new();
        let mut s4 = CompensatedSum::new();
        for &x in values {
            let d = add_difference(&mut s1, x, mean);
            let d2 = d * d;
            s2.add(d2);
            if order >= MomentOrder::Third {
                s3.add(d2 * d);
            }
            if order >= MomentOrder::Fourth {
                s4.add(d2 * d2);
            }
        }

        // Shift the sums to be about mean + delta:
        //   S2' = S2 - n delta^2
        //   S3' = S3 - 3 delta S2 + 2 n delta^3
        //   S4' = S4 - 4 delta S3 + 6 delta^2 S2 - 3 n delta^4
        let delta = s1.value() / n;
        let (raw2, raw3, raw4) = (s2.value(), s3.value(), s4.value());
        if delta != 0.0 && delta.is_finite() && raw2.is_finite() {
            let delta2 = delta * delta;
            s2.add(-n * delta2);
            if order >= MomentOrder::Third {
                s3.add(-3.0 * delta * raw2);
                s3.add(2.0 * n * delta2 * delta);
            }
            if order >= MomentOrder::Fourth {
                s4.add(-4.0 * delta * raw3);
                s4.add(6.0 * delta2 * raw2);
                s4.add(-3.0 * n * delta2 * delta2);
            }
            if s2.value() < 0.0 {
                s2 = CompensatedSum::new();
            }
            if s4.value() < 0.0 && raw4 >= 0.0 {
                s4 = CompensatedSum::new();
            }
        }

        m.s2 = s2;
        m.s3 = s3.value();
        m.s4 = s4.value();
        m
    }

    /// Adds an observation.
    pub fn accept(&mut self, x: f64) {
        self.n += 1;
        if !x.is_finite() {
            self.non_finite += x;
            return;
        }
        if self.n == 1 {
            self.m1 = x;
            return;
        }

        let n = self.n as f64;
        let dev = x - self.m1;
        let n_dev = if dev.is_finite() {
            dev / n
        } else {
            // Opposite signs with magnitudes near f64::MAX: scale by 1/2
            trace!("half-scale mean update: x = {x}, mean = {}", self.m1);
            ((x * 0.5 - self.m1 * 0.5) / n) * 2.0
        };
        self.m1 += n_dev;
        if self.order == MomentOrder::First {
            return;
        }

        let term1 = dev * n_dev * (n - 1.0);
        let s2 = self.s2.value();
        if self.order >= MomentOrder::Fourth {
            let n_dev2 = n_dev * n_dev;
            self.s4 += term1 * n_dev2 * (n * n - 3.0 * n + 3.0) + 6.0 * n_dev2 * s2
                - 4.0 * n_dev * self.s3;
        }
        if self.order >= MomentOrder::Third {
            self.s3 += term1 * n_dev * (n - 2.0) - 3.0 * n_dev * s2;
        }
        self.s2.add(term1);
    }

    /// Merges the moments of another accumulator over disjoint data.
    ///
    /// `other` is not modified. If the orders differ the result keeps the
    /// lower of the two.
    pub fn combine(&mut self, other: &Self) -> &mut Self {
        let order = self.order.min(other.order);
        if other.n == 0 {
            self.order = order;
            return self;
        }
        if self.n == 0 {
            *self = Self {
                order,
                ..other.clone()
            };
            return self;
        }

        let na = self.n as f64;
        let nb = other.n as f64;
        let n_total = self.n + other.n;
        let n = n_total as f64;
        let (ma, mb) = (self.m1, other.m1);

        let delta = mb - ma;
        let mean = if self.n == other.n {
            let s = ma + mb;
            if s.is_finite() {
                s * 0.5
            } else {
                ma * 0.5 + mb * 0.5
            }
        } else {
            let (d, scale) = if delta.is_finite() {
                (delta, 1.0)
            } else {
                trace!("half-scale mean merge: {ma} and {mb}");
                (mb * 0.5 - ma * 0.5, 2.0)
            };
            // Move from the larger partition's mean toward the smaller one
            if self.n > other.n {
                ma + d * (nb / n) * scale
            } else {
                mb - d * (na / n) * scale
            }
        };

        if order >= MomentOrder::Second {
            let a = na / n;
            let b = nb / n;
            let nab = (na * nb) / n;
            let delta2 = delta * delta;
            let (sa2, sb2) = (self.s2.value(), other.s2.value());
            if order >= MomentOrder::Fourth {
                self.s4 = self.s4
                    + other.s4
                    + delta2 * delta2 * nab * (a * a + b * b - a * b)
                    + 6.0 * delta2 * (a * a * sb2 + b * b * sa2)
                    + 4.0 * delta * (a * other.s3 - b * self.s3);
            }
            if order >= MomentOrder::Third {
                self.s3 = self.s3
                    + other.s3
                    + delta2 * delta * nab * (a - b)
                    + 3.0 * delta * (a * sb2 - b * sa2);
            }
            self.s2.combine(&other.s2);
            self.s2.add(delta2 * nab);
        }

        self.order = order;
        self.n = n_total;
        self.m1 = mean;
        self.non_finite += other.non_finite;
        self
    }

    /// The highest moment maintained.
    #[inline]
    #[must_use]
    pub const fn order(&self) -> MomentOrder {
        self.order
    }

    /// Number of observations, finite or not.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.n
    }

    /// Returns `true` if an infinite or NaN observation has been seen.
    #[inline]
    #[must_use]
    pub fn has_non_finite(&self) -> bool {
        !self.non_finite.is_finite()
    }

    /// The mean, `NaN` when empty.
    ///
    /// If non-finite values were observed this is their IEEE-754 sum
    /// (`inf`, `-inf` or `NaN`).
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.n == 0 {
            f64::NAN
        } else if self.has_non_finite() {
            self.non_finite
        } else {
            self.m1
        }
    }

    /// `sum((x - mean)^2)`; zero when empty.
    ///
    /// Returns `NaN` if the order is below [`MomentOrder::Second`].
    #[must_use]
    pub fn sum_of_squared_deviations(&self) -> f64 {
        self.deviation_sum(MomentOrder::Second, self.s2.value())
    }

    /// `sum((x - mean)^3)`; zero when empty.
    ///
    /// Returns `NaN` if the order is below [`MomentOrder::Third`].
    #[must_use]
    pub fn sum_of_cubed_deviations(&self) -> f64 {
        self.deviation_sum(MomentOrder::Third, self.s3)
    }

    /// `sum((x - mean)^4)`; zero when empty.
    ///
    /// Returns `NaN` if the order is below [`MomentOrder::Fourth`].
    #[must_use]
    pub fn sum_of_fourth_deviations(&self) -> f64 {
        self.deviation_sum(MomentOrder::Fourth, self.s4)
    }

    #[inline]
    fn deviation_sum(&self, required: MomentOrder, value: f64) -> f64 {
        if self.order < required || self.has_non_finite() {
            f64::NAN
        } else {
            value
        }
    }
}

/// Adds `x - m` to `sum` without rounding and returns the rounded difference.
#[inline]
fn add_difference(sum: &mut CompensatedSum, x: f64, m: f64) -> f64 {
    let (d, e) = two_sum(x, -m);
    sum.add(d);
    // The error term is NaN once the difference overflows
    if d.is_finite() {
        sum.add(e);
    }
    d
}

impl Default for Moments {
    fn default() -> Self {
        Self::new(MomentOrder::Fourth)
    }
}
