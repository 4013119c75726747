//! Stateless formulas turning moment sums into statistics.
//!
//! All functions take the observation count and the sums of powers of
//! deviations maintained by [`Moments`](super::moments::Moments). Undefined
//! results (too few observations, zero variance in a denominator) are `NaN`.
//!
//! | Statistic | Biased | Unbiased |
//! |-----------|--------|----------|
//! | variance  | `S2 / n` | `S2 / (n - 1)` |
//! | skewness  | `sqrt(n) S3 / S2^1.5` | `g1 * sqrt(n (n - 1)) / (n - 2)` |
//! | kurtosis  | `n S4 / S2^2 - 3` | `(n+1) n (n-1) S4 / ((n-2)(n-3) S2^2) - 3 (n-1)^2 / ((n-2)(n-3))` |

/// Variance from the sum of squared deviations.
///
/// `NaN` when `n == 0`, and when `n == 1` unless biased (then `0`).
#[inline]
#[must_use]
pub fn variance(n: u64, s2: f64, biased: bool) -> f64 {
    if n == 0 {
        return f64::NAN;
    }
    let n = n as f64;
    // n == 1 unbiased is 0 / 0
    if biased {
        s2 / n
    } else {
        s2 / (n - 1.0)
    }
}

/// Skewness from the second and third sums of deviations.
///
/// `NaN` when `n < 3` in either mode, or when `S2` is zero.
#[must_use]
pub fn skewness(n: u64, s2: f64, s3: f64, biased: bool) -> f64 {
    if n < 3 || s2 == 0.0 {
        return f64::NAN;
    }
    let n = n as f64;
    let m2 = s2 / n;
    let m3 = s3 / n;
    // m3 / m2^1.5 without forming m2^1.5, which overflows first
    let g1 = m3 / m2 / m2.sqrt();
    if biased {
        g1
    } else {
        g1 * (n * (n - 1.0)).sqrt() / (n - 2.0)
    }
}

/// Excess kurtosis from the second and fourth sums of deviations.
///
/// `NaN` when `n < 4` in either mode, or when `S2` is zero.
#[must_use]
pub fn kurtosis(n: u64, s2: f64, s4: f64, biased: bool) -> f64 {
    if n < 4 || s2 == 0.0 {
        return f64::NAN;
    }
    let n = n as f64;
    let ratio = s4 / s2 / s2;
    if biased {
        n * ratio - 3.0
    } else {
        let denom = (n - 2.0) * (n - 3.0);
        (n + 1.0) * n * (n - 1.0) / denom * ratio - 3.0 * (n - 1.0) * (n - 1.0) / denom
    }
}
