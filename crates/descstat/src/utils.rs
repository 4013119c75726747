//! Tolerance helpers for comparing statistic results.
//!
//! Statistics computed by different but equally valid algorithms (streaming
//! versus array, merged partitions versus a single pass) agree to within a
//! few units in the last place rather than bit for bit. These helpers
//! express such comparisons; they treat two NaNs as equal and equal
//! infinities as equal.
//!
//! # Example
//!
//! ```
//! use descstat::utils::{approx_eq, ulp_distance, EPSILON};
//!
//! assert!(approx_eq(0.1 + 0.2, 0.3, EPSILON));
//! assert_eq!(ulp_distance(0.1 + 0.2, 0.3), 1);
//! ```

/// Tolerance for results expected to agree to near machine precision.
pub const EPSILON: f64 = 1e-10;

/// Tolerance for results that accumulate many roundings, such as streamed
/// higher moments of badly scaled data.
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Absolute comparison: `|a - b| < tolerance`, with NaN equal to NaN.
///
/// # Example
///
/// ```
/// use descstat::utils::{approx_eq, EPSILON};
///
/// assert!(approx_eq(1.0, 1.0 + 1e-11, EPSILON));
/// assert!(approx_eq(f64::NAN, f64::NAN, EPSILON));
/// assert!(!approx_eq(f64::NAN, 1.0, EPSILON));
/// ```
#[inline]
#[must_use]
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    a == b || (a - b).abs() < tolerance
}

/// Relative comparison: `|a - b| / max(|a|, |b|) < rel_tolerance`, with NaN
/// equal to NaN.
///
/// # Example
///
/// ```
/// use descstat::utils::approx_eq_relative;
///
/// assert!(approx_eq_relative(1e300, 1e300 * (1.0 + 1e-12), 1e-10));
/// assert!(!approx_eq_relative(0.0, 1e-300, 1e-10));
/// ```
#[inline]
#[must_use]
pub fn approx_eq_relative(a: f64, b: f64, rel_tolerance: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs());
    (a - b).abs() / scale < rel_tolerance
}

/// Number of representable `f64` values between `a` and `b`.
///
/// `0.0` and `-0.0` are zero apart. Returns `u64::MAX` if either value is
/// NaN.
#[must_use]
pub fn ulp_distance(a: f64, b: f64) -> u64 {
    if a.is_nan() || b.is_nan() {
        return u64::MAX;
    }
    ordered(a).abs_diff(ordered(b))
}

// Maps the bit pattern onto a monotonic signed line so adjacent floats
// differ by one.
#[inline]
fn ordered(x: f64) -> i64 {
    let bits = x.to_bits() as i64;
    if bits < 0 {
        i64::MIN - bits
    } else {
        bits
    }
}

/// Number of NaN values in a slice.
///
/// # Example
///
/// ```
/// use descstat::utils::count_nans;
///
/// assert_eq!(count_nans(&[f64::NAN, 1.0, f64::NAN]), 2);
/// ```
#[inline]
#[must_use]
pub fn count_nans(data: &[f64]) -> usize {
    data.iter().filter(|x| x.is_nan()).count()
}
