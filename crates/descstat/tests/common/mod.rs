//! Shared helpers for the integration tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[allow(dead_code)]
pub const EPSILON: f64 = 1e-10;

#[allow(dead_code)]
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Absolute comparison that treats two NaN values as equal.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < eps
}

/// Relative comparison, absolute below a magnitude of 1.
#[allow(dead_code)]
pub fn approx_eq_scaled(a: f64, b: f64, rel: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    if a == b {
        return true;
    }
    (a - b).abs() <= rel * a.abs().max(b.abs()).max(1.0)
}

/// Uniform values in `[lo, hi)` from a fixed seed.
#[allow(dead_code)]
pub fn uniform_data(seed: u64, len: usize, lo: f64, hi: f64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(lo..hi)).collect()
}

/// Integers in `[lo, hi]` from a fixed seed.
#[allow(dead_code)]
pub fn integer_data(seed: u64, len: usize, lo: i64, hi: i64) -> Vec<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(lo..=hi)).collect()
}

/// Splits `values` into consecutive chunks at the given cut points.
#[allow(dead_code)]
pub fn split_at_cuts<'a>(values: &'a [f64], cuts: &[usize]) -> Vec<&'a [f64]> {
    let mut cuts: Vec<usize> = cuts.iter().map(|&c| c.min(values.len())).collect();
    cuts.sort_unstable();
    let mut parts = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        parts.push(&values[start..cut]);
        start = cut;
    }
    parts.push(&values[start..]);
    parts
}
