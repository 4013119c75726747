//! Fixed-width unsigned integers built from 64-bit limbs.
//!
//! These types hold exact sums of squares and the exact numerators used by
//! the integer variance. All arithmetic is explicit limb arithmetic with
//! carry propagation; the 64x64 -> 128 bit product is formed from 32-bit
//! halves so no native 128-bit integer type is needed.
//!
//! | Type | Limbs | Used for |
//! |------|-------|----------|
//! | [`UInt128`] | 2 | magnitude of an [`Int128`](super::int128::Int128), squares of `i64` |
//! | [`UInt192`] | 3 | sum of squares of up to 2^63 `i64` values |
//! | [`UInt256`] | 4 | `n * sum(x^2)` and `sum(x)^2` |

use num_bigint::{BigInt, BigUint};

use crate::error::{Error, Result};
use crate::kernels::dd::DD;

const MASK32: u64 = 0xFFFF_FFFF;

/// Full 128-bit product of two 64-bit values as `(hi, lo)`.
#[inline]
#[must_use]
pub fn mul_wide(a: u64, b: u64) -> (u64, u64) {
    let (a_hi, a_lo) = (a >> 32, a & MASK32);
    let (b_hi, b_lo) = (b >> 32, b & MASK32);

    let ll = a_lo * b_lo;
    let lh = a_lo * b_hi;
    let hl = a_hi * b_lo;
    let hh = a_hi * b_hi;

    // At most 3 * (2^32 - 1): cannot overflow
    let mid = (ll >> 32) + (lh & MASK32) + (hl & MASK32);
    let lo = (mid << 32) | (ll & MASK32);
    let hi = hh + (lh >> 32) + (hl >> 32) + (mid >> 32);
    (hi, lo)
}

/// Adds `value` into `limbs[index..]`, propagating the carry.
/// A carry out of the last limb is discarded (wrapping arithmetic).
#[inline]
fn add_at(limbs: &mut [u64], mut index: usize, value: u64) {
    let mut carry = value;
    while carry != 0 && index < limbs.len() {
        let (sum, overflow) = limbs[index].overflowing_add(carry);
        limbs[index] = sum;
        carry = u64::from(overflow);
        index += 1;
    }
}

/// Exact power of two `2^k` for `0 <= k <= 1023`.
#[inline]
fn pow2(k: u32) -> f64 {
    f64::from_bits(u64::from(1023 + k) << 52)
}

/// Converts little-endian limbs to the nearest `f64` (round half to even).
pub(crate) fn limbs_to_f64(limbs: &[u64]) -> f64 {
    let Some(top) = limbs.iter().rposition(|&w| w != 0) else {
        return 0.0;
    };
    if top == 0 {
        return limbs[0] as f64;
    }
    let bits = 64 * top as u32 + (64 - limbs[top].leading_zeros());
    let shift = bits - 64;
    let q = (shift / 64) as usize;
    let r = shift % 64;

    // Top 64 significant bits
    let mut t = limbs[q] >> r;
    if r > 0 {
        t |= limbs[q + 1] << (64 - r);
    }
    // Discarded bits collapse into a sticky bit well below the rounding
    // position so that the u64 -> f64 conversion rounds correctly.
    let low_mask = if r == 0 { 0 } else { (1u64 << r) - 1 };
    if limbs[q] & low_mask != 0 || limbs[..q].iter().any(|&w| w != 0) {
        t |= 1;
    }
    (t as f64) * pow2(shift)
}

/// Converts little-endian limbs to a double-double.
///
/// Each limb is split into two 32-bit halves, which are exact doubles, and
/// summed from the most significant half down.
pub(crate) fn limbs_to_dd(limbs: &[u64]) -> DD {
    let mut dd = DD::ZERO;
    for (i, &w) in limbs.iter().enumerate().rev() {
        let base = 64 * i as u32;
        dd = dd.add_f64(((w >> 32) as f64) * pow2(base + 32));
        dd = dd.add_f64(((w & MASK32) as f64) * pow2(base));
    }
    dd
}

pub(crate) fn limbs_to_big_uint(limbs: &[u64]) -> BigUint {
    let digits = limbs
        .iter()
        .flat_map(|&w| [(w & MASK32) as u32, (w >> 32) as u32])
        .collect();
    BigUint::new(digits)
}

fn limbs_to_i64_exact(limbs: &[u64], context: &'static str) -> Result<i64> {
    if limbs[1..].iter().any(|&w| w != 0) {
        return Err(Error::ArithmeticOverflow { context });
    }
    i64::try_from(limbs[0]).map_err(|_| Error::ArithmeticOverflow { context })
}

/// An unsigned 128-bit integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UInt128 {
    hi: u64,
    lo: u64,
}

impl UInt128 {
    /// Creates the value `hi * 2^64 + lo`.
    #[inline]
    #[must_use]
    pub const fn new(hi: u64, lo: u64) -> Self {
        Self { hi, lo }
    }

    /// Creates a value from a 64-bit integer.
    #[inline]
    #[must_use]
    pub const fn of(x: u64) -> Self {
        Self { hi: 0, lo: x }
    }

    /// The exact product `a * b`.
    #[inline]
    #[must_use]
    pub fn of_product(a: u64, b: u64) -> Self {
        let (hi, lo) = mul_wide(a, b);
        Self { hi, lo }
    }

    /// High 64 bits.
    #[inline]
    #[must_use]
    pub const fn hi(&self) -> u64 {
        self.hi
    }

    /// Low 64 bits.
    #[inline]
    #[must_use]
    pub const fn lo(&self) -> u64 {
        self.lo
    }

    /// Adds another value, wrapping modulo 2^128.
    #[inline]
    pub fn add(&mut self, other: Self) -> &mut Self {
        let (lo, carry) = self.lo.overflowing_add(other.lo);
        self.lo = lo;
        self.hi = self.hi.wrapping_add(other.hi).wrapping_add(u64::from(carry));
        self
    }

    /// Nearest `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        limbs_to_f64(&[self.lo, self.hi])
    }

    /// Double-double representation.
    #[must_use]
    pub fn to_dd(&self) -> DD {
        limbs_to_dd(&[self.lo, self.hi])
    }

    /// Arbitrary-precision copy of the value.
    #[must_use]
    pub fn to_big_uint(&self) -> BigUint {
        limbs_to_big_uint(&[self.lo, self.hi])
    }
}

/// An unsigned 192-bit integer.
///
/// Accumulates squares of 64-bit values: each square is below 2^128, so
/// 2^63 of them sum to less than 2^191.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UInt192 {
    limbs: [u64; 3],
}

impl UInt192 {
    /// Zero.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self { limbs: [0; 3] }
    }

    /// Creates the value `hi * 2^128 + mid * 2^64 + lo`.
    #[inline]
    #[must_use]
    pub const fn new(hi: u64, mid: u64, lo: u64) -> Self {
        Self {
            limbs: [lo, mid, hi],
        }
    }

    /// Adds a 128-bit value.
    #[inline]
    pub fn add_u128(&mut self, x: UInt128) -> &mut Self {
        add_at(&mut self.limbs, 0, x.lo);
        add_at(&mut self.limbs, 1, x.hi);
        self
    }

    /// Adds the exact square of `x`.
    #[inline]
    pub fn add_square(&mut self, x: u64) -> &mut Self {
        self.add_u128(UInt128::of_product(x, x))
    }

    /// Adds another value, wrapping modulo 2^192.
    #[inline]
    pub fn add(&mut self, other: &Self) -> &mut Self {
        for (i, &w) in other.limbs.iter().enumerate() {
            add_at(&mut self.limbs, i, w);
        }
        self
    }

    /// The exact product `self * n`.
    #[must_use]
    pub fn mul_u64(&self, n: u64) -> UInt256 {
        let mut limbs = [0u64; 4];
        for (i, &w) in self.limbs.iter().enumerate() {
            let (hi, lo) = mul_wide(w, n);
            add_at(&mut limbs, i, lo);
            add_at(&mut limbs, i + 1, hi);
        }
        UInt256 { limbs }
    }

    /// Returns `true` if the value is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&w| w == 0)
    }

    /// Nearest `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        limbs_to_f64(&self.limbs)
    }

    /// Double-double representation.
    #[must_use]
    pub fn to_dd(&self) -> DD {
        limbs_to_dd(&self.limbs)
    }

    /// Narrows to `i64`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArithmeticOverflow`] if the value exceeds `i64::MAX`.
    pub fn to_i64_exact(&self) -> Result<i64> {
        limbs_to_i64_exact(&self.limbs, "uint192 to i64")
    }

    /// Narrows to `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArithmeticOverflow`] if the value exceeds `i32::MAX`.
    pub fn to_i32_exact(&self) -> Result<i32> {
        let context = "uint192 to i32";
        let x = limbs_to_i64_exact(&self.limbs, context)?;
        i32::try_from(x).map_err(|_| Error::ArithmeticOverflow { context })
    }

    /// Arbitrary-precision copy of the value.
    #[must_use]
    pub fn to_big_uint(&self) -> BigUint {
        limbs_to_big_uint(&self.limbs)
    }

    /// Arbitrary-precision copy of the value as a signed integer.
    #[must_use]
    pub fn to_big_int(&self) -> BigInt {
        BigInt::from(self.to_big_uint())
    }
}

/// An unsigned 256-bit integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UInt256 {
    limbs: [u64; 4],
}

impl UInt256 {
    /// Creates a value from little-endian limbs.
    #[inline]
    #[must_use]
    pub const fn from_limbs(limbs: [u64; 4]) -> Self {
        Self { limbs }
    }

    /// Little-endian limbs.
    #[inline]
    #[must_use]
    pub const fn limbs(&self) -> [u64; 4] {
        self.limbs
    }

    /// `self - other`, or `None` if the result would be negative.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        let mut limbs = [0u64; 4];
        let mut borrow = false;
        for (i, limb) in limbs.iter_mut().enumerate() {
            let (d, b1) = self.limbs[i].overflowing_sub(other.limbs[i]);
            let (d, b2) = d.overflowing_sub(u64::from(borrow));
            *limb = d;
            borrow = b1 || b2;
        }
        (!borrow).then_some(Self { limbs })
    }

    /// Returns `true` if the value is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&w| w == 0)
    }

    /// Nearest `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        limbs_to_f64(&self.limbs)
    }

    /// Double-double representation.
    #[must_use]
    pub fn to_dd(&self) -> DD {
        limbs_to_dd(&self.limbs)
    }

    /// Arbitrary-precision copy of the value.
    #[must_use]
    pub fn to_big_uint(&self) -> BigUint {
        limbs_to_big_uint(&self.limbs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn big(x: u128) -> BigUint {
        BigUint::from(x)
    }

    #[test]
    fn test_mul_wide_matches_u128() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..1000 {
            let a: u64 = rng.gen();
            let b: u64 = rng.gen();
            let (hi, lo) = mul_wide(a, b);
            let expected = u128::from(a) * u128::from(b);
            assert_eq!(hi, (expected >> 64) as u64);
            assert_eq!(lo, expected as u64);
        }
        assert_eq!(mul_wide(u64::MAX, u64::MAX), (u64::MAX - 1, 1));
        assert_eq!(mul_wide(0, u64::MAX), (0, 0));
    }

    #[test]
    fn test_limbs_to_f64_small() {
        assert_eq!(limbs_to_f64(&[0, 0, 0]), 0.0);
        assert_eq!(limbs_to_f64(&[12345, 0]), 12345.0);
        assert_eq!(limbs_to_f64(&[u64::MAX, 0]), 18_446_744_073_709_551_616.0);
    }

    #[test]
    fn test_limbs_to_f64_aligned_high_word() {
        // 2^64 exactly: zero low word must not lose the high contribution
        assert_eq!(limbs_to_f64(&[0, 1]), 18_446_744_073_709_551_616.0);
        // 2^128
        assert_eq!(limbs_to_f64(&[0, 0, 1]), 2f64.powi(128));
        assert_eq!(limbs_to_f64(&[0, 0, 0, 1 << 63]), 2f64.powi(255));
    }

    #[test]
    fn test_limbs_to_f64_round_half_even() {
        // 2^64 + 2^11 is exactly halfway between 2^64 and 2^64 + 2^12
        let halfway = [1u64 << 11, 1];
        assert_eq!(limbs_to_f64(&halfway), 2f64.powi(64));
        // Any bit below the halfway point forces rounding up
        let above = [(1u64 << 11) | 1, 1];
        assert_eq!(limbs_to_f64(&above), 2f64.powi(64) + 2f64.powi(12));
        // A sticky bit in a lower limb counts as well
        let sticky = [1, 1 << 11, 1];
        assert_eq!(
            limbs_to_f64(&sticky),
            2f64.powi(128) + 2f64.powi(76)
        );
    }

    #[test]
    fn test_limbs_to_f64_matches_u128_cast() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let x: u128 = rng.gen::<u128>() >> rng.gen_range(0..120);
            let limbs = [x as u64, (x >> 64) as u64];
            assert_eq!(limbs_to_f64(&limbs), x as f64, "x = {x}");
        }
    }

    #[test]
    fn test_limbs_to_dd_captures_low_bits() {
        // 2^64 + 1 is not representable in f64
        let dd = limbs_to_dd(&[1, 1]);
        assert_eq!(dd.hi(), 2f64.powi(64));
        assert_eq!(dd.lo(), 1.0);
    }

    #[test]
    fn test_uint128_add_wraps() {
        let mut x = UInt128::new(u64::MAX, u64::MAX);
        x.add(UInt128::of(1));
        assert_eq!(x, UInt128::new(0, 0));

        let mut y = UInt128::of(u64::MAX);
        y.add(UInt128::of(1));
        assert_eq!(y, UInt128::new(1, 0));
    }

    #[test]
    fn test_uint192_add_square_and_convert() {
        let mut s = UInt192::zero();
        s.add_square(u64::MAX);
        s.add_square(u64::MAX);
        let expected = BigUint::from(u64::MAX) * BigUint::from(u64::MAX) * 2u32;
        assert_eq!(s.to_big_uint(), expected);
    }

    #[test]
    fn test_uint192_mul_u64() {
        let s = UInt192::new(1, 2, 3);
        let p = s.mul_u64(u64::MAX);
        let expected = s.to_big_uint() * BigUint::from(u64::MAX);
        assert_eq!(p.to_big_uint(), expected);
    }

    #[test]
    fn test_uint192_narrowing() {
        let mut s = UInt192::zero();
        s.add_square(3);
        assert_eq!(s.to_i64_exact(), Ok(9));
        assert_eq!(s.to_i32_exact(), Ok(9));

        s.add_square(1 << 20);
        assert!(s.to_i32_exact().is_err());
        assert_eq!(s.to_i64_exact(), Ok(9 + (1 << 40)));

        let wide = UInt192::new(0, 1, 0);
        assert!(matches!(
            wide.to_i64_exact(),
            Err(Error::ArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn test_uint256_checked_sub() {
        let a = UInt256::from_limbs([0, 0, 1, 0]);
        let b = UInt256::from_limbs([1, 0, 0, 0]);
        let d = a.checked_sub(&b).unwrap();
        assert_eq!(d.limbs(), [u64::MAX, u64::MAX, 0, 0]);
        assert!(b.checked_sub(&a).is_none());
        assert!(a.checked_sub(&a).unwrap().is_zero());
    }

    #[test]
    fn test_conversions_agree_with_big_uint() {
        let x = UInt128::of_product(u64::MAX, 12345);
        assert_eq!(x.to_big_uint(), big(u128::from(u64::MAX) * 12345));
        assert_eq!(x.to_f64(), (u128::from(u64::MAX) * 12345) as f64);
    }
}
