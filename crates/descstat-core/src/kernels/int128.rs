//! Exact signed 128-bit integer accumulator.
//!
//! [`Int128`] holds a two's complement value in two 64-bit words and is the
//! running sum behind the integer statistics: the sum of up to 2^63 `i64`
//! values cannot leave the 128-bit range, so the sum stays exact long after
//! a 64-bit accumulator would have overflowed.
//!
//! Arithmetic wraps modulo 2^128, mirroring fixed-width hardware integers.
//! Only the narrowing conversions ([`Int128::to_i64_exact`],
//! [`Int128::to_i32_exact`]) can fail.
//!
//! # Example
//!
//! ```
//! use descstat_core::kernels::int128::Int128;
//!
//! let mut sum = Int128::zero();
//! sum.add_i64(i64::MAX).add_i64(i64::MAX);
//!
//! // Exceeds i64 but is held exactly
//! assert!(sum.to_i64_exact().is_err());
//! assert_eq!(sum.to_f64(), 2.0 * i64::MAX as f64);
//! ```

use std::fmt;
use std::ops::{AddAssign, Neg};

use num_bigint::{BigInt, Sign};

use crate::error::{Error, Result};
use crate::kernels::dd::DD;
use crate::kernels::wide::{mul_wide, UInt128, UInt256};

/// A signed 128-bit integer stored as a high signed word and a low unsigned word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Int128 {
    hi: i64,
    lo: u64,
}

impl Int128 {
    /// The smallest value, -2^127.
    pub const MIN: Self = Self { hi: i64::MIN, lo: 0 };

    /// The largest value, 2^127 - 1.
    pub const MAX: Self = Self {
        hi: i64::MAX,
        lo: u64::MAX,
    };

    /// Creates the value `hi * 2^64 + lo`.
    #[inline]
    #[must_use]
    pub const fn new(hi: i64, lo: u64) -> Self {
        Self { hi, lo }
    }

    /// Zero.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self { hi: 0, lo: 0 }
    }

    /// Creates a value from a 64-bit integer (sign-extended).
    #[inline]
    #[must_use]
    pub const fn of(x: i64) -> Self {
        Self {
            hi: x >> 63,
            lo: x as u64,
        }
    }

    /// High (signed) word.
    #[inline]
    #[must_use]
    pub const fn hi(&self) -> i64 {
        self.hi
    }

    /// Low (unsigned) word.
    #[inline]
    #[must_use]
    pub const fn lo(&self) -> u64 {
        self.lo
    }

    /// Adds a 64-bit value, wrapping modulo 2^128.
    #[inline]
    pub fn add_i64(&mut self, x: i64) -> &mut Self {
        let (lo, carry) = self.lo.overflowing_add(x as u64);
        self.lo = lo;
        self.hi = self
            .hi
            .wrapping_add(x >> 63)
            .wrapping_add(i64::from(carry));
        self
    }

    /// Adds another 128-bit value, wrapping modulo 2^128.
    #[inline]
    pub fn add(&mut self, other: &Self) -> &mut Self {
        let (lo, carry) = self.lo.overflowing_add(other.lo);
        self.lo = lo;
        self.hi = self
            .hi
            .wrapping_add(other.hi)
            .wrapping_add(i64::from(carry));
        self
    }

    /// Two's complement negation, wrapping (`-MIN == MIN`).
    #[inline]
    #[must_use]
    pub const fn negate(&self) -> Self {
        let lo = (!self.lo).wrapping_add(1);
        let carry = if lo == 0 { 1 } else { 0 };
        Self {
            hi: (!self.hi).wrapping_add(carry),
            lo,
        }
    }

    /// Returns `true` if the value is below zero.
    #[inline]
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.hi < 0
    }

    /// Returns `true` if the value is zero.
    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.hi == 0 && self.lo == 0
    }

    /// The magnitude `|self|`; exact for every value including [`Int128::MIN`].
    #[inline]
    #[must_use]
    pub const fn unsigned_abs(&self) -> UInt128 {
        let v = if self.is_negative() { self.negate() } else { *self };
        UInt128::new(v.hi as u64, v.lo)
    }

    /// The exact square of the value.
    ///
    /// The result needs up to 254 bits, so it is returned as a [`UInt256`].
    #[must_use]
    pub fn square(&self) -> UInt256 {
        let m = self.unsigned_abs();
        let (h, l) = (m.hi(), m.lo());

        // (h * 2^64 + l)^2 = h^2 * 2^128 + 2 * h * l * 2^64 + l^2
        let (ll_hi, ll_lo) = mul_wide(l, l);
        let (hl_hi, hl_lo) = mul_wide(h, l);
        let (hh_hi, hh_lo) = mul_wide(h, h);

        let mut limbs = [ll_lo, ll_hi, hh_lo, hh_hi];
        for _ in 0..2 {
            let mut carry;
            let (s, c) = limbs[1].overflowing_add(hl_lo);
            limbs[1] = s;
            carry = u64::from(c);
            let (s, c1) = limbs[2].overflowing_add(hl_hi);
            let (s, c2) = s.overflowing_add(carry);
            limbs[2] = s;
            carry = u64::from(c1) + u64::from(c2);
            limbs[3] = limbs[3].wrapping_add(carry);
        }
        UInt256::from_limbs(limbs)
    }

    /// Nearest `f64` (round half to even).
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        let x = self.unsigned_abs().to_f64();
        if self.is_negative() {
            -x
        } else {
            x
        }
    }

    /// Double-double representation, keeping up to 106 bits of the value.
    #[must_use]
    pub fn to_dd(&self) -> DD {
        let x = self.unsigned_abs().to_dd();
        if self.is_negative() {
            -x
        } else {
            x
        }
    }

    /// Narrows to `i64`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArithmeticOverflow`] if the value is outside the `i64` range.
    pub const fn to_i64_exact(&self) -> Result<i64> {
        // Fits when the high word is the sign extension of the low word
        if self.hi == (self.lo as i64) >> 63 {
            Ok(self.lo as i64)
        } else {
            Err(Error::ArithmeticOverflow {
                context: "int128 to i64",
            })
        }
    }

    /// Narrows to `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArithmeticOverflow`] if the value is outside the `i32` range.
    pub fn to_i32_exact(&self) -> Result<i32> {
        let overflow = Error::ArithmeticOverflow {
            context: "int128 to i32",
        };
        let x = self.to_i64_exact().map_err(|_| overflow.clone())?;
        i32::try_from(x).map_err(|_| overflow)
    }

    /// Converts to the native `i128` for interoperability.
    #[inline]
    #[must_use]
    pub const fn to_i128(&self) -> i128 {
        ((self.hi as i128) << 64) | (self.lo as i128)
    }

    /// Arbitrary-precision copy of the value.
    #[must_use]
    pub fn to_big_int(&self) -> BigInt {
        let sign = if self.is_negative() {
            Sign::Minus
        } else if self.is_zero() {
            Sign::NoSign
        } else {
            Sign::Plus
        };
        BigInt::from_biguint(sign, self.unsigned_abs().to_big_uint())
    }
}

impl From<i64> for Int128 {
    fn from(x: i64) -> Self {
        Self::of(x)
    }
}

impl From<i32> for Int128 {
    fn from(x: i32) -> Self {
        Self::of(i64::from(x))
    }
}

impl AddAssign<i64> for Int128 {
    #[inline]
    fn add_assign(&mut self, rhs: i64) {
        self.add_i64(rhs);
    }
}

impl AddAssign for Int128 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        Int128::add(self, &rhs);
    }
}

impl Neg for Int128 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.negate()
    }
}

impl fmt::Display for Int128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_big_int())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn from_i128(x: i128) -> Int128 {
        Int128::new((x >> 64) as i64, x as u64)
    }

    #[test]
    fn test_of_sign_extends() {
        assert_eq!(Int128::of(-1), Int128::new(-1, u64::MAX));
        assert_eq!(Int128::of(5).to_i128(), 5);
        assert_eq!(Int128::of(i64::MIN).to_i128(), i128::from(i64::MIN));
    }

    #[test]
    fn test_add_small() {
        let mut x = Int128::of(5);
        x.add_i64(-3);
        assert_eq!(x.to_i64_exact(), Ok(2));
        assert_eq!(x.to_i32_exact(), Ok(2));
    }

    #[test]
    fn test_add_carries_into_high_word() {
        let mut x = Int128::of(i64::MAX);
        x.add_i64(i64::MAX).add_i64(2);
        assert_eq!(x.to_i128(), 2 * i128::from(i64::MAX) + 2);
        assert_eq!(x, Int128::new(1, 0));

        let mut y = Int128::of(i64::MIN);
        y.add_i64(i64::MIN);
        assert_eq!(y.to_i128(), 2 * i128::from(i64::MIN));
    }

    #[test]
    fn test_add_wraps_modulo_2_128() {
        let mut x = Int128::MAX;
        x.add_i64(1);
        assert_eq!(x, Int128::MIN);

        let mut y = Int128::MIN;
        y.add_i64(-1);
        assert_eq!(y, Int128::MAX);

        let mut z = Int128::MAX;
        z.add(&Int128::MAX);
        assert_eq!(z.to_i128(), i128::MAX.wrapping_add(i128::MAX));
    }

    #[test]
    fn test_add_random_matches_i128() {
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        for _ in 0..1000 {
            let a: i128 = rng.gen();
            let b: i128 = rng.gen();
            let c: i64 = rng.gen();
            let mut x = from_i128(a);
            x.add(&from_i128(b));
            assert_eq!(x.to_i128(), a.wrapping_add(b));
            x.add_i64(c);
            assert_eq!(x.to_i128(), a.wrapping_add(b).wrapping_add(i128::from(c)));
        }
    }

    #[test]
    fn test_negate() {
        assert_eq!(Int128::of(5).negate(), Int128::of(-5));
        assert_eq!(Int128::zero().negate(), Int128::zero());
        assert_eq!(Int128::MIN.negate(), Int128::MIN);
        assert_eq!(-Int128::new(1, 0), from_i128(-(1i128 << 64)));
    }

    #[test]
    fn test_unsigned_abs_min() {
        let m = Int128::MIN.unsigned_abs();
        assert_eq!(m, UInt128::new(1 << 63, 0));
    }

    #[test]
    fn test_to_i64_exact_bounds() {
        assert_eq!(Int128::of(i64::MAX).to_i64_exact(), Ok(i64::MAX));
        assert_eq!(Int128::of(i64::MIN).to_i64_exact(), Ok(i64::MIN));

        let mut over = Int128::of(i64::MAX);
        over.add_i64(1);
        assert!(matches!(
            over.to_i64_exact(),
            Err(Error::ArithmeticOverflow { .. })
        ));

        let mut under = Int128::of(i64::MIN);
        under.add_i64(-1);
        assert!(under.to_i64_exact().is_err());
    }

    #[test]
    fn test_to_i32_exact_bounds() {
        assert_eq!(Int128::of(i64::from(i32::MAX)).to_i32_exact(), Ok(i32::MAX));
        assert_eq!(Int128::of(i64::from(i32::MIN)).to_i32_exact(), Ok(i32::MIN));
        assert!(Int128::of(i64::from(i32::MAX) + 1).to_i32_exact().is_err());
        assert!(Int128::of(i64::from(i32::MIN) - 1).to_i32_exact().is_err());
        assert!(Int128::new(1, 0).to_i32_exact().is_err());
    }

    #[test]
    fn test_narrowing_does_not_modify_value() {
        let x = Int128::new(3, 7);
        assert!(x.to_i64_exact().is_err());
        assert_eq!(x, Int128::new(3, 7));
    }

    #[test]
    fn test_to_f64_aligned_high_word() {
        // Zero low word with non-zero high word
        assert_eq!(Int128::new(1, 0).to_f64(), 2f64.powi(64));
        assert_eq!(Int128::new(-1, 0).to_f64(), -(2f64.powi(64)));
        assert_eq!(Int128::MIN.to_f64(), -(2f64.powi(127)));
        assert_eq!(Int128::MAX.to_f64(), 2f64.powi(127));
    }

    #[test]
    fn test_to_f64_matches_i128_cast() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..1000 {
            let shift = rng.gen_range(0..126);
            let x: i128 = rng.gen::<i128>() >> shift;
            assert_eq!(from_i128(x).to_f64(), x as f64, "x = {x}");
        }
    }

    #[test]
    fn test_to_dd_keeps_low_bits() {
        let x = from_i128((1i128 << 64) + 1);
        let dd = x.to_dd();
        assert_eq!(dd.hi(), 2f64.powi(64));
        assert_eq!(dd.lo(), 1.0);

        let y = from_i128(-(1i128 << 64) - 1);
        let dd = y.to_dd();
        assert_eq!(dd.hi(), -(2f64.powi(64)));
        assert_eq!(dd.lo(), -1.0);
    }

    #[test]
    fn test_square_exact() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..200 {
            let x: i128 = rng.gen::<i128>() >> rng.gen_range(0..64);
            let v = from_i128(x);
            let expected = BigInt::from(x) * BigInt::from(x);
            assert_eq!(BigInt::from(v.square().to_big_uint()), expected);
        }
        let min_sq = Int128::MIN.square();
        assert_eq!(min_sq.limbs(), [0, 0, 0, 1 << 62]);
    }

    #[test]
    fn test_to_big_int_and_display() {
        let x = from_i128(i128::MIN);
        assert_eq!(x, Int128::MIN);
        assert_eq!(
            x.to_string(),
            "-170141183460469231731687303715884105728"
        );
        assert_eq!(Int128::zero().to_string(), "0");
        assert_eq!(Int128::of(42).to_big_int(), BigInt::from(42));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_add_wraps_like_i128(a in any::<i128>(), b in any::<i128>()) {
                let mut x = from_i128(a);
                x.add(&from_i128(b));
                prop_assert_eq!(x.to_i128(), a.wrapping_add(b));
            }

            #[test]
            fn prop_negate_wraps_like_i128(a in any::<i128>()) {
                prop_assert_eq!(from_i128(a).negate().to_i128(), a.wrapping_neg());
            }

            #[test]
            fn prop_to_f64_rounds_like_cast(a in any::<i128>()) {
                prop_assert_eq!(from_i128(a).to_f64(), a as f64);
            }

            #[test]
            fn prop_narrowing_matches_try_from(a in any::<i128>()) {
                let x = from_i128(a);
                prop_assert_eq!(x.to_i64_exact().ok(), i64::try_from(a).ok());
                prop_assert_eq!(x.to_i32_exact().ok(), i32::try_from(a).ok());
            }
        }
    }
}
