//! NaN handling policies applied before a statistic sees an array.
//!
//! A [`NanTransformer`] validates a `[from, to)` range and then, depending on
//! its [`NanPolicy`], passes the range through, removes its NaN values, or
//! rejects it at the first NaN. It either works on a copy (the input is never
//! modified) or in place (only elements inside the range are reordered).
//!
//! # Example
//!
//! ```
//! use std::borrow::Cow;
//! use descstat::nan::{NanPolicy, NanTransformer};
//!
//! let data = [1.0, f64::NAN, 3.0];
//! let t = NanTransformer::new(NanPolicy::Exclude, true);
//! let (values, range) = t.apply_copy(&data, 0, 3).unwrap();
//! assert_eq!(&values[range], &[1.0, 3.0]);
//! assert!(matches!(values, Cow::Owned(_)));
//! ```

use std::borrow::Cow;
use std::ops::Range;

use log::debug;

use descstat_core::{check_range, Error, Result};

/// What to do with NaN values in an input array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NanPolicy {
    /// Keep NaN values; they propagate through the statistics.
    #[default]
    Include,
    /// Remove NaN values before evaluating.
    Exclude,
    /// Fail with [`Error::NanValue`] at the first NaN.
    Error,
}

/// Applies a [`NanPolicy`] to a sub-range of an array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NanTransformer {
    policy: NanPolicy,
    copy: bool,
}

/// Checks that `[from, to)` is a valid sub-range of an array of `length` elements.
///
/// # Errors
///
/// Returns [`Error::IndexOutOfBounds`] unless `from <= to <= length`.
#[inline]
pub const fn validate_range(length: usize, from: usize, to: usize) -> Result<()> {
    check_range(length, from, to)
}

impl NanTransformer {
    /// Creates a transformer. `copy` selects whether [`apply`](Self::apply)
    /// works on a copy or in place.
    #[must_use]
    pub const fn new(policy: NanPolicy, copy: bool) -> Self {
        Self { policy, copy }
    }

    /// The NaN policy.
    #[must_use]
    pub const fn policy(&self) -> NanPolicy {
        self.policy
    }

    /// Returns `true` if [`apply`](Self::apply) leaves its input untouched.
    #[must_use]
    pub const fn is_copy(&self) -> bool {
        self.copy
    }

    /// Applies the policy without modifying `values`.
    ///
    /// Returns the array to evaluate and the range within it. When nothing
    /// needs to change this borrows `values` with the range `from..to`; when
    /// NaN values were excluded it owns a compacted copy with range `0..k`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] for an invalid range, or
    /// [`Error::NanValue`] under [`NanPolicy::Error`].
    pub fn apply_copy<'a>(
        &self,
        values: &'a [f64],
        from: usize,
        to: usize,
    ) -> Result<(Cow<'a, [f64]>, Range<usize>)> {
        validate_range(values.len(), from, to)?;
        match self.policy {
            NanPolicy::Include => Ok((Cow::Borrowed(values), from..to)),
            NanPolicy::Error => {
                check_no_nan(values, from, to)?;
                Ok((Cow::Borrowed(values), from..to))
            }
            NanPolicy::Exclude => {
                let nans = values[from..to].iter().filter(|x| x.is_nan()).count();
                if nans == 0 {
                    return Ok((Cow::Borrowed(values), from..to));
                }
                let kept: Vec<f64> = values[from..to]
                    .iter()
                    .copied()
                    .filter(|x| !x.is_nan())
                    .collect();
                debug!("excluded {nans} NaN values from range [{from}, {to})");
                let k = kept.len();
                Ok((Cow::Owned(kept), 0..k))
            }
        }
    }

    /// Applies the policy by reordering `values[from..to]` in place.
    ///
    /// Under [`NanPolicy::Exclude`] the non-NaN values are moved, in their
    /// original order, to the front of the range and the returned range
    /// covers exactly them. Elements are only swapped, never rewritten, so
    /// signed zeros and NaN payloads survive, and nothing outside the range
    /// is touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] for an invalid range, or
    /// [`Error::NanValue`] under [`NanPolicy::Error`]. On error `values`
    /// is unchanged.
    pub fn apply_in_place(&self, values: &mut [f64], from: usize, to: usize) -> Result<Range<usize>> {
        validate_range(values.len(), from, to)?;
        match self.policy {
            NanPolicy::Include => Ok(from..to),
            NanPolicy::Error => {
                check_no_nan(values, from, to)?;
                Ok(from..to)
            }
            NanPolicy::Exclude => {
                let mut write = from;
                for read in from..to {
                    if !values[read].is_nan() {
                        if read != write {
                            values.swap(read, write);
                        }
                        write += 1;
                    }
                }
                if write < to {
                    debug!(
                        "moved {} NaN values to the end of range [{from}, {to})",
                        to - write
                    );
                }
                Ok(from..write)
            }
        }
    }

    /// Applies the policy to `values[from..to]`, in place or on a copy as
    /// configured.
    ///
    /// # Errors
    ///
    /// See [`apply_copy`](Self::apply_copy) and
    /// [`apply_in_place`](Self::apply_in_place).
    pub fn apply<'a>(
        &self,
        values: &'a mut [f64],
        from: usize,
        to: usize,
    ) -> Result<(Cow<'a, [f64]>, Range<usize>)> {
        if self.copy {
            self.apply_copy(values, from, to)
        } else {
            let range = self.apply_in_place(values, from, to)?;
            Ok((Cow::Borrowed(values), range))
        }
    }
}

fn check_no_nan(values: &[f64], from: usize, to: usize) -> Result<()> {
    match values[from..to].iter().position(|x| x.is_nan()) {
        Some(i) => {
            let index = from + i;
            debug!("NaN value at index {index} rejected");
            Err(Error::NanValue { index })
        }
        None => Ok(()),
    }
}
