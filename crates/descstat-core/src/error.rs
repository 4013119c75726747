//! Error types for descstat-core.
//!
//! Only two kinds of failure are ever signalled: validation failures (a bad
//! range or a NaN rejected by policy), raised before anything is mutated, and
//! exactness failures, raised when an exact integer is narrowed to a type
//! that cannot hold it. NaN and infinite results produced by IEEE-754
//! arithmetic are values, not errors.

use thiserror::Error;

/// The main error type for descstat operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The half-open range `[from, to)` does not lie within an array of
    /// `length` elements.
    #[error("range [{from}, {to}) out of bounds for length {length}")]
    IndexOutOfBounds {
        /// Inclusive start of the requested range.
        from: usize,
        /// Exclusive end of the requested range.
        to: usize,
        /// Length of the array the range was applied to.
        length: usize,
    },

    /// A NaN value was found where the NaN policy forbids it.
    #[error("NaN value at index {index}")]
    NanValue {
        /// Absolute index of the first NaN in the array.
        index: usize,
    },

    /// An exact value does not fit in the requested integer type.
    #[error("integer overflow: {context}")]
    ArithmeticOverflow {
        /// Description of the narrowing that failed.
        context: &'static str,
    },
}

/// Convenience type alias for Results using the descstat Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Checks that `[from, to)` is a valid sub-range of an array of `length` elements.
///
/// # Errors
///
/// Returns [`Error::IndexOutOfBounds`] unless `from <= to <= length`.
#[inline]
pub const fn check_range(length: usize, from: usize, to: usize) -> Result<()> {
    if from > to || to > length {
        Err(Error::IndexOutOfBounds { from, to, length })
    } else {
        Ok(())
    }
}
