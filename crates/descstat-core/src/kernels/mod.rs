//! Numeric kernels behind the statistics.
//!
//! # Kernels
//!
//! - [`dd`]: error-free transformations, double-double arithmetic and
//!   compensated summation
//! - [`wide`]: fixed-width unsigned integers (128, 192 and 256 bits) with
//!   correctly rounded conversion to `f64`
//! - [`int128`]: exact signed 128-bit accumulator for integer sums
//! - [`moments`]: the shared central-moment state with its online update,
//!   merge and multi-pass array algorithms
//! - [`derived`]: variance, skewness and kurtosis formulas over moment sums
//!
//! # Numeric Stability
//!
//! No kernel forms a raw power sum of the data. Floating-point moments are
//! kept as sums of deviations from a running mean, and integer statistics
//! are exact until the final division.

pub mod dd;
pub mod derived;
pub mod int128;
pub mod moments;
pub mod wide;

pub use dd::{fast_two_sum, two_product, two_sum, CompensatedSum, DD};
pub use int128::Int128;
pub use moments::{MomentOrder, Moments};
pub use wide::{mul_wide, UInt128, UInt192, UInt256};
