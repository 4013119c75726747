//! descstat: numerically robust, mergeable descriptive statistics
//!
//! This crate provides streaming statistics over `f64`, `i32` and `i64`
//! values that stay accurate on badly scaled data and can be split across
//! partitions and merged afterwards.
//!
//! # Features
//!
//! - **Accuracy**: sums of deviations from a running mean instead of raw
//!   power sums, compensated summation, double-double arithmetic
//! - **Exactness**: integer sums and sums of squares in 128/192-bit integers
//! - **Mergeable**: every statistic combines with another built over
//!   disjoint data, in any grouping
//! - **Robust**: overflow-protected means, IEEE-754 propagation of non-finite
//!   input, no panics on empty input
//!
//! # Quick Start
//!
//! ```
//! use descstat::prelude::*;
//!
//! let data = [1.0, 2.0, 4.0, 8.0];
//!
//! assert_eq!(Mean::of(&data).get_as_double(), 3.75);
//! assert!((Variance::of(&data).get_as_double() - 9.583_333_333_333_334).abs() < 1e-14);
//!
//! // Streaming and merging
//! let mut left: Kurtosis = data[..2].iter().copied().collect();
//! let right: Kurtosis = data[2..].iter().copied().collect();
//! left.combine(&right).set_biased(true);
//! assert!((left.get_as_double() + 1.098_979_206_049_149_4).abs() < 1e-13);
//! ```
//!
//! # NaN Handling and Errors
//!
//! NaN and infinite results are values, not errors. Only invalid ranges,
//! NaNs rejected by [`NanPolicy::Error`](nan::NanPolicy::Error), and exact
//! integers narrowed to a type that cannot hold them produce an [`Error`]:
//!
//! ```
//! use descstat::prelude::*;
//!
//! let data = [1.0, f64::NAN, 3.0];
//!
//! assert!(Mean::of(&data).get_as_double().is_nan());
//! assert!(Mean::of_range(&data, 2, 4).is_err());
//!
//! let config = StatisticsConfig::new().nan_policy(NanPolicy::Error);
//! assert_eq!(config.of::<Mean>(&data), Err(Error::NanValue { index: 1 }));
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod batch;
pub mod config;
pub mod nan;
pub mod prelude;
pub mod statistics;
pub mod utils;

// Re-export commonly used types at crate root
pub use descstat_core::kernels;
pub use descstat_core::{
    Accept, ArrayStatistic, BiasConfigurable, Combine, Error, IntegerSample, Result, Statistic,
};
pub use utils::{approx_eq, approx_eq_relative, count_nans, ulp_distance, EPSILON, LOOSE_EPSILON};
