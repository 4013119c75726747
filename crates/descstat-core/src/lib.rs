//! descstat-core: numeric kernels for robust descriptive statistics
//!
//! This crate provides the building blocks behind the `descstat` statistics:
//! exact wide integers, double-double arithmetic, compensated summation and
//! the shared central-moment state, together with the error type and the
//! capability traits every statistic implements.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

pub mod error;
pub mod kernels;
pub mod traits;

pub use error::{check_range, Error, Result};
pub use kernels::{CompensatedSum, Int128, MomentOrder, Moments, UInt128, UInt192, UInt256, DD};
pub use traits::{Accept, ArrayStatistic, BiasConfigurable, Combine, IntegerSample, Statistic};
