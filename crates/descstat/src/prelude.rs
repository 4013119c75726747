//! Commonly used types and traits for convenient importing.
//!
//! ```
//! use descstat::prelude::*;
//!
//! let mut sd = StandardDeviation::of(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
//! assert_eq!(sd.set_biased(true).get_as_double(), 2.0);
//!
//! let sum = LongSum::of(&[i64::MAX, 1]);
//! assert!(sum.get_as_long().is_err());
//! ```
//!
//! # Contents
//!
//! - [`Error`], [`Result`]
//! - the capability traits [`Statistic`], [`Accept`], [`Combine`],
//!   [`ArrayStatistic`] and [`BiasConfigurable`]
//! - every statistic type and the integer aliases
//! - [`StatisticsConfig`], [`NanPolicy`], [`NanTransformer`] and
//!   [`PartitionedEvaluator`]

// Error types
pub use crate::{Error, Result};

// Traits
pub use crate::{Accept, ArrayStatistic, BiasConfigurable, Combine, IntegerSample, Statistic};

// Statistics
pub use crate::statistics::{
    Kurtosis, Mean, Product, Skewness, StandardDeviation, Sum, SumOfCubedDeviations,
    SumOfFourthDeviations, SumOfSquaredDeviations, SumOfSquares, Variance,
};
pub use crate::statistics::{
    IntMean, IntStandardDeviation, IntSum, IntSumOfSquares, IntVariance, LongMean,
    LongStandardDeviation, LongSum, LongSumOfSquares, LongVariance,
};

// Configuration and evaluation
pub use crate::batch::{evaluate_batch, PartitionedEvaluator};
pub use crate::config::StatisticsConfig;
pub use crate::nan::{NanPolicy, NanTransformer};
