//! Partitioned and batch evaluation of statistics.
//!
//! A statistic over a large array can be evaluated as independent partitions
//! that are merged with [`Combine`](crate::Combine) afterwards. With the
//! `parallel` feature the partitions (and the series of a batch) are
//! evaluated on the Rayon thread pool; without it they are evaluated
//! sequentially and the results are the same.
//!
//! # Feature Flag
//!
//! ```toml
//! [dependencies]
//! descstat = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! # Example
//!
//! ```
//! use descstat::batch::PartitionedEvaluator;
//! use descstat::statistics::Variance;
//!
//! let data: Vec<f64> = (0..10_000).map(f64::from).collect();
//! let v: Variance = PartitionedEvaluator::new()
//!     .min_partition_len(1000)
//!     .partitions(4)
//!     .evaluate(&data);
//! assert!((v.get_as_double() - Variance::of(&data).get_as_double()).abs() < 1e-6);
//! ```

use std::ops::Range;

use log::debug;

use crate::config::{StatisticsConfig, DEFAULT_MIN_PARTITION_LEN};
use descstat_core::{ArrayStatistic, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Evaluates a statistic over contiguous partitions of an array and merges
/// the partial results left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionedEvaluator {
    /// Partitions are never shorter than this.
    min_partition_len: usize,
    /// Requested partition count; 0 picks one per worker thread.
    partitions: usize,
}

impl Default for PartitionedEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl PartitionedEvaluator {
    /// Creates an evaluator with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_partition_len: DEFAULT_MIN_PARTITION_LEN,
            partitions: 0,
        }
    }

    /// Sets the minimum partition length.
    ///
    /// Default: [`DEFAULT_MIN_PARTITION_LEN`]
    #[must_use]
    pub const fn min_partition_len(mut self, len: usize) -> Self {
        self.min_partition_len = len;
        self
    }

    /// Sets the number of partitions; 0 uses one per worker thread.
    ///
    /// Default: 0
    #[must_use]
    pub const fn partitions(mut self, partitions: usize) -> Self {
        self.partitions = partitions;
        self
    }

    /// Splits `len` elements into contiguous, nearly equal ranges.
    #[must_use]
    pub fn ranges(&self, len: usize) -> Vec<Range<usize>> {
        let by_len = (len / self.min_partition_len.max(1)).max(1);
        let wanted = if self.partitions == 0 {
            worker_threads()
        } else {
            self.partitions
        };
        let k = wanted.min(by_len).max(1);
        let base = len / k;
        let extra = len % k;
        let mut ranges = Vec::with_capacity(k);
        let mut start = 0;
        for i in 0..k {
            let end = start + base + usize::from(i < extra);
            ranges.push(start..end);
            start = end;
        }
        ranges
    }

    /// Evaluates a statistic over `values`.
    pub fn evaluate<S>(&self, values: &[f64]) -> S
    where
        S: ArrayStatistic + Send,
    {
        let ranges = self.ranges(values.len());
        if ranges.len() == 1 {
            return S::of(values);
        }
        debug!(
            "evaluating {} values in {} partitions",
            values.len(),
            ranges.len()
        );
        let parts = map_ranges(values, &ranges);
        merge(parts)
    }

    /// Evaluates a statistic over `values[from..to]` after applying the NaN
    /// policy and bias of `config`. `values` is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds)
    /// for an invalid range, or [`Error::NanValue`](crate::Error::NanValue)
    /// under [`NanPolicy::Error`](crate::nan::NanPolicy::Error).
    pub fn evaluate_with<S>(
        &self,
        config: &StatisticsConfig,
        values: &[f64],
        from: usize,
        to: usize,
    ) -> Result<S>
    where
        S: ArrayStatistic + Send,
    {
        let (data, range) = config.transformer().apply_copy(values, from, to)?;
        let mut stat: S = self.evaluate(&data[range]);
        stat.configure(config.get_biased());
        Ok(stat)
    }

    /// Evaluates a statistic over each of many independent series.
    pub fn evaluate_batch<S, V>(&self, series: &[V]) -> Vec<S>
    where
        S: ArrayStatistic + Send,
        V: AsRef<[f64]> + Sync,
    {
        debug!("evaluating a batch of {} series", series.len());
        #[cfg(feature = "parallel")]
        {
            series.par_iter().map(|s| S::of(s.as_ref())).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            series.iter().map(|s| S::of(s.as_ref())).collect()
        }
    }
}

/// Evaluates a statistic over each of many series with default settings.
pub fn evaluate_batch<S, V>(series: &[V]) -> Vec<S>
where
    S: ArrayStatistic + Send,
    V: AsRef<[f64]> + Sync,
{
    PartitionedEvaluator::new().evaluate_batch(series)
}

#[cfg(feature = "parallel")]
fn worker_threads() -> usize {
    rayon::current_num_threads()
}

#[cfg(not(feature = "parallel"))]
const fn worker_threads() -> usize {
    1
}

#[cfg(feature = "parallel")]
fn map_ranges<S: ArrayStatistic + Send>(values: &[f64], ranges: &[Range<usize>]) -> Vec<S> {
    ranges.par_iter().map(|r| S::of(&values[r.clone()])).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_ranges<S: ArrayStatistic + Send>(values: &[f64], ranges: &[Range<usize>]) -> Vec<S> {
    ranges.iter().map(|r| S::of(&values[r.clone()])).collect()
}

fn merge<S: ArrayStatistic>(parts: Vec<S>) -> S {
    let mut iter = parts.into_iter();
    let Some(mut acc) = iter.next() else {
        return S::of(&[]);
    };
    for part in iter {
        acc.combine(&part);
    }
    acc
}
