//! Input validation tests.
//!
//! Ranges are half-open `[from, to)` and validated before anything is read
//! or written. A rejected call leaves the input untouched.

#![allow(clippy::float_cmp)]

use descstat::prelude::*;

fn bits(values: &[f64]) -> Vec<u64> {
    values.iter().map(|x| x.to_bits()).collect()
}

// ==================== Range Checks ====================

#[test]
fn validation_range_errors_report_bounds() {
    let data = [1.0, 2.0, 3.0];
    assert_eq!(
        Mean::of_range(&data, 2, 5).unwrap_err(),
        Error::IndexOutOfBounds {
            from: 2,
            to: 5,
            length: 3
        }
    );
    assert_eq!(
        Variance::of_range(&data, 2, 1).unwrap_err(),
        Error::IndexOutOfBounds {
            from: 2,
            to: 1,
            length: 3
        }
    );
    assert!(Kurtosis::of_range(&data, 4, 4).is_err());
}

#[test]
fn validation_every_statistic_checks_ranges() {
    let data = [1.0, 2.0];
    assert!(Sum::of_range(&data, 0, 3).is_err());
    assert!(Product::of_range(&data, 0, 3).is_err());
    assert!(SumOfSquares::of_range(&data, 0, 3).is_err());
    assert!(StandardDeviation::of_range(&data, 0, 3).is_err());
    assert!(Skewness::of_range(&data, 0, 3).is_err());
    assert!(SumOfSquaredDeviations::of_range(&data, 0, 3).is_err());
    assert!(SumOfCubedDeviations::of_range(&data, 0, 3).is_err());
    assert!(SumOfFourthDeviations::of_range(&data, 0, 3).is_err());

    let ints = [1_i64, 2];
    assert!(LongSum::of_range(&ints, 1, 3).is_err());
    assert!(LongSumOfSquares::of_range(&ints, 1, 3).is_err());
    assert!(LongMean::of_range(&ints, 1, 3).is_err());
    assert!(LongVariance::of_range(&ints, 1, 3).is_err());
    assert!(LongStandardDeviation::of_range(&ints, 1, 3).is_err());
}

#[test]
fn validation_empty_range_is_valid() {
    let data = [1.0, 2.0, 3.0];
    let sum = Sum::of_range(&data, 3, 3).unwrap();
    assert_eq!(sum.get_as_double(), 0.0);
    let mean = Mean::of_range(&data, 0, 0).unwrap();
    assert_eq!(mean.count(), 0);
}

#[test]
fn validation_range_selects_subarray() {
    let data = [100.0, 1.0, 2.0, 3.0, 4.0, -100.0];
    let v = Variance::of_range(&data, 1, 5).unwrap();
    assert_eq!(v.count(), 4);
    assert_eq!(
        v.get_as_double().to_bits(),
        Variance::of(&data[1..5]).get_as_double().to_bits()
    );

    let ints = [i32::MAX, 5, 7, i32::MIN];
    assert_eq!(IntSum::of_range(&ints, 1, 3).unwrap().get_as_int(), Ok(12));
}

// ==================== NaN Policies ====================

#[test]
fn validation_error_policy_reports_absolute_index() {
    let data = [f64::NAN, 1.0, 2.0, f64::NAN, 3.0];
    let config = StatisticsConfig::new().nan_policy(NanPolicy::Error);

    let err = config.of_range::<Mean>(&data, 1, 5).unwrap_err();
    assert_eq!(err, Error::NanValue { index: 3 });
    assert_eq!(err.to_string(), "NaN value at index 3");

    // The NaN before the range is not inspected
    assert!(config.of_range::<Mean>(&data, 1, 3).is_ok());
}

#[test]
fn validation_range_checked_before_nan_policy() {
    let data = [f64::NAN, 1.0];
    let config = StatisticsConfig::new().nan_policy(NanPolicy::Error);
    assert!(matches!(
        config.of_range::<Variance>(&data, 0, 3),
        Err(Error::IndexOutOfBounds { .. })
    ));
}

#[test]
fn validation_failed_in_place_call_leaves_input_untouched() {
    let mut data = [3.0, f64::NAN, -0.0, 1.0, f64::NAN];
    let before = bits(&data);

    let error = StatisticsConfig::new()
        .nan_policy(NanPolicy::Error)
        .copy(false);
    assert!(error.of_range_in_place::<Mean>(&mut data, 0, 5).is_err());
    assert_eq!(bits(&data), before);

    let exclude = StatisticsConfig::new()
        .nan_policy(NanPolicy::Exclude)
        .copy(false);
    assert!(exclude.of_range_in_place::<Mean>(&mut data, 3, 9).is_err());
    assert_eq!(bits(&data), before);
}

#[test]
fn validation_copy_mode_never_modifies_input() {
    let mut data = [f64::NAN, 2.0, f64::NAN, 4.0];
    let before = bits(&data);
    let config = StatisticsConfig::new().nan_policy(NanPolicy::Exclude);

    let mean: Mean = config.of_range_in_place(&mut data, 0, 4).unwrap();
    assert_eq!(mean.get_as_double(), 3.0);
    assert_eq!(bits(&data), before);
}

#[test]
fn validation_in_place_exclusion_only_touches_range() {
    let mut data = [f64::NAN, 5.0, f64::NAN, 1.0, 2.0, f64::NAN];
    let config = StatisticsConfig::new()
        .nan_policy(NanPolicy::Exclude)
        .copy(false);

    let sum: Sum = config.of_range_in_place(&mut data, 1, 5).unwrap();
    assert_eq!(sum.get_as_double(), 8.0);
    assert!(data[0].is_nan());
    assert_eq!(&data[1..4], &[5.0, 1.0, 2.0]);
    assert!(data[4].is_nan());
    assert!(data[5].is_nan());
}

#[test]
fn validation_include_policy_keeps_nan() {
    let data = [1.0, f64::NAN];
    let mean: Mean = StatisticsConfig::new().of(&data).unwrap();
    assert!(mean.get_as_double().is_nan());
}

#[test]
fn validation_exclude_all_nan_gives_empty_statistic() {
    let data = [f64::NAN; 4];
    let config = StatisticsConfig::new().nan_policy(NanPolicy::Exclude);
    let v: Variance = config.of(&data).unwrap();
    assert_eq!(v.count(), 0);
    assert!(v.get_as_double().is_nan());
    let s: Sum = config.of(&data).unwrap();
    assert_eq!(s.get_as_double(), 0.0);
}

// ==================== Partitioned Evaluation ====================

#[test]
fn validation_partitioned_evaluation_checks_range() {
    let data = [1.0, 2.0, 3.0];
    let config = StatisticsConfig::new();
    let evaluator = PartitionedEvaluator::new();
    let result = evaluator.evaluate_with::<Mean>(&config, &data, 1, 4);
    assert_eq!(
        result.unwrap_err(),
        Error::IndexOutOfBounds {
            from: 1,
            to: 4,
            length: 3
        }
    );
}
