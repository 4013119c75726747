//! Reference value tests.
//!
//! Each file in `tests/fixtures/` holds an input array and the exact value of
//! every statistic, computed in rational arithmetic and rounded once to
//! `f64`. A `null` expectation means the statistic is undefined (`NaN`).
//! Keys missing from `expected` are not checked.

#![allow(clippy::float_cmp)]
#![allow(clippy::unreadable_literal)]

mod common;

use common::approx_eq_scaled;
use descstat::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_TOLERANCE: f64 = 1e-12;
const STREAMING_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Deserialize)]
struct Fixture {
    rationale: String,
    #[serde(default)]
    tolerance: Option<f64>,
    input: Vec<f64>,
    expected: BTreeMap<String, Option<f64>>,
}

impl Fixture {
    fn tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_TOLERANCE)
    }
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture(path: &Path) -> Fixture {
    let content = fs::read_to_string(path).expect("Failed to read fixture file");
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()))
}

fn load_all() -> Vec<(String, Fixture)> {
    let mut fixtures: Vec<(String, Fixture)> = fs::read_dir(fixtures_dir())
        .expect("Failed to read fixtures directory")
        .map(|entry| entry.expect("Failed to read directory entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .map(|path| {
            let name = path
                .file_stem()
                .expect("fixture has a name")
                .to_string_lossy()
                .into_owned();
            (name, load_fixture(&path))
        })
        .collect();
    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    assert!(!fixtures.is_empty(), "no fixtures found");
    fixtures
}

/// Every value the library reports for `values`, keyed like the fixtures.
fn evaluate(values: &[f64]) -> BTreeMap<&'static str, f64> {
    let mut out = BTreeMap::new();
    out.insert("sum", Sum::of(values).get_as_double());
    out.insert("sum_of_squares", SumOfSquares::of(values).get_as_double());
    out.insert("product", Product::of(values).get_as_double());
    out.insert("mean", Mean::of(values).get_as_double());
    out.insert("variance", Variance::of(values).get_as_double());
    out.insert(
        "variance_biased",
        Variance::of(values).set_biased(true).get_as_double(),
    );
    out.insert(
        "standard_deviation",
        StandardDeviation::of(values).get_as_double(),
    );
    out.insert("skewness", Skewness::of(values).get_as_double());
    out.insert(
        "skewness_biased",
        Skewness::of(values).set_biased(true).get_as_double(),
    );
    out.insert("kurtosis", Kurtosis::of(values).get_as_double());
    out.insert(
        "kurtosis_biased",
        Kurtosis::of(values).set_biased(true).get_as_double(),
    );
    out
}

fn check(case: &str, path: &str, actual: f64, expected: Option<f64>, tolerance: f64) {
    match expected {
        None => assert!(
            actual.is_nan(),
            "{case}/{path}: expected NaN, got {actual}"
        ),
        Some(e) => assert!(
            approx_eq_scaled(actual, e, tolerance),
            "{case}/{path}: expected {e}, got {actual} (diff: {})",
            (actual - e).abs()
        ),
    }
}

// ==================== Array Evaluation ====================

#[test]
fn reference_array_values() {
    for (name, fixture) in load_all() {
        assert!(!fixture.rationale.is_empty(), "{name}: missing rationale");
        let actual = evaluate(&fixture.input);
        for (key, expected) in &fixture.expected {
            let value = *actual
                .get(key.as_str())
                .unwrap_or_else(|| panic!("{name}: unknown statistic {key}"));
            check(&name, key, value, *expected, fixture.tolerance());
        }
    }
}

#[test]
fn reference_config_matches_direct() {
    let config = StatisticsConfig::new().biased(true);
    for (name, fixture) in load_all() {
        let k: Kurtosis = config.of(&fixture.input).expect("no NaN in fixtures");
        let direct = Kurtosis::of(&fixture.input).set_biased(true).get_as_double();
        assert!(
            k.get_as_double().to_bits() == direct.to_bits(),
            "{name}: configured kurtosis differs from direct evaluation"
        );
    }
}

// ==================== Streaming and Merging ====================

fn check_statistic<S>(name: &str, label: &str, stat: &S, fixture: &Fixture, key: &str)
where
    S: Statistic,
{
    let Some(expected) = fixture.expected.get(key) else {
        return;
    };
    let tolerance = fixture.tolerance().max(STREAMING_TOLERANCE);
    check(
        name,
        &format!("{key} ({label})"),
        stat.get_as_double(),
        *expected,
        tolerance,
    );
}

#[test]
fn reference_streaming_values() {
    for (name, fixture) in load_all() {
        let mut mean = Mean::new();
        let mut variance = Variance::new();
        let mut skewness = Skewness::new();
        let mut kurtosis = Kurtosis::new();
        for &x in &fixture.input {
            mean.accept(x);
            variance.accept(x);
            skewness.accept(x);
            kurtosis.accept(x);
        }
        check_statistic(&name, "streaming", &mean, &fixture, "mean");
        check_statistic(&name, "streaming", &variance, &fixture, "variance");
        check_statistic(&name, "streaming", &skewness, &fixture, "skewness");
        check_statistic(&name, "streaming", &kurtosis, &fixture, "kurtosis");
    }
}

#[test]
fn reference_merged_halves() {
    for (name, fixture) in load_all() {
        let (left, right) = fixture.input.split_at(fixture.input.len() / 2);

        let mut mean = Mean::of(left);
        mean.combine(&Mean::of(right));
        let mut variance = Variance::of(left);
        variance.combine(&Variance::of(right));
        let mut skewness = Skewness::of(left);
        skewness.combine(&Skewness::of(right));
        let mut kurtosis = Kurtosis::of(left);
        kurtosis.combine(&Kurtosis::of(right));

        assert_eq!(kurtosis.count(), fixture.input.len() as u64);
        check_statistic(&name, "merged", &mean, &fixture, "mean");
        check_statistic(&name, "merged", &variance, &fixture, "variance");
        check_statistic(&name, "merged", &skewness, &fixture, "skewness");
        check_statistic(&name, "merged", &kurtosis, &fixture, "kurtosis");
    }
}

// ==================== Known Closed Forms ====================

#[test]
fn reference_powers_of_two() {
    let data = [1.0, 2.0, 4.0, 8.0];
    assert_eq!(Mean::of(&data).get_as_double(), 3.75);
    assert_eq!(SumOfSquaredDeviations::of(&data).get_as_double(), 28.75);
    assert_eq!(SumOfCubedDeviations::of(&data).get_as_double(), 50.625);
    assert_eq!(SumOfFourthDeviations::of(&data).get_as_double(), 392.828125);
    assert!(approx_eq_scaled(
        Skewness::of(&data).get_as_double(),
        1.1376243669576889,
        1e-14
    ));
    assert!(approx_eq_scaled(
        Kurtosis::of(&data).set_biased(true).get_as_double(),
        -1.0989792060491494,
        1e-14
    ));
}

#[test]
fn reference_integer_statistics() {
    let data: [i64; 8] = [2, 4, 4, 4, 5, 5, 7, 9];
    assert_eq!(LongSum::of(&data).get_as_long().unwrap(), 40);
    assert_eq!(LongSumOfSquares::of(&data).get_as_long().unwrap(), 232);
    assert_eq!(LongMean::of(&data).get_as_double(), 5.0);
    assert_eq!(
        LongStandardDeviation::of(&data)
            .set_biased(true)
            .get_as_double(),
        2.0
    );
    assert!(approx_eq_scaled(
        LongVariance::of(&data).get_as_double(),
        32.0 / 7.0,
        1e-15
    ));
}
