//! Tests for the cleaning filter

use cardiolens::pipeline::{
    clean, compute_thresholds, derive_columns, PipelineError, DEFAULT_LOWER_QUANTILE,
    DEFAULT_UPPER_QUANTILE,
};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

fn derived_fixture() -> DataFrame {
    let mut df = common::create_examination_dataframe();
    derive_columns(&mut df).unwrap();
    df
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_thresholds_use_linear_interpolation() {
    let df = derived_fixture();
    let t = compute_thresholds(&df, DEFAULT_LOWER_QUANTILE, DEFAULT_UPPER_QUANTILE).unwrap();

    assert!(approx(t.height.lower, 152.125), "height lower {}", t.height.lower);
    assert!(approx(t.height.upper, 175.975), "height upper {}", t.height.upper);
    assert!(approx(t.weight.lower, 57.35), "weight lower {}", t.weight.lower);
    assert!(approx(t.weight.upper, 94.55), "weight upper {}", t.weight.upper);
}

#[test]
fn test_clean_keeps_expected_rows() {
    let df = derived_fixture();
    let (cleaned, report) = clean(&df, DEFAULT_LOWER_QUANTILE, DEFAULT_UPPER_QUANTILE).unwrap();

    assert_eq!(common::i64_column(&cleaned, "id"), vec![0, 1, 2, 3, 9, 13]);
    assert_eq!(report.rows_in, 10);
    assert_eq!(report.rows_out, 6);
    assert_eq!(report.rows_dropped(), 4);
    assert_eq!(report.failed_pressure, 1);
    assert_eq!(report.failed_height, 2);
    assert_eq!(report.failed_weight, 2);
    assert_eq!(cleaned.width(), df.width(), "Cleaning drops rows, never columns");
}

#[test]
fn test_inverted_pressure_always_dropped() {
    let df = derived_fixture();
    // Widest possible window: only the pressure rule applies
    let (cleaned, report) = clean(&df, 0.0, 1.0).unwrap();

    assert_eq!(report.failed_pressure, 1);
    assert_eq!(report.failed_height, 0);
    assert_eq!(report.failed_weight, 0);
    assert_eq!(cleaned.height(), 9);
    assert!(!common::i64_column(&cleaned, "id").contains(&14));
}

#[test]
fn test_thresholds_fixed_before_filtering() {
    let df = derived_fixture();
    let (_, report) = clean(&df, DEFAULT_LOWER_QUANTILE, DEFAULT_UPPER_QUANTILE).unwrap();

    // Same cutoffs as the full, unfiltered table
    let full = compute_thresholds(&df, DEFAULT_LOWER_QUANTILE, DEFAULT_UPPER_QUANTILE).unwrap();
    assert_eq!(report.thresholds, full);

    // Dropping the invalid-pressure row first would have moved the cutoffs
    let mask = BooleanChunked::from_slice(
        "valid".into(),
        &common::i64_column(&df, "id")
            .iter()
            .map(|&id| id != 14)
            .collect::<Vec<_>>(),
    );
    let without = df.filter(&mask).unwrap();
    let shifted =
        compute_thresholds(&without, DEFAULT_LOWER_QUANTILE, DEFAULT_UPPER_QUANTILE).unwrap();
    assert!(approx(shifted.height.lower, 152.0));
    assert_ne!(shifted, full);
}

#[test]
fn test_boundary_values_are_kept() {
    // Five rows: type-7 quantiles at 0 and 1 are exactly min and max
    let df = df! {
        "height" => [150i64, 160, 170, 180, 190],
        "weight" => [50.0f64, 60.0, 70.0, 80.0, 90.0],
        "ap_hi" => [120i64, 120, 120, 120, 120],
        "ap_lo" => [80i64, 80, 120, 80, 80],
    }
    .unwrap();

    let (cleaned, report) = clean(&df, 0.0, 1.0).unwrap();
    assert_eq!(cleaned.height(), 5, "ap_lo == ap_hi and min/max are all kept");
    assert_eq!(report.failed_pressure, 0);
}

#[test]
fn test_invalid_quantiles_rejected() {
    let df = derived_fixture();
    let err = clean(&df, 0.9, 0.1).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidQuantile { .. }));
}

#[test]
fn test_empty_table_is_error() {
    let df = df! {
        "height" => Vec::<i64>::new(),
        "weight" => Vec::<f64>::new(),
        "ap_hi" => Vec::<i64>::new(),
        "ap_lo" => Vec::<i64>::new(),
    }
    .unwrap();

    let err = clean(&df, DEFAULT_LOWER_QUANTILE, DEFAULT_UPPER_QUANTILE).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyColumn { ref column } if column == "height"));
}

#[test]
fn test_nan_weight_is_error_not_silent_drop() {
    let df = df! {
        "height" => [150i64, 160, 170, 180, 190],
        "weight" => [50.0f64, 60.0, 70.0, 80.0, f64::NAN],
        "ap_hi" => [120i64, 120, 120, 120, 120],
        "ap_lo" => [80i64, 80, 80, 80, 80],
    }
    .unwrap();

    let err = clean(&df, 0.0, 1.0).unwrap_err();
    assert!(
        matches!(err, PipelineError::NonFiniteValue { ref column, row: 4, .. } if column == "weight"),
        "unexpected error: {}",
        err
    );
    assert!(compute_thresholds(&df, 0.0, 1.0).is_err());
}

#[test]
fn test_infinite_height_is_error() {
    let df = df! {
        "height" => [150.0f64, f64::INFINITY, 170.0],
        "weight" => [50.0f64, 60.0, 70.0],
        "ap_hi" => [120i64, 120, 120],
        "ap_lo" => [80i64, 80, 80],
    }
    .unwrap();

    let err = clean(&df, DEFAULT_LOWER_QUANTILE, DEFAULT_UPPER_QUANTILE).unwrap_err();
    assert!(matches!(err, PipelineError::NonFiniteValue { ref column, row: 1, .. } if column == "height"));
}
