//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Ten examination records with hand-checked derived values.
///
/// - overweight after derivation: `[0, 1, 0, 1, 0, 1, 1, 1, 1, 1]`
/// - cholesterol after derivation: `[0, 1, 1, 0, 0, 1, 1, 1, 0, 0]`
/// - gluc after derivation: `[0, 0, 0, 0, 0, 1, 0, 1, 1, 0]`
/// - cardio: six subjects with 0, four with 1
/// - row 9 has `ap_lo > ap_hi`
/// - height cutoffs `[152.125, 175.975]` drop rows 5 and 7
/// - weight cutoffs `[57.35, 94.55]` drop rows 4 and 7
/// - cleaning keeps rows 0, 1, 2, 3, 6, 8
/// - `smoke` and `alco` are constant
pub fn create_examination_dataframe() -> DataFrame {
    df! {
        "id" => [0i64, 1, 2, 3, 4, 8, 9, 12, 13, 14],
        "age" => [18393i64, 20228, 18857, 17623, 17474, 21914, 22113, 22584, 17668, 19834],
        "gender" => [2i64, 1, 1, 2, 1, 1, 1, 2, 1, 1],
        "height" => [168i64, 156, 165, 169, 156, 151, 157, 178, 158, 164],
        "weight" => [62.0f64, 85.0, 64.0, 82.0, 56.0, 67.0, 93.0, 95.0, 71.0, 68.0],
        "ap_hi" => [110i64, 140, 130, 150, 100, 120, 130, 130, 110, 110],
        "ap_lo" => [80i64, 90, 70, 100, 60, 80, 80, 90, 70, 160],
        "cholesterol" => [1i64, 3, 3, 1, 1, 2, 3, 3, 1, 1],
        "gluc" => [1i64, 1, 1, 1, 1, 2, 1, 3, 2, 1],
        "smoke" => [0i64, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        "alco" => [0i64, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        "active" => [1i64, 1, 0, 1, 0, 0, 1, 1, 1, 0],
        "cardio" => [0i64, 1, 1, 1, 0, 0, 0, 1, 0, 0],
    }
    .unwrap()
}

/// Column order of the correlation matrix for the fixture above.
pub const EXPECTED_MATRIX_COLUMNS: [&str; 14] = [
    "id",
    "age",
    "gender",
    "height",
    "weight",
    "ap_hi",
    "ap_lo",
    "cholesterol",
    "gluc",
    "smoke",
    "alco",
    "active",
    "cardio",
    "overweight",
];

/// Larger random examination table for property-style tests
pub fn create_random_examination_dataframe(rows: usize, seed: u64) -> DataFrame {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let id: Vec<i64> = (0..rows as i64).collect();
    let age: Vec<i64> = (0..rows).map(|_| rng.gen_range(14_000..24_000)).collect();
    let gender: Vec<i64> = (0..rows).map(|_| rng.gen_range(1..=2)).collect();
    let height: Vec<i64> = (0..rows).map(|_| rng.gen_range(140..200)).collect();
    let weight: Vec<f64> = (0..rows).map(|_| rng.gen_range(40.0..130.0)).collect();
    let ap_hi: Vec<i64> = (0..rows).map(|_| rng.gen_range(90..180)).collect();
    let ap_lo: Vec<i64> = (0..rows).map(|_| rng.gen_range(50..130)).collect();
    let cholesterol: Vec<i64> = (0..rows).map(|_| rng.gen_range(1..=3)).collect();
    let gluc: Vec<i64> = (0..rows).map(|_| rng.gen_range(1..=3)).collect();
    let smoke: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..=1)).collect();
    let alco: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..=1)).collect();
    let active: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..=1)).collect();
    let cardio: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..=1)).collect();

    DataFrame::new(vec![
        Column::new("id".into(), id),
        Column::new("age".into(), age),
        Column::new("gender".into(), gender),
        Column::new("height".into(), height),
        Column::new("weight".into(), weight),
        Column::new("ap_hi".into(), ap_hi),
        Column::new("ap_lo".into(), ap_lo),
        Column::new("cholesterol".into(), cholesterol),
        Column::new("gluc".into(), gluc),
        Column::new("smoke".into(), smoke),
        Column::new("alco".into(), alco),
        Column::new("active".into(), active),
        Column::new("cardio".into(), cardio),
    ])
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("medical_examination.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("medical_examination.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Integer values of a column, for assertions
pub fn i64_column(df: &DataFrame, name: &str) -> Vec<i64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Int64)
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect()
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Same value, treating two NaNs as equal
pub fn same_coefficient(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
}
