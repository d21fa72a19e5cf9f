//! Unit tests for dataset loader

use cardiolens::pipeline::load_dataset_with_progress;
use polars::prelude::*;
use std::io::Write;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_load_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "id,height,weight").unwrap();
    writeln!(file, "0,168,62.0").unwrap();
    writeln!(file, "1,156,85.0").unwrap();
    drop(file);

    let (df, rows, cols, mem_mb) = load_dataset_with_progress(&csv_path, 100).unwrap();

    assert_eq!(rows, 2, "Should have 2 data rows");
    assert_eq!(cols, 3, "Should have 3 columns");
    assert_eq!(df.get_column_names(), &["id", "height", "weight"]);
    assert!(df.column("height").unwrap().dtype().is_primitive_numeric());
    assert!(mem_mb >= 0.0, "Memory estimate should be non-negative");
}

#[test]
fn test_load_parquet_file() {
    let mut df = common::create_examination_dataframe();
    let (_temp_dir, parquet_path) = common::create_temp_parquet(&mut df);

    let (loaded_df, rows, cols, _mem) = load_dataset_with_progress(&parquet_path, 100).unwrap();

    assert_eq!(rows, 10);
    assert_eq!(cols, 13);
    assert_eq!(loaded_df.get_column_names(), df.get_column_names());
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.xlsx");
    std::fs::write(&path, b"not a table").unwrap();

    let err = load_dataset_with_progress(&path, 100).unwrap_err();
    assert!(
        err.to_string().contains("Unsupported file format"),
        "unexpected error: {}",
        err
    );
}

#[test]
fn test_missing_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.csv");

    assert!(load_dataset_with_progress(&path, 100).is_err());
}
