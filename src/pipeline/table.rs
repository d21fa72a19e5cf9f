//! Typed column accessors over a polars `DataFrame`.
//!
//! Stages never walk polars expressions: they pull a column out as a plain
//! `Vec<f64>` or `Vec<i64>`, validated against the schema contract.

use polars::prelude::*;

use super::error::{PipelineError, PipelineResult};

/// Fetch a column, mapping polars' lookup error to `MissingColumn`.
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> PipelineResult<&'a Column> {
    df.column(name).map_err(|_| PipelineError::MissingColumn {
        column: name.to_string(),
    })
}

/// Extract a numeric column as `f64` values.
///
/// Fails on a missing column, a non-numeric dtype, a null, or NaN/infinity.
pub fn f64_values(df: &DataFrame, name: &str) -> PipelineResult<Vec<f64>> {
    let column = require_column(df, name)?;
    column_to_f64(column)
}

/// Extract a categorical column as integer codes.
///
/// Values are read as floats and must have no fractional part, so a float
/// column holding `1.0`/`2.0` is accepted while `1.5` is rejected.
pub fn i64_values(df: &DataFrame, name: &str) -> PipelineResult<Vec<i64>> {
    let values = f64_values(df, name)?;
    values
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            if v.fract() == 0.0 {
                Ok(v as i64)
            } else {
                Err(PipelineError::NonIntegralValue {
                    column: name.to_string(),
                    row,
                    value: v,
                })
            }
        })
        .collect()
}

/// Convert an already-fetched column to `f64` values.
pub fn column_to_f64(column: &Column) -> PipelineResult<Vec<f64>> {
    let name = column.name().to_string();
    if !column.dtype().is_primitive_numeric() {
        return Err(PipelineError::NonNumericColumn {
            column: name,
            dtype: column.dtype().to_string(),
        });
    }

    let float_col = column.cast(&DataType::Float64)?;
    let ca = float_col.f64()?;

    ca.iter()
        .enumerate()
        .map(|(row, v)| match v {
            None => Err(PipelineError::NullValue {
                column: name.clone(),
                row,
            }),
            Some(value) if !value.is_finite() => Err(PipelineError::NonFiniteValue {
                column: name.clone(),
                row,
                value,
            }),
            Some(value) => Ok(value),
        })
        .collect()
}

/// Names of all primitive numeric columns, in table order.
pub fn numeric_column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .map(|col| col.name().to_string())
        .collect()
}
