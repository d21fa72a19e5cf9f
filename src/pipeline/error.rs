//! Error types for the examination pipeline.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised by the pipeline stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The matrix statistics need exactly nine values (a 3×3 matrix).
    #[error("List must contain nine numbers.")]
    NotNineValues {
        /// Length of the rejected input
        len: usize,
    },

    /// A required column is absent from the table.
    #[error("Column '{column}' not found in dataset")]
    MissingColumn { column: String },

    /// A required column exists but is not numeric.
    #[error("Column '{column}' must be numeric, found {dtype}")]
    NonNumericColumn { column: String, dtype: String },

    /// A required column contains a null value.
    #[error("Column '{column}' has a missing value at row {row}")]
    NullValue { column: String, row: usize },

    /// A numeric column holds NaN or an infinity.
    #[error("Column '{column}' has non-finite value {value} at row {row}")]
    NonFiniteValue { column: String, row: usize, value: f64 },

    /// A categorical column holds a value with a fractional part.
    #[error("Column '{column}' has non-integral value {value} at row {row}")]
    NonIntegralValue { column: String, row: usize, value: f64 },

    /// The derived columns are already present.
    #[error("Table already carries derived column '{column}'; derivation must run exactly once")]
    AlreadyDerived { column: String },

    /// A raw categorical column holds a value outside its documented encoding.
    #[error("Column '{column}' has value {value} at row {row}, expected one of {expected:?}")]
    UnexpectedEncoding {
        column: String,
        row: usize,
        value: i64,
        expected: &'static [i64],
    },

    /// A percentile was requested over a column with no rows.
    #[error("Cannot compute a percentile of empty column '{column}'")]
    EmptyColumn { column: String },

    /// Quantile bounds outside [0, 1] or inverted.
    #[error("Invalid quantile bounds: lower {lower}, upper {upper}")]
    InvalidQuantile { lower: f64, upper: f64 },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
