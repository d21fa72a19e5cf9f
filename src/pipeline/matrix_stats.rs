//! Descriptive statistics of a 3×3 matrix along both axes and globally.

use serde::Serialize;

use super::error::{PipelineError, PipelineResult};
use super::stats::{mean, population_variance};

/// Side length of the square matrix.
pub const SIDE: usize = 3;

/// One statistic reduced three ways.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisReduction {
    /// Down each column (axis 0)
    pub columns: [f64; SIDE],
    /// Across each row (axis 1)
    pub rows: [f64; SIDE],
    /// Over all nine values
    pub flattened: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixStatistics {
    pub mean: AxisReduction,
    pub variance: AxisReduction,
    #[serde(rename = "standard deviation")]
    pub standard_deviation: AxisReduction,
    pub max: AxisReduction,
    pub min: AxisReduction,
    pub sum: AxisReduction,
}

fn reduce(matrix: &[[f64; SIDE]; SIDE], flat: &[f64], f: impl Fn(&[f64]) -> f64) -> AxisReduction {
    let mut columns = [0.0; SIDE];
    let mut rows = [0.0; SIDE];
    for k in 0..SIDE {
        let column: Vec<f64> = matrix.iter().map(|row| row[k]).collect();
        columns[k] = f(&column[..]);
        rows[k] = f(matrix[k].as_slice());
    }
    AxisReduction {
        columns,
        rows,
        flattened: f(flat),
    }
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Reduce nine values, read row-major into a 3×3 matrix.
///
/// Variances are population variances. Any length other than nine is
/// rejected before anything is computed.
pub fn calculate(values: &[f64]) -> PipelineResult<MatrixStatistics> {
    if values.len() != SIDE * SIDE {
        return Err(PipelineError::NotNineValues { len: values.len() });
    }

    let mut matrix = [[0.0; SIDE]; SIDE];
    for (idx, &v) in values.iter().enumerate() {
        matrix[idx / SIDE][idx % SIDE] = v;
    }

    Ok(MatrixStatistics {
        mean: reduce(&matrix, values, mean),
        variance: reduce(&matrix, values, population_variance),
        standard_deviation: reduce(&matrix, values, |v| population_variance(v).sqrt()),
        max: reduce(&matrix, values, max_of),
        min: reduce(&matrix, values, min_of),
        sum: reduce(&matrix, values, |v| v.iter().sum()),
    })
}
