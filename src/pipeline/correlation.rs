//! Pearson correlation matrix and the upper-triangle display mask

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use super::error::PipelineResult;
use super::table::{column_to_f64, numeric_column_names, require_column};

/// Represents a correlated pair of columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelatedPair {
    pub feature1: String,
    pub feature2: String,
    pub correlation: f64,
}

/// Square, symmetric matrix of Pearson coefficients.
///
/// Rows and columns follow the table's column order. A constant column yields
/// NaN in every cell involving it, its own diagonal included.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    /// Row-major, `columns.len()²` entries
    values: Vec<f64>,
}

impl CorrelationMatrix {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.len() + j]
    }

    /// Look up a coefficient by column names.
    pub fn get_by_name(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.get(i, j))
    }

    /// Rows of the matrix, for renderers that want nested vectors.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.values.chunks(self.len().max(1)).map(<[f64]>::to_vec).collect()
    }

    /// The mask hiding the diagonal and everything above it.
    pub fn mask(&self) -> TriangularMask {
        TriangularMask::upper(self.len())
    }

    /// Cell formatted to one decimal.
    pub fn display_value(&self, i: usize, j: usize) -> String {
        format_coefficient(self.get(i, j))
    }

    /// Display strings of cells left visible by the mask, row-major.
    ///
    /// For `n` columns this yields `n * (n - 1) / 2` strings.
    pub fn visible_cells(&self) -> Vec<String> {
        let mask = self.mask();
        let n = self.len();
        (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .filter(|&(i, j)| !mask.is_masked(i, j))
            .map(|(i, j)| self.display_value(i, j))
            .collect()
    }

    /// Visible pairs with `|r| > threshold`, strongest first.
    pub fn strongest_pairs(&self, threshold: f64) -> Vec<CorrelatedPair> {
        let n = self.len();
        let mut pairs: Vec<CorrelatedPair> = (0..n)
            .flat_map(|i| (0..i).map(move |j| (i, j)))
            .filter_map(|(i, j)| {
                let corr = self.get(i, j);
                if corr.abs() > threshold && !corr.is_nan() {
                    Some(CorrelatedPair {
                        feature1: self.columns[j].clone(),
                        feature2: self.columns[i].clone(),
                        correlation: corr,
                    })
                } else {
                    None
                }
            })
            .collect();

        // Sort by absolute correlation descending
        pairs.sort_by(|a, b| {
            b.correlation
                .abs()
                .partial_cmp(&a.correlation.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        pairs
    }
}

/// Boolean matrix, true where a cell is suppressed from display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriangularMask {
    size: usize,
}

impl TriangularMask {
    /// Mask of the main diagonal and the upper triangle.
    pub fn upper(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        j >= i
    }

    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.size)
            .map(|i| (0..self.size).map(|j| self.is_masked(i, j)).collect())
            .collect()
    }
}

/// One decimal, sign of zero kept (`-0.0` stays distinct), NaN as `nan`.
pub fn format_coefficient(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.1}", value)
    }
}

/// Power-of-two scale and the moments of the scaled column.
///
/// Values are divided by a power of two near `max |x|` so squared deviations
/// stay finite for any finite input. `std` is `None` for a constant or empty
/// column.
#[derive(Debug, Clone, Copy)]
struct Moments {
    scale: f64,
    mean: f64,
    std: Option<f64>,
}

fn moments(values: &[f64]) -> Moments {
    let max_abs = values.iter().fold(0.0f64, |acc, x| acc.max(x.abs()));
    let scale = if max_abs > 1.0 {
        2f64.powi(max_abs.log2().floor() as i32)
    } else {
        1.0
    };

    let n = values.len() as f64;
    let mean = values.iter().map(|x| x / scale).sum::<f64>() / n;
    let ss: f64 = values
        .iter()
        .map(|x| {
            let d = x / scale - mean;
            d * d
        })
        .sum();
    let std = (ss / n).sqrt();
    let std = if values.is_empty() || std == 0.0 || !std.is_finite() {
        None
    } else {
        Some(std)
    };
    Moments { scale, mean, std }
}

/// Two-pass Pearson coefficient with population moments.
fn pearson(x: &[f64], mx: Moments, sx: f64, y: &[f64], my: Moments, sy: f64) -> f64 {
    let n = x.len() as f64;
    let cov: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(a, b)| (a / mx.scale - mx.mean) * (b / my.scale - my.mean))
        .sum::<f64>()
        / n;
    (cov / (sx * sy)).clamp(-1.0, 1.0)
}

/// Correlate the given columns pairwise.
///
/// Each pair is evaluated sequentially on its own, so the parallel fan-out
/// over pairs never changes the result bits.
pub fn correlation_matrix_from_columns(columns: Vec<(String, Vec<f64>)>) -> CorrelationMatrix {
    let n = columns.len();
    let stats: Vec<Moments> = columns.par_iter().map(|(_, v)| moments(v)).collect();

    // Lower triangle including the diagonal
    let pairs: Vec<(usize, usize)> = (0..n).flat_map(|i| (0..=i).map(move |j| (i, j))).collect();

    let coefficients: Vec<f64> = pairs
        .par_iter()
        .map(|&(i, j)| match (stats[i].std, stats[j].std) {
            (Some(_), Some(_)) if i == j => 1.0,
            (Some(sx), Some(sy)) => pearson(&columns[i].1, stats[i], sx, &columns[j].1, stats[j], sy),
            _ => f64::NAN,
        })
        .collect();

    let mut values = vec![f64::NAN; n * n];
    for (&(i, j), &r) in pairs.iter().zip(coefficients.iter()) {
        values[i * n + j] = r;
        values[j * n + i] = r;
    }

    let constant = stats.iter().filter(|m| m.std.is_none()).count();
    debug!(pairs = pairs.len(), constant, "computed pairwise correlations");

    CorrelationMatrix {
        columns: columns.into_iter().map(|(name, _)| name).collect(),
        values,
    }
}

/// Correlation matrix over every numeric column of `df`, in table order.
pub fn compute_correlation_matrix(df: &DataFrame) -> PipelineResult<CorrelationMatrix> {
    let names = numeric_column_names(df);
    let columns = names
        .into_iter()
        .map(|name| {
            let values = column_to_f64(require_column(df, &name)?)?;
            Ok((name, values))
        })
        .collect::<PipelineResult<Vec<_>>>()?;

    let matrix = correlation_matrix_from_columns(columns);
    info!(
        columns = matrix.len(),
        rows = df.height(),
        "computed correlation matrix"
    );
    Ok(matrix)
}
