//! Removal of implausible blood pressure readings and anthropometric outliers.

use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use super::error::{PipelineError, PipelineResult};
use super::stats::{quantile_sorted, sorted_copy};
use super::table::f64_values;

/// Default lower percentile cutoff for `height` and `weight`.
pub const DEFAULT_LOWER_QUANTILE: f64 = 0.025;
/// Default upper percentile cutoff for `height` and `weight`.
pub const DEFAULT_UPPER_QUANTILE: f64 = 0.975;

/// Inclusive `[lower, upper]` bounds for one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Percentile cutoffs computed over the unfiltered table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CleaningThresholds {
    pub height: Bounds,
    pub weight: Bounds,
}

/// What the filter did, rule by rule.
///
/// A row can fail more than one rule, so the per-rule counts may sum to more
/// than `rows_in - rows_out`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleaningReport {
    pub rows_in: usize,
    pub rows_out: usize,
    pub failed_pressure: usize,
    pub failed_height: usize,
    pub failed_weight: usize,
    pub thresholds: CleaningThresholds,
}

impl CleaningReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_in - self.rows_out
    }
}

fn column_bounds(values: &[f64], column: &str, lower_q: f64, upper_q: f64) -> PipelineResult<Bounds> {
    let sorted = sorted_copy(values);

    let lower = quantile_sorted(&sorted, lower_q);
    let upper = quantile_sorted(&sorted, upper_q);
    match (lower, upper) {
        (Some(lower), Some(upper)) => Ok(Bounds { lower, upper }),
        _ => Err(PipelineError::EmptyColumn {
            column: column.to_string(),
        }),
    }
}

/// Compute height and weight cutoffs in one pass over the full table.
pub fn compute_thresholds(
    df: &DataFrame,
    lower_q: f64,
    upper_q: f64,
) -> PipelineResult<CleaningThresholds> {
    validate_quantiles(lower_q, upper_q)?;

    let heights = f64_values(df, "height")?;
    let weights = f64_values(df, "weight")?;

    Ok(CleaningThresholds {
        height: column_bounds(&heights, "height", lower_q, upper_q)?,
        weight: column_bounds(&weights, "weight", lower_q, upper_q)?,
    })
}

/// Keep rows with `ap_lo <= ap_hi` and height/weight inside the cutoffs.
///
/// Thresholds are fixed before any row is evaluated, so dropping one row never
/// moves the cutoff applied to another.
pub fn clean(df: &DataFrame, lower_q: f64, upper_q: f64) -> PipelineResult<(DataFrame, CleaningReport)> {
    let thresholds = compute_thresholds(df, lower_q, upper_q)?;
    debug!(?thresholds, "computed percentile cutoffs");

    let ap_hi = f64_values(df, "ap_hi")?;
    let ap_lo = f64_values(df, "ap_lo")?;
    let heights = f64_values(df, "height")?;
    let weights = f64_values(df, "weight")?;

    let mut failed_pressure = 0usize;
    let mut failed_height = 0usize;
    let mut failed_weight = 0usize;

    let keep: Vec<bool> = (0..df.height())
        .map(|row| {
            let pressure_ok = ap_lo[row] <= ap_hi[row];
            let height_ok = thresholds.height.contains(heights[row]);
            let weight_ok = thresholds.weight.contains(weights[row]);

            failed_pressure += usize::from(!pressure_ok);
            failed_height += usize::from(!height_ok);
            failed_weight += usize::from(!weight_ok);

            pressure_ok && height_ok && weight_ok
        })
        .collect();

    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    let cleaned = df.filter(&mask)?;

    let report = CleaningReport {
        rows_in: df.height(),
        rows_out: cleaned.height(),
        failed_pressure,
        failed_height,
        failed_weight,
        thresholds,
    };

    info!(
        rows_in = report.rows_in,
        rows_out = report.rows_out,
        failed_pressure,
        failed_height,
        failed_weight,
        "cleaned examination table"
    );

    Ok((cleaned, report))
}

/// Bounds must lie in `[0, 1]` with `lower <= upper`.
pub fn validate_quantiles(lower: f64, upper: f64) -> PipelineResult<()> {
    let in_range = (0.0..=1.0).contains(&lower) && (0.0..=1.0).contains(&upper);
    if !in_range || lower > upper {
        return Err(PipelineError::InvalidQuantile { lower, upper });
    }
    Ok(())
}
