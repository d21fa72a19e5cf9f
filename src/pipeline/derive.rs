//! Derived columns: `overweight` flag and binarized `cholesterol`/`gluc`.

use polars::prelude::*;
use tracing::{debug, info};

use super::error::{PipelineError, PipelineResult};
use super::table::{f64_values, i64_values};

/// Body-mass index above which a subject is flagged overweight (strict).
pub const OVERWEIGHT_BMI: f64 = 25.0;

/// Name of the appended overweight flag column.
pub const OVERWEIGHT_COLUMN: &str = "overweight";

/// Columns recoded from {1, 2, 3} to {0, 1}.
pub const RECODED_COLUMNS: [&str; 2] = ["cholesterol", "gluc"];

/// Raw encoding of the recoded columns (1 = normal).
pub const RAW_LEVELS: &[i64] = &[1, 2, 3];

/// `1` when `weight / height² * 10000` exceeds 25, with height in cm.
///
/// Evaluated in exactly this order so a BMI of 25 compares equal and is not
/// flagged.
pub fn is_overweight(weight_kg: f64, height_cm: f64) -> bool {
    weight_kg / (height_cm * height_cm) * 10000.0 > OVERWEIGHT_BMI
}

/// Normal (1) maps to 0; every other level maps to 1.
pub fn binarize_level(level: i64) -> i64 {
    if level == 1 {
        0
    } else {
        1
    }
}

/// Add `overweight` and recode `cholesterol`/`gluc` in place.
///
/// Runs once per table: a table already carrying `overweight`, or holding a
/// recoded value outside {1, 2, 3}, is rejected instead of being recoded a
/// second time.
pub fn derive_columns(df: &mut DataFrame) -> PipelineResult<()> {
    if df.column(OVERWEIGHT_COLUMN).is_ok() {
        return Err(PipelineError::AlreadyDerived {
            column: OVERWEIGHT_COLUMN.to_string(),
        });
    }

    let heights = f64_values(df, "height")?;
    let weights = f64_values(df, "weight")?;

    // Validate both raw columns before touching the table.
    let mut recoded = Vec::with_capacity(RECODED_COLUMNS.len());
    for name in RECODED_COLUMNS {
        let levels = i64_values(df, name)?;
        if let Some((row, &value)) = levels
            .iter()
            .enumerate()
            .find(|(_, v)| !RAW_LEVELS.contains(v))
        {
            return Err(PipelineError::UnexpectedEncoding {
                column: name.to_string(),
                row,
                value,
                expected: RAW_LEVELS,
            });
        }
        let binary: Vec<i64> = levels.into_iter().map(binarize_level).collect();
        recoded.push(Column::new(name.into(), binary));
    }

    let overweight: Vec<i64> = weights
        .iter()
        .zip(heights.iter())
        .map(|(&w, &h)| i64::from(is_overweight(w, h)))
        .collect();
    let flagged = overweight.iter().filter(|&&v| v == 1).count();

    for column in recoded {
        df.with_column(column)?;
    }
    df.with_column(Column::new(OVERWEIGHT_COLUMN.into(), overweight))?;

    debug!(columns = ?RECODED_COLUMNS, "recoded raw levels to binary");
    info!(
        rows = df.height(),
        overweight = flagged,
        "derived overweight flag"
    );

    Ok(())
}
