//! Wide-to-long melt of the categorical risk factors and per-`cardio`
//! frequency counts.

use std::collections::BTreeMap;
use std::fmt;

use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use super::error::PipelineResult;
use super::table::i64_values;

/// Outcome column the long form is keyed by.
pub const GROUP_COLUMN: &str = "cardio";

/// Categorical variables melted into long form.
///
/// Declaration order is alphabetical and drives `Ord`, so every consumer that
/// iterates variables sees `active, alco, cholesterol, gluc, overweight, smoke`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoricalVariable {
    Active,
    Alco,
    Cholesterol,
    Gluc,
    Overweight,
    Smoke,
}

impl CategoricalVariable {
    pub const ALL: [CategoricalVariable; 6] = [
        CategoricalVariable::Active,
        CategoricalVariable::Alco,
        CategoricalVariable::Cholesterol,
        CategoricalVariable::Gluc,
        CategoricalVariable::Overweight,
        CategoricalVariable::Smoke,
    ];

    /// Column name in the derived table.
    pub fn column_name(self) -> &'static str {
        match self {
            CategoricalVariable::Active => "active",
            CategoricalVariable::Alco => "alco",
            CategoricalVariable::Cholesterol => "cholesterol",
            CategoricalVariable::Gluc => "gluc",
            CategoricalVariable::Overweight => "overweight",
            CategoricalVariable::Smoke => "smoke",
        }
    }
}

impl fmt::Display for CategoricalVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One melted cell: a subject's value for one variable, with its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongRecord {
    pub cardio: i64,
    pub variable: CategoricalVariable,
    pub value: i64,
}

/// Number of subjects sharing `(cardio, variable, value)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyRecord {
    pub cardio: i64,
    pub variable: CategoricalVariable,
    pub value: i64,
    pub total: usize,
}

/// Melt the six categorical columns into long form.
///
/// Rows are emitted subject by subject, variables in alphabetical order.
pub fn melt(df: &DataFrame) -> PipelineResult<Vec<LongRecord>> {
    let cardio = i64_values(df, GROUP_COLUMN)?;
    let columns = CategoricalVariable::ALL
        .iter()
        .map(|&variable| Ok((variable, i64_values(df, variable.column_name())?)))
        .collect::<PipelineResult<Vec<_>>>()?;

    let mut long = Vec::with_capacity(cardio.len() * columns.len());
    for (row, &group) in cardio.iter().enumerate() {
        for (variable, values) in &columns {
            long.push(LongRecord {
                cardio: group,
                variable: *variable,
                value: values[row],
            });
        }
    }

    debug!(rows = long.len(), "melted categorical variables");
    Ok(long)
}

/// Count melted rows per `(cardio, variable, value)`.
///
/// Only observed triples are emitted. Output is ordered by cardio, then
/// variable, then value.
pub fn count_frequencies(df: &DataFrame) -> PipelineResult<Vec<FrequencyRecord>> {
    let long = melt(df)?;

    let mut counts: BTreeMap<(i64, CategoricalVariable, i64), usize> = BTreeMap::new();
    for record in &long {
        *counts
            .entry((record.cardio, record.variable, record.value))
            .or_insert(0) += 1;
    }

    let frequencies: Vec<FrequencyRecord> = counts
        .into_iter()
        .map(|((cardio, variable, value), total)| FrequencyRecord {
            cardio,
            variable,
            value,
            total,
        })
        .collect();

    info!(
        records = frequencies.len(),
        subjects = df.height(),
        "counted categorical frequencies"
    );
    Ok(frequencies)
}

/// Expose frequency records as a table with columns
/// `cardio, variable, value, total`.
pub fn frequencies_to_dataframe(records: &[FrequencyRecord]) -> PipelineResult<DataFrame> {
    let cardio: Vec<i64> = records.iter().map(|r| r.cardio).collect();
    let variable: Vec<&str> = records.iter().map(|r| r.variable.column_name()).collect();
    let value: Vec<i64> = records.iter().map(|r| r.value).collect();
    let total: Vec<u64> = records.iter().map(|r| r.total as u64).collect();

    let df = DataFrame::new(vec![
        Column::new(GROUP_COLUMN.into(), cardio),
        Column::new("variable".into(), variable),
        Column::new("value".into(), value),
        Column::new("total".into(), total),
    ])?;
    Ok(df)
}
