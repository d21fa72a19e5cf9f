//! JSON export of a pipeline run

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{CleaningReport, FrequencyRecord, PipelineConfig, PipelineOutput};

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the export (RFC 3339)
    pub timestamp: String,
    pub cardiolens_version: String,
    pub input_file: String,
    pub lower_quantile: f64,
    pub upper_quantile: f64,
    /// Always "linear" (type 7)
    pub percentile_method: &'static str,
}

/// Correlation matrix with its display mask.
///
/// Undefined coefficients serialize as `null`.
#[derive(Serialize)]
pub struct CorrelationExport {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
    pub mask: Vec<Vec<bool>>,
    /// One-decimal strings of the cells left visible by the mask
    pub visible: Vec<String>,
}

/// Complete export document
#[derive(Serialize)]
pub struct AnalysisExport<'a> {
    pub metadata: ExportMetadata,
    pub cleaning: &'a CleaningReport,
    pub frequencies: &'a [FrequencyRecord],
    pub correlation: CorrelationExport,
}

/// Assemble the export document for one run.
pub fn build_export<'a>(
    output: &'a PipelineOutput,
    config: &PipelineConfig,
    input_file: &str,
) -> AnalysisExport<'a> {
    let matrix = &output.correlation;
    AnalysisExport {
        metadata: ExportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            cardiolens_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: input_file.to_string(),
            lower_quantile: config.lower_quantile,
            upper_quantile: config.upper_quantile,
            percentile_method: "linear",
        },
        cleaning: &output.cleaning,
        frequencies: &output.frequencies,
        correlation: CorrelationExport {
            columns: matrix.columns().to_vec(),
            values: matrix.rows(),
            mask: matrix.mask().to_rows(),
            visible: matrix.visible_cells(),
        },
    }
}

/// Write the run's results to a JSON file
pub fn export_analysis(
    output: &PipelineOutput,
    config: &PipelineConfig,
    input_file: &str,
    path: &Path,
) -> Result<()> {
    let export = build_export(output, config, input_file);

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize analysis to JSON")?;

    std::fs::write(path, json)
        .with_context(|| format!("Failed to write analysis to {}", path.display()))?;

    Ok(())
}
