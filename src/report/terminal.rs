//! Terminal rendering of a pipeline run, stage by stage

use std::time::Duration;

use indicatif::ProgressBar;
use polars::prelude::DataFrame;
use tracing::warn;

use crate::pipeline::{
    CleaningReport, CorrelationMatrix, FrequencyRecord, PipelineObserver, Stage,
};
use crate::report::{
    print_correlation_matrix, print_frequencies, print_strongest_pairs, RunSummary,
};
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_count, print_info,
    print_step_header, print_step_time, print_success,
};

/// Prints step headers, tables and timings while filling a [`RunSummary`].
pub struct TerminalReporter {
    summary: RunSummary,
    correlation_threshold: f64,
    spinner: Option<ProgressBar>,
}

impl TerminalReporter {
    pub fn new(summary: RunSummary, correlation_threshold: f64) -> Self {
        Self {
            summary,
            correlation_threshold,
            spinner: None,
        }
    }

    pub fn into_summary(self) -> RunSummary {
        self.summary
    }
}

impl PipelineObserver for TerminalReporter {
    fn on_stage_start(&mut self, stage: Stage) {
        print_step_header(stage.number(), stage.title());
        if stage == Stage::Clean {
            self.spinner = Some(create_spinner("Filtering implausible rows..."));
        }
    }

    fn on_derived(&mut self, _derived: &DataFrame) {
        print_success("Added overweight, binarized cholesterol and gluc");
    }

    fn on_frequencies(&mut self, records: &[FrequencyRecord]) {
        print_count("frequency record(s)", records.len(), Some("(by cardio)"));
        print_frequencies(records);
        self.summary.frequency_records = records.len();
    }

    fn on_cleaned(&mut self, _cleaned: &DataFrame, report: &CleaningReport) {
        if let Some(spinner) = self.spinner.take() {
            if report.rows_out == 0 {
                finish_with_warning(&spinner, "No rows survived cleaning");
            } else {
                finish_with_success(
                    &spinner,
                    &format!("Dropped {} of {} rows", report.rows_dropped(), report.rows_in),
                );
            }
        }
        if report.rows_out == 0 {
            warn!("cleaning removed every row; correlations will be undefined");
        }

        let t = &report.thresholds;
        print_info(&format!(
            "height ∈ [{:.1}, {:.1}], weight ∈ [{:.1}, {:.1}]",
            t.height.lower, t.height.upper, t.weight.lower, t.weight.upper
        ));
        self.summary.cleaning = Some(report.clone());
    }

    fn on_correlation(&mut self, matrix: &CorrelationMatrix) {
        print_correlation_matrix(matrix);

        let pairs = matrix.strongest_pairs(self.correlation_threshold);
        if pairs.is_empty() {
            print_info("No column pairs above the correlation threshold");
        } else {
            print_count(
                "correlated pair(s)",
                pairs.len(),
                Some(&format!("(|r| > {:.2})", self.correlation_threshold)),
            );
            print_strongest_pairs(&pairs);
        }

        self.summary.correlated_columns = matrix.len();
        self.summary.undefined_columns = (0..matrix.len())
            .filter(|&i| matrix.get(i, i).is_nan())
            .map(|i| matrix.columns()[i].clone())
            .collect();
    }

    fn on_stage_end(&mut self, stage: Stage, elapsed: Duration) {
        match stage {
            Stage::Derive => self.summary.derive_time = elapsed,
            Stage::Frequencies => self.summary.reshape_time = elapsed,
            Stage::Clean => self.summary.clean_time = elapsed,
            Stage::Correlate => self.summary.correlation_time = elapsed,
        }
        print_step_time(elapsed);
    }
}
