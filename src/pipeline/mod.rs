//! Pipeline module - orchestrates derivation, reshaping, cleaning and correlation

pub mod cleaning;
pub mod correlation;
pub mod derive;
pub mod error;
pub mod loader;
pub mod matrix_stats;
pub mod reshape;
pub mod stats;
pub mod table;

pub use cleaning::*;
pub use correlation::*;
pub use derive::*;
pub use error::*;
pub use loader::*;
pub use matrix_stats::{calculate, AxisReduction, MatrixStatistics};
pub use reshape::*;

use std::time::{Duration, Instant};

use polars::prelude::DataFrame;
use tracing::info_span;

/// Tunable parameters of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Lower percentile cutoff applied to height and weight
    pub lower_quantile: f64,
    /// Upper percentile cutoff applied to height and weight
    pub upper_quantile: f64,
    /// |r| above which a pair is listed in the strongest-pairs summary
    pub correlation_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            lower_quantile: DEFAULT_LOWER_QUANTILE,
            upper_quantile: DEFAULT_UPPER_QUANTILE,
            correlation_threshold: 0.2,
        }
    }
}

/// Everything the rendering side needs from one run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Raw table with derived columns
    pub derived: DataFrame,
    pub frequencies: Vec<FrequencyRecord>,
    pub cleaned: DataFrame,
    pub cleaning: CleaningReport,
    pub correlation: CorrelationMatrix,
}

/// Stages of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Derive,
    Frequencies,
    Clean,
    Correlate,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Derive, Stage::Frequencies, Stage::Clean, Stage::Correlate];

    /// 1-based position in the run.
    pub fn number(self) -> u8 {
        match self {
            Stage::Derive => 1,
            Stage::Frequencies => 2,
            Stage::Clean => 3,
            Stage::Correlate => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Stage::Derive => "Derived Columns",
            Stage::Frequencies => "Categorical Frequencies",
            Stage::Clean => "Cleaning",
            Stage::Correlate => "Correlation Matrix",
        }
    }
}

/// Hooks called by [`run_pipeline_with`] as each stage starts and finishes.
///
/// Every hook defaults to a no-op.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: Stage) {}

    fn on_derived(&mut self, _derived: &DataFrame) {}

    fn on_frequencies(&mut self, _records: &[FrequencyRecord]) {}

    fn on_cleaned(&mut self, _cleaned: &DataFrame, _report: &CleaningReport) {}

    fn on_correlation(&mut self, _matrix: &CorrelationMatrix) {}

    fn on_stage_end(&mut self, _stage: Stage, _elapsed: Duration) {}
}

/// Observer that ignores every event.
impl PipelineObserver for () {}

/// Derive → count frequencies; derive → clean → correlate.
pub fn run_pipeline(raw: DataFrame, config: &PipelineConfig) -> PipelineResult<PipelineOutput> {
    run_pipeline_with(raw, config, &mut ())
}

/// [`run_pipeline`] reporting each stage to `observer`.
pub fn run_pipeline_with<O: PipelineObserver + ?Sized>(
    raw: DataFrame,
    config: &PipelineConfig,
    observer: &mut O,
) -> PipelineResult<PipelineOutput> {
    let _span = info_span!("pipeline", rows = raw.height()).entered();

    let mut derived = raw;
    let start = observe_start(observer, Stage::Derive);
    derive_columns(&mut derived)?;
    observer.on_derived(&derived);
    observer.on_stage_end(Stage::Derive, start.elapsed());

    let start = observe_start(observer, Stage::Frequencies);
    let frequencies = count_frequencies(&derived)?;
    observer.on_frequencies(&frequencies);
    observer.on_stage_end(Stage::Frequencies, start.elapsed());

    let start = observe_start(observer, Stage::Clean);
    let (cleaned, cleaning) = clean(&derived, config.lower_quantile, config.upper_quantile)?;
    observer.on_cleaned(&cleaned, &cleaning);
    observer.on_stage_end(Stage::Clean, start.elapsed());

    let start = observe_start(observer, Stage::Correlate);
    let correlation = compute_correlation_matrix(&cleaned)?;
    observer.on_correlation(&correlation);
    observer.on_stage_end(Stage::Correlate, start.elapsed());

    Ok(PipelineOutput {
        derived,
        frequencies,
        cleaned,
        cleaning,
        correlation,
    })
}

fn observe_start<O: PipelineObserver + ?Sized>(observer: &mut O, stage: Stage) -> Instant {
    observer.on_stage_start(stage);
    Instant::now()
}
