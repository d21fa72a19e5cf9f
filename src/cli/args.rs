//! Command-line argument definitions using clap

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::pipeline::{PipelineConfig, DEFAULT_LOWER_QUANTILE, DEFAULT_UPPER_QUANTILE};
use crate::utils::logging::LogFormat;

/// Cardiolens - derive, reshape, clean and correlate examination data
#[derive(Parser, Debug)]
#[command(name = "cardiolens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write frequencies, cleaning report and correlation matrix to this JSON file
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Lower percentile cutoff (0-1) for height and weight outliers
    #[arg(long, default_value_t = DEFAULT_LOWER_QUANTILE, value_parser = validate_quantile)]
    pub lower_quantile: f64,

    /// Upper percentile cutoff (0-1) for height and weight outliers
    #[arg(long, default_value_t = DEFAULT_UPPER_QUANTILE, value_parser = validate_quantile)]
    pub upper_quantile: f64,

    /// List column pairs whose absolute correlation exceeds this value
    #[arg(long, default_value = "0.2", value_parser = validate_quantile)]
    pub correlation_threshold: f64,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Diagnostic log format (written to stderr)
    #[arg(long, value_enum, default_value = "compact", global = true)]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mean, variance, standard deviation, max, min and sum of a 3x3 matrix
    Stats {
        /// Nine numbers, read row-major
        #[arg(allow_negative_numbers = true)]
        values: Vec<f64>,

        /// Print the statistics as JSON instead of tables
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Compact,
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

impl Cli {
    /// Get the input path, if one was given.
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    /// Pipeline parameters from the parsed flags.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            lower_quantile: self.lower_quantile,
            upper_quantile: self.upper_quantile,
            correlation_threshold: self.correlation_threshold,
        }
    }
}

/// Validator for values that must lie in [0, 1]
fn validate_quantile(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=1.0).contains(&value) {
        Err(format!("value must be between 0.0 and 1.0, got {}", value))
    } else {
        Ok(value)
    }
}
