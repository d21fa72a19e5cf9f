//! Cardiolens CLI
//!
//! Loads an examination table, derives risk-factor columns, counts
//! categorical frequencies, cleans outliers and prints the masked
//! correlation matrix.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use cardiolens::cli::{stats::run_stats, Cli, Commands};
use cardiolens::pipeline::{load_dataset_with_progress, run_pipeline_with};
use cardiolens::report::{export_analysis, RunSummary, TerminalReporter};
use cardiolens::utils::logging::{init_logging, LogConfig};
use cardiolens::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(cli.log_format.into())
        .with_ansi(console::colors_enabled_stderr());
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Stats { values, json } => run_stats(values, *json),
        };
    }

    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;
    let config = cli.pipeline_config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(input, &config);

    // Load
    let step_start = Instant::now();
    let (df, rows, cols, memory_mb) = load_dataset_with_progress(input, cli.infer_schema_length)?;
    print_success("Dataset loaded");
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    let mut summary = RunSummary::new(rows, cols);
    summary.load_time = step_start.elapsed();
    print_step_time(summary.load_time);

    let mut reporter = TerminalReporter::new(summary, config.correlation_threshold);
    let output = run_pipeline_with(df, &config, &mut reporter)?;
    let summary = reporter.into_summary();

    if let Some(export_path) = &cli.export {
        let spinner = create_spinner("Writing JSON export...");
        export_analysis(&output, &config, &input.display().to_string(), export_path)?;
        finish_with_success(&spinner, &format!("Saved to {}", export_path.display()));
    }

    summary.display();
    print_completion();

    Ok(())
}
