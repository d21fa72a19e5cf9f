//! `stats` subcommand: descriptive statistics of a 3x3 matrix

use anyhow::{Context, Result};
use console::style;

use crate::pipeline::calculate;
use crate::report::print_matrix_statistics;

/// Compute and print the statistics of nine row-major values.
pub fn run_stats(values: &[f64], json: bool) -> Result<()> {
    let stats = calculate(values)?;

    if json {
        let out = serde_json::to_string_pretty(&stats)
            .context("Failed to serialize matrix statistics to JSON")?;
        println!("{}", out);
        return Ok(());
    }

    println!(
        "\n {} Matrix statistics",
        style("◆").cyan().bold()
    );
    print_matrix_statistics(&stats);
    Ok(())
}
