//! Run summary report

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::CleaningReport;

/// Counts and timings of one pipeline run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub rows_loaded: usize,
    pub columns_loaded: usize,
    pub frequency_records: usize,
    pub cleaning: Option<CleaningReport>,
    pub correlated_columns: usize,
    pub undefined_columns: Vec<String>,
    pub load_time: Duration,
    pub derive_time: Duration,
    pub reshape_time: Duration,
    pub clean_time: Duration,
    pub correlation_time: Duration,
}

impl RunSummary {
    pub fn new(rows_loaded: usize, columns_loaded: usize) -> Self {
        Self {
            rows_loaded,
            columns_loaded,
            ..Default::default()
        }
    }

    pub fn total_time(&self) -> Duration {
        self.load_time + self.derive_time + self.reshape_time + self.clean_time + self.correlation_time
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Rows loaded"),
            Cell::new(self.rows_loaded),
        ]);
        table.add_row(vec![
            Cell::new("📐 Columns loaded"),
            Cell::new(self.columns_loaded),
        ]);
        table.add_row(vec![
            Cell::new("📊 Frequency records"),
            Cell::new(self.frequency_records),
        ]);

        if let Some(cleaning) = &self.cleaning {
            let dropped_color = |n: usize| if n == 0 { Color::White } else { Color::Red };
            table.add_row(vec![
                Cell::new("🩺 Failed ap_lo <= ap_hi"),
                Cell::new(cleaning.failed_pressure).fg(dropped_color(cleaning.failed_pressure)),
            ]);
            table.add_row(vec![
                Cell::new("📏 Failed height window"),
                Cell::new(cleaning.failed_height).fg(dropped_color(cleaning.failed_height)),
            ]);
            table.add_row(vec![
                Cell::new("⚖️  Failed weight window"),
                Cell::new(cleaning.failed_weight).fg(dropped_color(cleaning.failed_weight)),
            ]);
            table.add_row(vec![
                Cell::new("✅ Rows retained"),
                Cell::new(cleaning.rows_out)
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
            ]);

            let retained_pct = if cleaning.rows_in > 0 {
                cleaning.rows_out as f64 / cleaning.rows_in as f64 * 100.0
            } else {
                0.0
            };
            table.add_row(vec![
                Cell::new("📉 Retained"),
                Cell::new(format!("{:.1}%", retained_pct)).add_attribute(Attribute::Bold),
            ]);
        }

        table.add_row(vec![
            Cell::new("🔗 Correlated columns"),
            Cell::new(self.correlated_columns),
        ]);
        table.add_row(vec![
            Cell::new("⏱️  Total time"),
            Cell::new(format!("{:.2}s", self.total_time().as_secs_f64())),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.undefined_columns.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Constant columns (correlation undefined)").yellow(),
                style(format!("({})", self.undefined_columns.len())).dim()
            );
            for column in &self.undefined_columns {
                println!("        {} {}", style("•").dim(), column);
            }
        }
    }
}
