//! Terminal tables for frequencies, the masked correlation matrix and the
//! matrix statistics

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};

use crate::pipeline::{
    AxisReduction, CategoricalVariable, CorrelatedPair, CorrelationMatrix, FrequencyRecord,
    MatrixStatistics,
};

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

/// One row per variable, one column per (cardio, value) bar.
pub fn frequency_table(records: &[FrequencyRecord]) -> Table {
    let mut keys: Vec<(i64, i64)> = records.iter().map(|r| (r.cardio, r.value)).collect();
    keys.sort_unstable();
    keys.dedup();

    let mut header = vec![Cell::new("variable").add_attribute(Attribute::Bold)];
    header.extend(keys.iter().map(|(cardio, value)| {
        Cell::new(format!("cardio={} value={}", cardio, value)).add_attribute(Attribute::Bold)
    }));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(header);

    for variable in CategoricalVariable::ALL {
        let mut row = vec![Cell::new(variable.column_name())];
        for &(cardio, value) in &keys {
            let total = records
                .iter()
                .find(|r| r.cardio == cardio && r.variable == variable && r.value == value)
                .map(|r| r.total);
            row.push(
                Cell::new(total.map(|t| t.to_string()).unwrap_or_default())
                    .set_alignment(CellAlignment::Right),
            );
        }
        table.add_row(row);
    }
    table
}

/// Lower triangle of the matrix; masked cells are left blank.
pub fn correlation_table(matrix: &CorrelationMatrix) -> Table {
    let mask = matrix.mask();
    let mut header = vec![Cell::new("")];
    header.extend(matrix.columns().iter().map(|c| Cell::new(c).add_attribute(Attribute::Bold)));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(header);

    for (i, name) in matrix.columns().iter().enumerate() {
        let mut row = vec![Cell::new(name).add_attribute(Attribute::Bold)];
        for j in 0..matrix.len() {
            if mask.is_masked(i, j) {
                row.push(Cell::new(""));
                continue;
            }
            let r = matrix.get(i, j);
            let color = if r.is_nan() {
                Color::DarkGrey
            } else if r >= 0.4 {
                Color::Red
            } else if r <= -0.1 {
                Color::Blue
            } else {
                Color::Reset
            };
            row.push(
                Cell::new(matrix.display_value(i, j))
                    .fg(color)
                    .set_alignment(CellAlignment::Right),
            );
        }
        table.add_row(row);
    }
    table
}

pub fn print_frequencies(records: &[FrequencyRecord]) {
    print_indented(&frequency_table(records));
}

pub fn print_correlation_matrix(matrix: &CorrelationMatrix) {
    print_indented(&correlation_table(matrix));
}

pub fn print_strongest_pairs(pairs: &[CorrelatedPair]) {
    for pair in pairs {
        println!(
            "        {} ↔ {}: {:.3}",
            pair.feature1, pair.feature2, pair.correlation
        );
    }
}

fn format_axis(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{}", v)).collect();
    format!("[{}]", parts.join(", "))
}

/// One row per statistic: column-wise, row-wise and flattened reductions.
pub fn matrix_statistics_table(stats: &MatrixStatistics) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Statistic").add_attribute(Attribute::Bold),
        Cell::new("Columns").add_attribute(Attribute::Bold),
        Cell::new("Rows").add_attribute(Attribute::Bold),
        Cell::new("All").add_attribute(Attribute::Bold),
    ]);

    let rows: [(&str, &AxisReduction); 6] = [
        ("mean", &stats.mean),
        ("variance", &stats.variance),
        ("standard deviation", &stats.standard_deviation),
        ("max", &stats.max),
        ("min", &stats.min),
        ("sum", &stats.sum),
    ];
    for (name, reduction) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format_axis(&reduction.columns)),
            Cell::new(format_axis(&reduction.rows)),
            Cell::new(reduction.flattened),
        ]);
    }
    table
}

pub fn print_matrix_statistics(stats: &MatrixStatistics) {
    print_indented(&matrix_statistics_table(stats));
}
