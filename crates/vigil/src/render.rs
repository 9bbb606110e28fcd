// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text terminal rendering of responses and render instructions.
//!
//! Everything here returns a `String` without color codes; commands add
//! color around the pieces they print.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use vigil_agent::{RenderInstruction, Visualizer};
use vigil_core::{Response, Table, Value};

/// Widest bar drawn for the largest value.
const BAR_WIDTH: usize = 40;

pub const EMPTY_STATE: &str = "No data available for this question.";

/// Full text block for one response: explanation, chart, query, suggestions.
pub fn render_response(response: &Response, suggestions: &[String]) -> String {
    let mut out = String::new();

    if let Some(error) = response.error() {
        let _ = writeln!(out, "error ({}): {}", error.reason, error.message);
    } else {
        if !response.explanation().is_empty() {
            let _ = writeln!(out, "{}\n", response.explanation());
        }
        if let Some(rows) = response.rows() {
            let instruction = Visualizer::render(rows, response.chart_hint());
            // A text-only analyst answer has no columns; its explanation is the answer.
            if rows.column_count() > 0 || response.explanation().is_empty() {
                out.push_str(&render_rows(rows, &instruction));
            }
        }
    }

    if !response.generated_query().is_empty() {
        let _ = writeln!(out, "\nquery:\n  {}", response.generated_query());
    }

    if !suggestions.is_empty() {
        out.push_str("\nyou could also ask:\n");
        for suggestion in suggestions {
            let _ = writeln!(out, "  - {suggestion}");
        }
    }
    out
}

/// Draw `table` the way `instruction` says.
pub fn render_rows(table: &Table, instruction: &RenderInstruction) -> String {
    match instruction {
        RenderInstruction::EmptyState => format!("{EMPTY_STATE}\n"),
        RenderInstruction::Series {
            category_column,
            series_columns,
            ..
        } => render_series(table, *category_column, series_columns),
        RenderInstruction::Pie {
            label_column,
            value_column,
        } => render_pie(table, *label_column, *value_column),
        RenderInstruction::Heatmap {
            x_column,
            y_column,
            value_column,
        } => render_heatmap(table, *x_column, *y_column, *value_column),
        RenderInstruction::Table => render_table(table),
    }
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round().max(1.0) as usize;
    "█".repeat(len.min(BAR_WIDTH))
}

fn labels(table: &Table, column: usize) -> Vec<String> {
    table.column_values(column).map(Value::to_string).collect()
}

fn label_width(labels: &[String]) -> usize {
    labels.iter().map(|l| l.chars().count()).max().unwrap_or(0)
}

fn render_series(table: &Table, category: usize, series: &[usize]) -> String {
    let width = label_width(&labels(table, category));
    let mut out = String::new();

    for &column in series {
        let max = table
            .column_values(column)
            .filter_map(Value::as_f64)
            .fold(0.0_f64, f64::max);
        if series.len() > 1 {
            let _ = writeln!(out, "{}", table.columns()[column]);
        }
        for row in table.rows() {
            let label = row[category].to_string();
            let cell = &row[column];
            let _ = writeln!(
                out,
                "{label:<width$} │{} {cell}",
                bar(cell.as_f64().unwrap_or(0.0), max)
            );
        }
    }
    out
}

fn render_pie(table: &Table, label_column: usize, value_column: usize) -> String {
    let labels = labels(table, label_column);
    let width = label_width(&labels);
    let values: Vec<f64> = table
        .column_values(value_column)
        .map(|v| v.as_f64().unwrap_or(0.0).max(0.0))
        .collect();
    let total: f64 = values.iter().sum();

    let mut out = String::new();
    for (label, value) in labels.iter().zip(&values) {
        let pct = if total > 0.0 { value / total * 100.0 } else { 0.0 };
        let _ = writeln!(out, "{label:<width$} {pct:>5.1}% {}", bar(pct, 100.0));
    }
    out
}

fn render_heatmap(table: &Table, x_column: usize, y_column: usize, value_column: usize) -> String {
    let mut cells: BTreeMap<(String, String), f64> = BTreeMap::new();
    let mut xs: Vec<String> = Vec::new();
    let mut ys: Vec<String> = Vec::new();
    for row in table.rows() {
        let x = row[x_column].to_string();
        let y = row[y_column].to_string();
        if !xs.contains(&x) {
            xs.push(x.clone());
        }
        if !ys.contains(&y) {
            ys.push(y.clone());
        }
        *cells.entry((x, y)).or_insert(0.0) += row[value_column].as_f64().unwrap_or(0.0);
    }

    let row_width = label_width(&xs).max(table.columns()[x_column].chars().count());
    let col_width = ys
        .iter()
        .map(|y| y.chars().count())
        .chain(cells.values().map(|v| format_number(*v).len()))
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    let _ = write!(out, "{:<row_width$}", table.columns()[x_column]);
    for y in &ys {
        let _ = write!(out, " {y:>col_width$}");
    }
    out.push('\n');
    for x in &xs {
        let _ = write!(out, "{x:<row_width$}");
        for y in &ys {
            let cell = cells
                .get(&(x.clone(), y.clone()))
                .map(|v| format_number(*v))
                .unwrap_or_else(|| "·".to_string());
            let _ = write!(out, " {cell:>col_width$}");
        }
        out.push('\n');
    }
    out
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

/// Aligned plain table with a header rule.
pub fn render_table(table: &Table) -> String {
    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(Value::to_string).collect())
        .collect();
    let widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = table
        .columns()
        .iter()
        .zip(&widths)
        .map(|(name, w)| format!("{name:<w$}"))
        .collect();
    let _ = writeln!(out, "{}", header.join("  ").trim_end());
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));
    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}
