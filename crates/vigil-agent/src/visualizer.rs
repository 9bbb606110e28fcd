// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chart selection from data shape.
//!
//! A chart hint is a preference, not a command. When the rows do not have
//! the shape the preferred chart needs, the instruction degrades to a plain
//! table so every response stays renderable.

use serde::Serialize;
use vigil_core::{ChartHint, Table, Value};

/// Column-name fragments that mark a time axis.
const TIME_LIKE: &[&str] = &["date", "time", "day", "month", "week", "hour"];

/// Bar or line series chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Bar,
    Line,
}

/// What a front end should draw for a set of rows.
///
/// Column references are indices into the table's column list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderInstruction {
    /// No rows: show the empty-state message.
    EmptyState,
    /// Column 0 is the category axis; each series column is one numeric series.
    Series {
        chart: SeriesKind,
        category_column: usize,
        series_columns: Vec<usize>,
    },
    Pie {
        label_column: usize,
        value_column: usize,
    },
    Heatmap {
        x_column: usize,
        y_column: usize,
        value_column: usize,
    },
    /// Plain tabular rendering of every row and column.
    Table,
}

/// Stateless chart selector.
#[derive(Debug, Clone, Copy, Default)]
pub struct Visualizer;

impl Visualizer {
    /// Decide how to draw `rows` given the preferred `hint`.
    pub fn render(rows: &Table, hint: ChartHint) -> RenderInstruction {
        if rows.is_empty() {
            return RenderInstruction::EmptyState;
        }

        let columns = rows.column_count();
        match hint {
            ChartHint::Bar | ChartHint::Line if columns >= 2 => {
                let series_columns: Vec<usize> =
                    (1..columns).filter(|&i| rows.is_numeric_column(i)).collect();
                if series_columns.is_empty() {
                    return RenderInstruction::Table;
                }
                let chart = if hint == ChartHint::Line {
                    SeriesKind::Line
                } else {
                    SeriesKind::Bar
                };
                RenderInstruction::Series {
                    chart,
                    category_column: 0,
                    series_columns,
                }
            }
            // A third column would be silently dropped from a pie.
            ChartHint::Pie if columns == 2 && rows.is_numeric_column(1) => RenderInstruction::Pie {
                label_column: 0,
                value_column: 1,
            },
            ChartHint::Heatmap if columns >= 3 && rows.is_numeric_column(2) => {
                RenderInstruction::Heatmap {
                    x_column: 0,
                    y_column: 1,
                    value_column: 2,
                }
            }
            _ => RenderInstruction::Table,
        }
    }

    /// Pick a chart hint for rows that arrived without one.
    ///
    /// A time-like first column followed by a number suggests a line; a text
    /// first column followed by a number suggests a bar. Anything else is a table.
    pub fn suggest_hint(rows: &Table) -> ChartHint {
        if rows.column_count() < 2 || !rows.is_numeric_column(1) {
            return ChartHint::Table;
        }

        let first = rows.columns()[0].to_lowercase();
        if TIME_LIKE.iter().any(|t| first.contains(t)) {
            return ChartHint::Line;
        }

        let first_is_text = rows
            .column_values(0)
            .filter(|v| !v.is_null())
            .all(|v| matches!(v, Value::Text(_)));
        if first_is_text {
            ChartHint::Bar
        } else {
            ChartHint::Table
        }
    }
}
