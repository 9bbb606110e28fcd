// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data model shared by the router, pipeline, collaborators, and front ends.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumString};

use crate::error::VigilError;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of collaborator behind a [`PluginAdapter`](crate::PluginAdapter).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    QueryBackend,
    RemoteAnalyst,
}

// --- Tabular data ---

/// A single scalar cell returned by a query backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// True for integer and real values.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Real(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Converts a JSON scalar into a cell. Arrays and objects are kept as their JSON text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map(Value::Real).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::Text(s.clone()),
            other => Value::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, ""),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r:.2}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// An ordered sequence of records sharing one ordered column list.
///
/// Column order is significant: the visualizer treats column 0 as the
/// category axis, so it is preserved exactly as the backend returned it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Creates an empty table with the given columns.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Creates a table from rows, rejecting any row whose width differs from the columns.
    pub fn with_rows<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self, VigilError> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Appends one row.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), VigilError> {
        if row.len() != self.columns.len() {
            return Err(VigilError::RowWidth {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no rows (columns may still be known).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates the cells of one column, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// A column is numeric when it has at least one number and nothing but numbers or nulls.
    pub fn is_numeric_column(&self, index: usize) -> bool {
        if index >= self.columns.len() {
            return false;
        }
        let mut saw_number = false;
        for value in self.column_values(index) {
            match value {
                Value::Integer(_) | Value::Real(_) => saw_number = true,
                Value::Null => {}
                _ => return false,
            }
        }
        saw_number
    }

    /// Iterates rows as name-addressable records.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        self.rows.iter().map(move |values| Record {
            columns: &self.columns,
            values,
        })
    }
}

/// A borrowed view of one table row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> Record<'a> {
    /// Looks up a cell by column name.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
    }

    /// Iterates `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        let columns = self.columns;
        let values = self.values;
        columns.iter().map(String::as_str).zip(values.iter())
    }
}

// --- Questions and routing ---

/// The analysis context a caller selects alongside a question.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum TopicContext {
    General,
    Incidents,
    Users,
    Vulnerabilities,
    Threats,
    Trends,
}

impl TopicContext {
    /// All contexts in display order.
    pub const ALL: [TopicContext; 6] = [
        TopicContext::General,
        TopicContext::Incidents,
        TopicContext::Users,
        TopicContext::Vulnerabilities,
        TopicContext::Threats,
        TopicContext::Trends,
    ];

    /// The fallback route this context points at, if any.
    pub fn route(self) -> Option<Route> {
        match self {
            TopicContext::Incidents => Some(Route::Incidents),
            TopicContext::Users => Some(Route::Users),
            TopicContext::Vulnerabilities => Some(Route::Vulnerabilities),
            TopicContext::Threats => Some(Route::Threats),
            TopicContext::General | TopicContext::Trends => None,
        }
    }
}

/// A submitted natural-language question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    text: String,
    context: Option<TopicContext>,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: None,
        }
    }

    /// Attaches the caller-selected topic context.
    pub fn with_context(mut self, context: TopicContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn context(&self) -> Option<TopicContext> {
        self.context
    }
}

/// Topic classification used to pick a fallback query.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Incidents,
    Users,
    Threats,
    Vulnerabilities,
    General,
}

/// Preferred visualization shape for a response's rows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum ChartHint {
    Bar,
    Line,
    Pie,
    Heatmap,
    Table,
}

// --- Remote analyst ---

/// A request forwarded to the remote analyst.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalystRequest {
    /// The question text as the user typed it.
    pub question: String,
    /// Caller-selected analysis context.
    pub context: Option<TopicContext>,
    /// Session-scoped semantic model reference.
    pub semantic_model: Option<String>,
}

/// One typed unit of a remote analyst answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    Suggestions { suggestions: Vec<String> },
    Sql { statement: String },
}

// --- Responses ---

/// Why a response failed, in a form callers can match on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum ErrorReason {
    /// The fallback or analyst-generated query failed to execute.
    BackendError,
    /// The question maps to no canonical query.
    NoFallbackForRoute,
}

/// User-visible failure carried by a [`Response`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseError {
    pub reason: ErrorReason,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Rows(Table),
    Error(ResponseError),
}

/// The pipeline's normalized output.
///
/// A response either carries rows (succeeded) or an error (failed), never both.
/// The two constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    outcome: Outcome,
    generated_query: String,
    explanation: String,
    chart_hint: ChartHint,
}

impl Response {
    /// A successful response. `rows` may be empty.
    pub fn success(
        rows: Table,
        generated_query: impl Into<String>,
        explanation: impl Into<String>,
        chart_hint: ChartHint,
    ) -> Self {
        Self {
            outcome: Outcome::Rows(rows),
            generated_query: generated_query.into(),
            explanation: explanation.into(),
            chart_hint,
        }
    }

    /// A failed response. Renders as a table so every response stays renderable.
    pub fn failure(reason: ErrorReason, message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Error(ResponseError {
                reason,
                message: message.into(),
            }),
            generated_query: String::new(),
            explanation: String::new(),
            chart_hint: ChartHint::Table,
        }
    }

    /// Records the query that was attempted, for display in the query panel.
    pub fn with_generated_query(mut self, query: impl Into<String>) -> Self {
        self.generated_query = query.into();
        self
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, Outcome::Rows(_))
    }

    pub fn rows(&self) -> Option<&Table> {
        match &self.outcome {
            Outcome::Rows(t) => Some(t),
            Outcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ResponseError> {
        match &self.outcome {
            Outcome::Rows(_) => None,
            Outcome::Error(e) => Some(e),
        }
    }

    pub fn generated_query(&self) -> &str {
        &self.generated_query
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn chart_hint(&self) -> ChartHint {
        self.chart_hint
    }
}

#[derive(Serialize)]
struct ResponseWire<'a> {
    succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<&'a Table>,
    generated_query: &'a str,
    explanation: &'a str,
    chart_hint: ChartHint,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a ResponseError>,
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ResponseWire {
            succeeded: self.succeeded(),
            rows: self.rows(),
            generated_query: &self.generated_query,
            explanation: &self.explanation,
            chart_hint: self.chart_hint,
            error: self.error(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample() -> Table {
        Table::with_rows(
            ["severity", "incident_count"],
            vec![
                vec!["critical".into(), 3.into()],
                vec!["high".into(), Value::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn table_rejects_ragged_rows() {
        let mut t = Table::new(["a", "b"]);
        let err = t.push_row(vec![1.into()]).unwrap_err();
        assert!(matches!(err, VigilError::RowWidth { expected: 2, found: 1 }));
    }

    #[test]
    fn numeric_column_ignores_nulls() {
        let t = sample();
        assert!(!t.is_numeric_column(0));
        assert!(t.is_numeric_column(1));
        assert!(!t.is_numeric_column(7));
    }

    #[test]
    fn all_null_column_is_not_numeric() {
        let t = Table::with_rows(["x"], vec![vec![Value::Null]]).unwrap();
        assert!(!t.is_numeric_column(0));
    }

    #[test]
    fn records_address_by_name() {
        let t = sample();
        let first = t.records().next().unwrap();
        assert_eq!(first.get("severity"), Some(&Value::Text("critical".into())));
        assert_eq!(first.get("missing"), None);
        let names: Vec<&str> = first.iter().map(|(c, _)| c).collect();
        assert_eq!(names, vec!["severity", "incident_count"]);
    }

    #[test]
    fn success_response_has_rows_and_no_error() {
        let r = Response::success(sample(), "SELECT 1", "ok", ChartHint::Bar);
        assert!(r.succeeded());
        assert!(r.rows().is_some());
        assert!(r.error().is_none());
    }

    #[test]
    fn failure_response_has_error_and_no_rows() {
        let r = Response::failure(ErrorReason::BackendError, "boom").with_generated_query("SELECT x");
        assert!(!r.succeeded());
        assert!(r.rows().is_none());
        assert_eq!(r.error().unwrap().reason, ErrorReason::BackendError);
        assert_eq!(r.generated_query(), "SELECT x");
        assert_eq!(r.chart_hint(), ChartHint::Table);
    }

    #[test]
    fn response_serializes_flat() {
        let r = Response::failure(ErrorReason::NoFallbackForRoute, "try incidents");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["succeeded"], false);
        assert_eq!(json["error"]["reason"], "NoFallbackForRoute");
        assert!(json.get("rows").is_none());

        let r = Response::success(sample(), "", "", ChartHint::Pie);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["succeeded"], true);
        assert_eq!(json["chart_hint"], "pie");
        assert_eq!(json["rows"]["columns"][1], "incident_count");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn context_maps_to_route() {
        assert_eq!(TopicContext::Users.route(), Some(Route::Users));
        assert_eq!(TopicContext::Trends.route(), None);
        assert_eq!(TopicContext::General.route(), None);
    }

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!(TopicContext::from_str("Threats").unwrap(), TopicContext::Threats);
        assert_eq!(ChartHint::from_str("heatmap").unwrap(), ChartHint::Heatmap);
        assert_eq!(Route::Vulnerabilities.to_string(), "vulnerabilities");
    }

    #[test]
    fn content_block_wire_shape() {
        let block: ContentBlock =
            serde_json::from_str(r#"{"type":"sql","statement":"SELECT 1"}"#).unwrap();
        assert_eq!(
            block,
            ContentBlock::Sql {
                statement: "SELECT 1".into()
            }
        );
    }

    #[test]
    fn json_scalars_convert_to_cells() {
        assert_eq!(Value::from_json(&serde_json::json!(4)), Value::Integer(4));
        assert_eq!(Value::from_json(&serde_json::json!(4.5)), Value::Real(4.5));
        assert_eq!(Value::from_json(&serde_json::json!(null)), Value::Null);
        assert_eq!(
            Value::from_json(&serde_json::json!([1, 2])),
            Value::Text("[1,2]".into())
        );
    }

    proptest::proptest! {
        #[test]
        fn response_is_never_ambiguous(ok in proptest::bool::ANY, msg in ".{0,20}") {
            let r = if ok {
                Response::success(Table::default(), "", msg.clone(), ChartHint::Table)
            } else {
                Response::failure(ErrorReason::BackendError, msg.clone())
            };
            proptest::prop_assert_eq!(r.succeeded(), r.rows().is_some());
            proptest::prop_assert_eq!(!r.succeeded(), r.error().is_some());
        }
    }
}
