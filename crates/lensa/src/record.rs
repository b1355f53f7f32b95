// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Label used for rows whose grouping value is missing, null or empty.
pub const UNKNOWN_LABEL: &str = "Tidak Diketahui";

/// One row of a dataset. Key order is preserved so the first record defines column order.
pub type Record = IndexMap<String, Value>;

/// A scalar cell value as it arrives from the data source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

static LEADING_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").expect("valid float pattern")
});

/// Parses the longest numeric prefix of `text`, ignoring leading whitespace.
///
/// `"12.5 kg"` yields `12.5`, `"abc"` and `""` yield `None`. Results that overflow to an
/// infinity are rejected so callers only ever see finite numbers.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let caps = LEADING_FLOAT.captures(text)?;
    let parsed: f64 = caps.get(1)?.as_str().parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
    /// Finite numeric reading of the value, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::Text(s) => parse_leading_float(s),
            _ => None,
        }
    }
    /// Grouping label for the value; `None` for null and empty text.
    pub fn as_label(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(s) if s.is_empty() => None,
            Value::Text(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::Text(s),
            nested => Value::Text(nested.to_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

/// Column names in the key order of the first record.
pub fn column_names(records: &[Record]) -> Vec<&str> {
    records
        .first()
        .map(|first| first.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

/// Grouping label of `column` in `record`, with the unknown sentinel for absent values.
pub fn group_label(record: &Record, column: &str) -> String {
    record
        .get(column)
        .and_then(Value::as_label)
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

/// Numeric reading of `column` in `record`; anything unparsable counts as zero.
pub fn coerced_number(record: &Record, column: &str) -> f64 {
    record
        .get(column)
        .and_then(Value::as_number)
        .unwrap_or(0.0)
}
