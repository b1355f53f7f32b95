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

use crate::classifier::{ColumnKind, ColumnProfile, DatasetAnalysis};
use crate::error::ConfigError;
use crate::record::{Record, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Column names preferred for the X axis among categorical columns.
pub const PREFERRED_X_KEYWORDS: &[&str] = &["kabupaten", "kota", "wilayah", "nama"];
/// Column names that read as regions, drawn as a pie when there are few of them.
pub const REGION_KEYWORDS: &[&str] = &["kabupaten", "kota", "wilayah"];
pub const DEFAULT_PIE_MAX_CATEGORIES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Pie,
}
impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Pie => "pie",
        }
    }
    pub fn display_name(&self) -> &'static str {
        match self {
            ChartType::Line => "Line Chart",
            ChartType::Bar => "Bar Chart",
            ChartType::Pie => "Pie Chart",
        }
    }
}
impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
/// The chart family a caller asks for; `Auto` defers to [`select_chart_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartTypeRequest {
    #[default]
    Auto,
    Line,
    Bar,
    Pie,
}
impl ChartTypeRequest {
    pub fn pinned(&self) -> Option<ChartType> {
        match self {
            ChartTypeRequest::Auto => None,
            ChartTypeRequest::Line => Some(ChartType::Line),
            ChartTypeRequest::Bar => Some(ChartType::Bar),
            ChartTypeRequest::Pie => Some(ChartType::Pie),
        }
    }
}
impl From<ChartType> for ChartTypeRequest {
    fn from(chart_type: ChartType) -> Self {
        match chart_type {
            ChartType::Line => ChartTypeRequest::Line,
            ChartType::Bar => ChartTypeRequest::Bar,
            ChartType::Pie => ChartTypeRequest::Pie,
        }
    }
}
impl FromStr for ChartTypeRequest {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(ChartTypeRequest::Auto),
            "line" => Ok(ChartTypeRequest::Line),
            "bar" => Ok(ChartTypeRequest::Bar),
            "pie" => Ok(ChartTypeRequest::Pie),
            _ => Err(ConfigError::UnknownChartType {
                value: s.to_string(),
            }),
        }
    }
}

fn name_contains_any(column: &str, keywords: &[&str]) -> bool {
    let lower = column.to_lowercase();
    keywords.iter().any(|kw| lower.contains(kw))
}

fn non_identifier_columns(analysis: &DatasetAnalysis) -> Vec<&str> {
    analysis
        .profiles
        .iter()
        .filter(|p| !p.kind.is_identifier())
        .map(|p| p.name.as_str())
        .collect()
}

/// Default X column: first date, then a region-like categorical, then any categorical,
/// then the first numeric, then the first non-identifier column.
pub fn best_x_column(analysis: &DatasetAnalysis) -> Option<String> {
    if let Some(date) = analysis.profiles_of(ColumnKind::Date).next() {
        return Some(date.name.clone());
    }
    let categorical = analysis.columns_of(ColumnKind::Categorical);
    if let Some(first) = categorical.first() {
        let preferred = categorical
            .iter()
            .find(|c| name_contains_any(c, PREFERRED_X_KEYWORDS))
            .unwrap_or(first);
        return Some((*preferred).to_string());
    }
    if let Some(numeric) = analysis.profiles_of(ColumnKind::Numeric).next() {
        return Some(numeric.name.clone());
    }
    non_identifier_columns(analysis)
        .first()
        .map(|c| (*c).to_string())
}

/// Default Y column: a numeric column with a non-zero range whose name avoids `id`, then
/// any numeric, then the first categorical, then the second (or only) non-identifier column.
///
/// Candidates equal to `x_column` are passed over while any other candidate remains.
pub fn best_y_column(analysis: &DatasetAnalysis, x_column: Option<&str>) -> Option<String> {
    let (meaningful, plain): (Vec<&ColumnProfile>, Vec<&ColumnProfile>) =
        analysis.profiles_of(ColumnKind::Numeric).partition(|p| {
            !p.name.to_lowercase().contains("id")
                && p.numeric_meta.is_some_and(|m| m.range() > 0.0)
        });
    let mut candidates: Vec<&str> = meaningful
        .iter()
        .chain(plain.iter())
        .map(|p| p.name.as_str())
        .collect();
    candidates.extend(analysis.columns_of(ColumnKind::Categorical));
    if candidates.is_empty() {
        let rest = non_identifier_columns(analysis);
        candidates.extend(rest.get(1));
        candidates.extend(rest.iter().enumerate().filter(|(i, _)| *i != 1).map(|(_, c)| *c));
    }
    candidates
        .iter()
        .find(|c| Some(**c) != x_column)
        .or_else(|| candidates.first())
        .map(|c| (*c).to_string())
}

fn distinct_values(records: &[Record], column: &str) -> usize {
    records
        .iter()
        .map(|record| match record.get(column) {
            None => "undefined".to_string(),
            Some(Value::Null) => "null".to_string(),
            Some(Value::Text(s)) => format!("s:{s}"),
            Some(Value::Number(n)) => format!("n:{n}"),
            Some(Value::Bool(b)) => format!("b:{b}"),
        })
        .collect::<HashSet<_>>()
        .len()
}

pub struct ChartTypeSelector {
    pie_max_categories: usize,
}
impl ChartTypeSelector {
    pub fn new() -> Self {
        Self {
            pie_max_categories: DEFAULT_PIE_MAX_CATEGORIES,
        }
    }
    pub fn with_pie_max_categories(pie_max_categories: usize) -> Self {
        Self { pie_max_categories }
    }
    pub fn select(
        &self,
        records: &[Record],
        x_column: &str,
        y_column: &str,
        analysis: &DatasetAnalysis,
    ) -> ChartType {
        let x_kind = analysis.kind_of(x_column);
        let y_numeric = analysis.is_kind(y_column, ColumnKind::Numeric);
        let chart_type = match x_kind {
            Some(ColumnKind::Date) if y_numeric => ChartType::Line,
            Some(ColumnKind::Categorical) if y_numeric => {
                let categories = distinct_values(records, x_column);
                if categories <= self.pie_max_categories
                    && name_contains_any(x_column, REGION_KEYWORDS)
                {
                    ChartType::Pie
                } else {
                    ChartType::Bar
                }
            }
            _ => ChartType::Bar,
        };
        tracing::debug!(x_column, y_column, chart = %chart_type, "chart type selected");
        chart_type
    }
    /// Resolves a request, consulting the rules only for `Auto`.
    pub fn resolve(
        &self,
        request: ChartTypeRequest,
        records: &[Record],
        x_column: &str,
        y_column: &str,
        analysis: &DatasetAnalysis,
    ) -> ChartType {
        request
            .pinned()
            .unwrap_or_else(|| self.select(records, x_column, y_column, analysis))
    }
}
impl Default for ChartTypeSelector {
    fn default() -> Self {
        Self::new()
    }
}

pub fn select_chart_type(
    records: &[Record],
    x_column: &str,
    y_column: &str,
    analysis: &DatasetAnalysis,
) -> ChartType {
    ChartTypeSelector::new().select(records, x_column, y_column, analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::ingest::records_from_json_str;

    fn records(json: &str) -> Vec<Record> {
        records_from_json_str(json).unwrap()
    }

    #[test]
    fn date_and_numeric_make_a_line() {
        let data = records(r#"[{"tahun":"2021","jumlah":3},{"tahun":"2020","jumlah":4}]"#);
        let analysis = classify(&data);
        assert_eq!(analysis.best_x_column.as_deref(), Some("tahun"));
        assert_eq!(
            select_chart_type(&data, "tahun", "jumlah", &analysis),
            ChartType::Line
        );
    }

    #[test]
    fn few_regions_make_a_pie() {
        let data = records(r#"[{"kota":"A","jumlah":1},{"kota":"B","jumlah":2}]"#);
        let analysis = classify(&data);
        assert_eq!(select_chart_type(&data, "kota", "jumlah", &analysis), ChartType::Pie);
    }

    #[test]
    fn many_regions_or_other_names_make_a_bar() {
        let rows: Vec<String> = (0..9)
            .map(|i| format!(r#"{{"wilayah":"W{i}","jumlah":{i}}}"#))
            .collect();
        let data = records(&format!("[{}]", rows.join(",")));
        let analysis = classify(&data);
        assert_eq!(select_chart_type(&data, "wilayah", "jumlah", &analysis), ChartType::Bar);

        let narrow = ChartTypeSelector::with_pie_max_categories(9);
        assert_eq!(narrow.select(&data, "wilayah", "jumlah", &analysis), ChartType::Pie);

        let data = records(r#"[{"jenis":"A","jumlah":1},{"jenis":"B","jumlah":2}]"#);
        let analysis = classify(&data);
        assert_eq!(select_chart_type(&data, "jenis", "jumlah", &analysis), ChartType::Bar);
    }

    #[test]
    fn categorical_y_defaults_to_bar() {
        let data = records(r#"[{"kota":"A","jenis":"x"},{"kota":"B","jenis":"y"}]"#);
        let analysis = classify(&data);
        assert_eq!(select_chart_type(&data, "kota", "jenis", &analysis), ChartType::Bar);
        assert_eq!(select_chart_type(&data, "missing", "jenis", &analysis), ChartType::Bar);
    }

    #[test]
    fn pinned_requests_skip_the_rules() {
        let data = records(r#"[{"kota":"A","jumlah":1}]"#);
        let analysis = classify(&data);
        let selector = ChartTypeSelector::new();
        assert_eq!(
            selector.resolve(ChartTypeRequest::Line, &data, "kota", "jumlah", &analysis),
            ChartType::Line
        );
        assert_eq!(
            selector.resolve(ChartTypeRequest::Auto, &data, "kota", "jumlah", &analysis),
            ChartType::Pie
        );
    }

    #[test]
    fn request_parsing() {
        assert_eq!("AUTO".parse::<ChartTypeRequest>().unwrap(), ChartTypeRequest::Auto);
        assert_eq!(" pie ".parse::<ChartTypeRequest>().unwrap(), ChartTypeRequest::Pie);
        assert!("scatter".parse::<ChartTypeRequest>().is_err());
    }

    #[test]
    fn region_names_are_preferred_for_x() {
        let data = records(r#"[{"jenis":"a","nama_kabupaten":"b","jumlah":1}]"#);
        let analysis = classify(&data);
        assert_eq!(analysis.best_x_column.as_deref(), Some("nama_kabupaten"));
    }

    #[test]
    fn y_prefers_numeric_with_spread() {
        let data = records(r#"[{"a":"k","tetap":5,"nilai":1},{"a":"l","tetap":5,"nilai":9}]"#);
        let analysis = classify(&data);
        assert_eq!(analysis.best_y_column.as_deref(), Some("nilai"));

        let data = records(r#"[{"a":"k","tetap":5},{"a":"l","tetap":5}]"#);
        assert_eq!(classify(&data).best_y_column.as_deref(), Some("tetap"));
    }

    #[test]
    fn fallbacks_never_pick_identifiers() {
        let data = records(r#"[{"_id":1,"kode_id":"x"}]"#);
        let analysis = classify(&data);
        assert!(analysis.best_x_column.is_none());
        assert!(analysis.best_y_column.is_none());

        let data = records(r#"[{"tahun":"2020","_id":1}]"#);
        let analysis = classify(&data);
        assert_eq!(analysis.best_x_column.as_deref(), Some("tahun"));
        assert_eq!(analysis.best_y_column.as_deref(), Some("tahun"));

        let data = records(r#"[{"tahun":"2020","tanggal":"2020-01-01","_id":1}]"#);
        let analysis = classify(&data);
        assert_eq!(analysis.best_y_column.as_deref(), Some("tanggal"));
    }

    #[test]
    fn numeric_only_dataset_uses_numeric_x() {
        let data = records(r#"[{"a":1,"b":2},{"a":3,"b":5}]"#);
        let analysis = classify(&data);
        assert_eq!(analysis.best_x_column.as_deref(), Some("a"));
        assert_eq!(analysis.best_y_column.as_deref(), Some("b"));
    }

    #[test]
    fn y_avoids_x_while_alternatives_exist() {
        let data = records(r#"[{"kota":"A","jenis":"x"},{"kota":"B","jenis":"y"}]"#);
        let analysis = classify(&data);
        assert_eq!(analysis.best_x_column.as_deref(), Some("kota"));
        assert_eq!(analysis.best_y_column.as_deref(), Some("jenis"));

        let data = records(r#"[{"kota":"A"},{"kota":"B"}]"#);
        let analysis = classify(&data);
        assert_eq!(analysis.best_x_column.as_deref(), Some("kota"));
        assert_eq!(analysis.best_y_column.as_deref(), Some("kota"));
    }
}
