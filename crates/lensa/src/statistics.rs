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

use crate::aggregator::{group_counts, group_sums};
use crate::classifier::{ColumnClassifier, ColumnKind};
use crate::config::NumberLocale;
use crate::format::{format_number, MISSING_PLACEHOLDER};
use crate::record::{coerced_number, column_names, Record};
use crate::selector::{ChartType, ChartTypeRequest, ChartTypeSelector};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_records: usize,
    pub total_columns: usize,
    pub chart_type: ChartType,
    pub x_column: String,
    pub y_column: String,
    pub max_value: f64,
    pub min_value: f64,
    pub avg_value: f64,
    pub sum_value: f64,
    pub data_range: f64,
    /// `"<label> (<value>)"` for the largest group.
    pub top_category: String,
    pub category_count: usize,
}
impl Statistics {
    /// The top category's label without its trailing parenthetical.
    pub fn top_category_label(&self) -> &str {
        self.top_category
            .rsplit_once(" (")
            .map_or(self.top_category.as_str(), |(label, _)| label)
    }
}

/// First entry with the largest value; later ties lose.
fn top_entry<V: Copy + PartialOrd>(groups: &IndexMap<String, V>) -> Option<(&str, V)> {
    groups.iter().fold(None, |best, (label, value)| match best {
        Some((_, top)) if *value <= top => best,
        _ => Some((label.as_str(), *value)),
    })
}

struct Summary {
    max: f64,
    min: f64,
    avg: f64,
    sum: f64,
}
fn summarise(values: &[f64]) -> Summary {
    let sum: f64 = values.iter().sum();
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    Summary {
        max,
        min,
        avg: sum / values.len() as f64,
        sum,
    }
}

pub struct StatisticsEngine<'a> {
    classifier: &'a ColumnClassifier,
    selector: &'a ChartTypeSelector,
    locale: NumberLocale,
}
impl<'a> StatisticsEngine<'a> {
    pub fn new(
        classifier: &'a ColumnClassifier,
        selector: &'a ChartTypeSelector,
        locale: NumberLocale,
    ) -> Self {
        Self {
            classifier,
            selector,
            locale,
        }
    }
    /// Summary statistics for the chosen axes; `None` when there are no records.
    pub fn compute(
        &self,
        records: &[Record],
        x_column: &str,
        y_column: &str,
        request: ChartTypeRequest,
    ) -> Option<Statistics> {
        if records.is_empty() {
            tracing::warn!("statistics requested for an empty dataset");
            return None;
        }
        let analysis = self.classifier.classify(records);
        let chart_type = self
            .selector
            .resolve(request, records, x_column, y_column, &analysis);
        let total_records = records.len();
        let total_columns = column_names(records).len();

        let (summary, top_category, category_count) =
            if analysis.is_kind(y_column, ColumnKind::Numeric) {
                let values: Vec<f64> = records
                    .iter()
                    .map(|record| coerced_number(record, y_column))
                    .collect();
                let groups = group_sums(records, x_column, y_column);
                let top = top_entry(&groups).map_or_else(
                    || MISSING_PLACEHOLDER.to_string(),
                    |(label, sum)| format!("{label} ({})", format_number(Some(sum), &self.locale)),
                );
                (summarise(&values), top, groups.len())
            } else {
                let groups = group_counts(records, x_column);
                let counts: Vec<f64> = groups.values().map(|c| *c as f64).collect();
                let top = top_entry(&groups).map_or_else(
                    || MISSING_PLACEHOLDER.to_string(),
                    |(label, count)| format!("{label} ({count} data)"),
                );
                let summary = Summary {
                    sum: total_records as f64,
                    ..summarise(&counts)
                };
                (summary, top, groups.len())
            };

        tracing::debug!(
            x_column,
            y_column,
            chart = %chart_type,
            categories = category_count,
            "statistics computed"
        );
        Some(Statistics {
            total_records,
            total_columns,
            chart_type,
            x_column: x_column.to_string(),
            y_column: y_column.to_string(),
            max_value: summary.max,
            min_value: summary.min,
            avg_value: summary.avg,
            sum_value: summary.sum,
            data_range: summary.max - summary.min,
            top_category,
            category_count,
        })
    }
}

pub fn compute_statistics(
    records: &[Record],
    x_column: &str,
    y_column: &str,
    request: ChartTypeRequest,
) -> Option<Statistics> {
    let classifier = ColumnClassifier::new();
    let selector = ChartTypeSelector::new();
    StatisticsEngine::new(&classifier, &selector, NumberLocale::default())
        .compute(records, x_column, y_column, request)
}
