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

use crate::classifier::{ColumnClassifier, ColumnKind};
use crate::record::{coerced_number, group_label, Record};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Index-aligned labels and values ready for plotting. Labels are unique.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}
impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}
impl FromIterator<(String, f64)> for ChartSeries {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let (labels, values) = iter.into_iter().unzip();
        Self { labels, values }
    }
}

/// Sum of the coerced `y_column` per `x_column` label, in first-seen label order.
pub(crate) fn group_sums(records: &[Record], x_column: &str, y_column: &str) -> IndexMap<String, f64> {
    let mut groups: IndexMap<String, f64> = IndexMap::new();
    for record in records {
        *groups.entry(group_label(record, x_column)).or_insert(0.0) +=
            coerced_number(record, y_column);
    }
    groups
}

/// Row count per `x_column` label, in first-seen label order.
pub(crate) fn group_counts(records: &[Record], x_column: &str) -> IndexMap<String, usize> {
    let mut groups: IndexMap<String, usize> = IndexMap::new();
    for record in records {
        *groups.entry(group_label(record, x_column)).or_insert(0) += 1;
    }
    groups
}

pub struct SeriesBuilder<'a> {
    classifier: &'a ColumnClassifier,
}
impl<'a> SeriesBuilder<'a> {
    pub fn new(classifier: &'a ColumnClassifier) -> Self {
        Self { classifier }
    }
    /// Groups rows by X. Numeric Y is summed per group, otherwise rows are counted.
    ///
    /// Date X columns are ordered by plain string comparison of their labels, so `"999"`
    /// sorts after `"2020"`.
    pub fn build(&self, records: &[Record], x_column: &str, y_column: &str) -> ChartSeries {
        if records.is_empty() {
            return ChartSeries::default();
        }
        let analysis = self.classifier.classify(records);
        if analysis.is_kind(y_column, ColumnKind::Numeric) {
            let mut pairs: Vec<(String, f64)> =
                group_sums(records, x_column, y_column).into_iter().collect();
            if analysis.is_kind(x_column, ColumnKind::Date) {
                pairs.sort_by(|a, b| a.0.cmp(&b.0));
            }
            tracing::debug!(x_column, y_column, groups = pairs.len(), "summed numeric series");
            pairs.into_iter().collect()
        } else {
            let series: ChartSeries = group_counts(records, x_column)
                .into_iter()
                .map(|(label, count)| (label, count as f64))
                .collect();
            tracing::debug!(x_column, y_column, groups = series.len(), "counted categorical series");
            series
        }
    }
}

pub fn build_series(records: &[Record], x_column: &str, y_column: &str) -> ChartSeries {
    let classifier = ColumnClassifier::new();
    SeriesBuilder::new(&classifier).build(records, x_column, y_column)
}
