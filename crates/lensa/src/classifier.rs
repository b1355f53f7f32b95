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

//! Column classification for schemaless record arrays.
//!
//! Every column lands in exactly one [`ColumnKind`]. Name rules are tried first, in the order
//! of [`NAME_RULES`]; columns no rule claims are sampled to decide between numeric and
//! categorical.

use crate::config::{ClassifierConfig, IdentifierMatch};
use crate::record::{column_names, Record, Value};
use crate::selector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ColumnKind {
    Identifier,
    Date,
    Numeric,
    Categorical,
}
impl ColumnKind {
    pub fn is_identifier(&self) -> bool {
        matches!(self, ColumnKind::Identifier)
    }
    pub fn is_date(&self) -> bool {
        matches!(self, ColumnKind::Date)
    }
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric)
    }
    pub fn is_categorical(&self) -> bool {
        matches!(self, ColumnKind::Categorical)
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericMeta {
    pub has_decimals: bool,
    pub min: f64,
    pub max: f64,
}
impl NumericMeta {
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_meta: Option<NumericMeta>,
}
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatasetAnalysis {
    pub profiles: Vec<ColumnProfile>,
    pub best_x_column: Option<String>,
    pub best_y_column: Option<String>,
}
impl DatasetAnalysis {
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
    pub fn profile(&self, column: &str) -> Option<&ColumnProfile> {
        self.profiles.iter().find(|p| p.name == column)
    }
    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        self.profile(column).map(|p| p.kind)
    }
    pub fn is_kind(&self, column: &str, kind: ColumnKind) -> bool {
        self.kind_of(column) == Some(kind)
    }
    /// Profiles of one kind, in column order.
    pub fn profiles_of(&self, kind: ColumnKind) -> impl Iterator<Item = &ColumnProfile> {
        self.profiles.iter().filter(move |p| p.kind == kind)
    }
    pub fn columns_of(&self, kind: ColumnKind) -> Vec<&str> {
        self.profiles_of(kind).map(|p| p.name.as_str()).collect()
    }
    pub fn column_names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }
    pub fn count_of(&self, kind: ColumnKind) -> usize {
        self.profiles_of(kind).count()
    }
}

/// How a rule's keywords are compared against a lower-cased column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordMatch {
    Contains,
    /// Follows [`ClassifierConfig::identifier_match`].
    IdentifierPolicy,
}
#[derive(Debug, Clone, Copy)]
pub struct NameRule {
    pub kind: ColumnKind,
    pub keywords: &'static [&'static str],
    pub exact: &'static [&'static str],
    pub matching: KeywordMatch,
}
impl NameRule {
    pub fn matches(&self, column: &str, identifier_match: IdentifierMatch) -> bool {
        let lower = column.to_lowercase();
        if self.exact.contains(&lower.as_str()) {
            return true;
        }
        self.keywords.iter().any(|kw| match self.matching {
            KeywordMatch::Contains => lower.contains(kw),
            KeywordMatch::IdentifierPolicy => match identifier_match {
                IdentifierMatch::Substring => lower.contains(kw),
                IdentifierMatch::Suffix => lower.ends_with(kw),
            },
        })
    }
}

/// Name rules in priority order; the first match decides the kind.
pub const NAME_RULES: &[NameRule] = &[
    NameRule {
        kind: ColumnKind::Identifier,
        keywords: &["id"],
        exact: &["_id"],
        matching: KeywordMatch::IdentifierPolicy,
    },
    NameRule {
        kind: ColumnKind::Date,
        keywords: &["tahun", "year", "tanggal"],
        exact: &[],
        matching: KeywordMatch::Contains,
    },
];

pub fn match_name_rule(column: &str, identifier_match: IdentifierMatch) -> Option<ColumnKind> {
    NAME_RULES
        .iter()
        .find(|rule| rule.matches(column, identifier_match))
        .map(|rule| rule.kind)
}

pub struct ColumnClassifier {
    config: ClassifierConfig,
}
impl ColumnClassifier {
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
        }
    }
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
    /// Classifies every column of `records`. Empty input yields an empty analysis.
    pub fn classify(&self, records: &[Record]) -> DatasetAnalysis {
        if records.is_empty() {
            tracing::warn!("classify called with no records");
            return DatasetAnalysis::default();
        }
        let profiles: Vec<ColumnProfile> = column_names(records)
            .into_iter()
            .map(|column| self.profile_column(records, column))
            .collect();
        let mut analysis = DatasetAnalysis {
            profiles,
            best_x_column: None,
            best_y_column: None,
        };
        analysis.best_x_column = selector::best_x_column(&analysis);
        analysis.best_y_column =
            selector::best_y_column(&analysis, analysis.best_x_column.as_deref());
        tracing::debug!(
            columns = analysis.profiles.len(),
            best_x = ?analysis.best_x_column,
            best_y = ?analysis.best_y_column,
            "dataset classified"
        );
        analysis
    }
    fn profile_column(&self, records: &[Record], column: &str) -> ColumnProfile {
        let (kind, numeric_meta) =
            match match_name_rule(column, self.config.identifier_match) {
                Some(kind) => (kind, None),
                None => match self.sample_numeric(records, column) {
                    Some(meta) => (ColumnKind::Numeric, Some(meta)),
                    None => (ColumnKind::Categorical, None),
                },
            };
        tracing::debug!(column, kind = ?kind, "column classified");
        ColumnProfile {
            name: column.to_string(),
            kind,
            numeric_meta,
        }
    }
    /// Numeric metadata when enough of the sampled rows parse as finite numbers.
    fn sample_numeric(&self, records: &[Record], column: &str) -> Option<NumericMeta> {
        let sample: Vec<Option<&Value>> = records
            .iter()
            .take(self.config.sample_size)
            .map(|record| record.get(column))
            .collect();
        let numbers: Vec<f64> = sample
            .iter()
            .filter_map(|value| value.and_then(Value::as_number))
            .collect();
        if numbers.is_empty()
            || (numbers.len() as f64) < sample.len() as f64 * self.config.numeric_threshold
        {
            return None;
        }
        let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
        let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(NumericMeta {
            has_decimals: numbers.iter().any(|v| v.fract() != 0.0),
            min,
            max,
        })
    }
}
impl Default for ColumnClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classifies with the default configuration.
pub fn classify(records: &[Record]) -> DatasetAnalysis {
    ColumnClassifier::new().classify(records)
}
