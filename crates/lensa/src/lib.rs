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

pub mod aggregator;
pub mod classifier;
pub mod columns;
pub mod config;
pub mod error;
pub mod format;
pub mod ingest;
pub mod interpretation;
pub mod record;
pub mod selector;
pub mod statistics;

pub use aggregator::{build_series, ChartSeries, SeriesBuilder};
pub use classifier::{
    classify, ColumnClassifier, ColumnKind, ColumnProfile, DatasetAnalysis, NumericMeta,
};
pub use columns::AvailableColumns;
pub use config::{ClassifierConfig, EngineConfig, IdentifierMatch, NumberLocale};
pub use error::{ConfigError, DataError, LensaError, Result};
pub use format::format_number;
pub use interpretation::{interpret, Interpreter, Variation, NO_DATA_MESSAGE};
pub use record::{Record, Value, UNKNOWN_LABEL};
pub use selector::{select_chart_type, ChartType, ChartTypeRequest, ChartTypeSelector};
pub use statistics::{compute_statistics, Statistics, StatisticsEngine};
use serde::{Deserialize, Serialize};

/// Everything a renderer and statistics panel need for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartReport {
    pub x_column: String,
    pub y_column: String,
    pub chart_type: ChartType,
    pub series: ChartSeries,
    pub statistics: Option<Statistics>,
    pub interpretation: String,
}

/// Entry point owning the configuration; every call recomputes from the records it is given.
pub struct ChartAdvisor {
    config: EngineConfig,
    classifier: ColumnClassifier,
    selector: ChartTypeSelector,
}
impl ChartAdvisor {
    pub fn new() -> Self {
        Self::from_parts(EngineConfig::default())
    }
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }
    fn from_parts(config: EngineConfig) -> Self {
        Self {
            classifier: ColumnClassifier::with_config(config.classifier.clone()),
            selector: ChartTypeSelector::with_pie_max_categories(config.pie_max_categories),
            config,
        }
    }
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
    pub fn analyse(&self, records: &[Record]) -> DatasetAnalysis {
        self.classifier.classify(records)
    }
    pub fn available_columns(&self, records: &[Record]) -> AvailableColumns {
        AvailableColumns::from_analysis(&self.analyse(records))
    }
    pub fn select_chart_type(
        &self,
        records: &[Record],
        x_column: &str,
        y_column: &str,
        analysis: &DatasetAnalysis,
    ) -> ChartType {
        self.selector.select(records, x_column, y_column, analysis)
    }
    pub fn build_series(&self, records: &[Record], x_column: &str, y_column: &str) -> ChartSeries {
        SeriesBuilder::new(&self.classifier).build(records, x_column, y_column)
    }
    pub fn compute_statistics(
        &self,
        records: &[Record],
        x_column: &str,
        y_column: &str,
        request: ChartTypeRequest,
    ) -> Option<Statistics> {
        StatisticsEngine::new(&self.classifier, &self.selector, self.config.locale)
            .compute(records, x_column, y_column, request)
    }
    pub fn interpret(
        &self,
        statistics: Option<&Statistics>,
        records: &[Record],
        x_column: &str,
        y_column: &str,
    ) -> String {
        Interpreter::new(&self.classifier, self.config.locale)
            .interpret(statistics, records, x_column, y_column)
    }
    pub fn basic_summary(&self, records: &[Record]) -> String {
        Interpreter::new(&self.classifier, self.config.locale).basic_summary(records)
    }
    /// Runs the full pass for one selection. Missing axes fall back to the recommended
    /// columns; `None` means there is nothing to chart (no records, or only identifiers).
    pub fn report(
        &self,
        records: &[Record],
        x_column: Option<&str>,
        y_column: Option<&str>,
        request: ChartTypeRequest,
    ) -> Option<ChartReport> {
        if records.is_empty() {
            tracing::info!("no records to report on");
            return None;
        }
        let analysis = self.analyse(records);
        let x_column = x_column
            .map(str::to_string)
            .or_else(|| analysis.best_x_column.clone())?;
        let y_column = y_column
            .map(str::to_string)
            .or_else(|| analysis.best_y_column.clone())?;
        let chart_type = self
            .selector
            .resolve(request, records, &x_column, &y_column, &analysis);
        let series = self.build_series(records, &x_column, &y_column);
        let statistics = self.compute_statistics(records, &x_column, &y_column, chart_type.into());
        let interpretation = self.interpret(statistics.as_ref(), records, &x_column, &y_column);
        tracing::info!(
            x = %x_column,
            y = %y_column,
            chart = %chart_type,
            points = series.len(),
            "chart report assembled"
        );
        Some(ChartReport {
            x_column,
            y_column,
            chart_type,
            series,
            statistics,
            interpretation,
        })
    }
}
impl Default for ChartAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_uses_recommended_axes() {
        let data = ingest::records_from_json_str(
            r#"[{"tahun":"2021","jumlah":3},{"tahun":"2020","jumlah":4}]"#,
        )
        .unwrap();
        let report = ChartAdvisor::new()
            .report(&data, None, None, ChartTypeRequest::Auto)
            .unwrap();
        assert_eq!(report.x_column, "tahun");
        assert_eq!(report.y_column, "jumlah");
        assert_eq!(report.chart_type, ChartType::Line);
        assert_eq!(report.series.labels, ["2020", "2021"]);
        assert_eq!(report.statistics.unwrap().chart_type, ChartType::Line);
    }

    #[test]
    fn report_honours_pinned_chart_type() {
        let data = ingest::records_from_json_str(r#"[{"kota":"A","jumlah":3}]"#).unwrap();
        let report = ChartAdvisor::new()
            .report(&data, Some("kota"), Some("jumlah"), ChartTypeRequest::Bar)
            .unwrap();
        assert_eq!(report.chart_type, ChartType::Bar);
        assert!(report.interpretation.contains("Bar Chart"));
    }

    #[test]
    fn report_needs_records_and_axes() {
        let advisor = ChartAdvisor::new();
        assert!(advisor.report(&[], None, None, ChartTypeRequest::Auto).is_none());
        let ids = ingest::records_from_json_str(r#"[{"_id":1}]"#).unwrap();
        assert!(advisor.report(&ids, None, None, ChartTypeRequest::Auto).is_none());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = EngineConfig::default();
        config.classifier.sample_size = 0;
        assert!(ChartAdvisor::with_config(config).is_err());
    }

    #[test]
    fn locale_flows_into_statistics() {
        let config = EngineConfig {
            locale: NumberLocale::en_us(),
            ..Default::default()
        };
        let advisor = ChartAdvisor::with_config(config).unwrap();
        let data = ingest::records_from_json_str(r#"[{"kota":"A","jumlah":1234.5}]"#).unwrap();
        let stats = advisor
            .compute_statistics(&data, "kota", "jumlah", ChartTypeRequest::Auto)
            .unwrap();
        assert_eq!(stats.top_category, "A (1,234.50)");
    }
}
