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

//! Indonesian, HTML-flavoured narration of a [`Statistics`] snapshot.
//!
//! The markup carries the class names the statistics panel styles: `insight-highlight`,
//! `trend-positive`, `trend-negative` and `trend-neutral`.

use crate::classifier::{ColumnClassifier, ColumnKind};
use crate::config::NumberLocale;
use crate::format::format_number;
use crate::record::{column_names, Record};
use crate::selector::ChartType;
use crate::statistics::Statistics;

pub const NO_DATA_MESSAGE: &str = "Tidak ada data untuk dianalisis.";

/// How spread out a numeric Y column is relative to its mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variation {
    High,
    Uniform,
    Moderate,
}
impl Variation {
    /// Classifies `range / mean`. A negative mean gives a negative ratio and reads as uniform.
    /// A zero mean is uniform when the range is zero too and high otherwise.
    pub fn classify(data_range: f64, avg_value: f64) -> Self {
        if avg_value == 0.0 {
            return if data_range == 0.0 {
                Variation::Uniform
            } else {
                Variation::High
            };
        }
        let ratio = data_range / avg_value;
        if ratio > 2.0 {
            Variation::High
        } else if ratio < 0.5 {
            Variation::Uniform
        } else {
            Variation::Moderate
        }
    }
}

fn chart_rationale(chart_type: ChartType) -> &'static str {
    match chart_type {
        ChartType::Bar => "yang cocok untuk membandingkan nilai antar kategori",
        ChartType::Line => "yang cocok untuk menampilkan tren data dari waktu ke waktu",
        ChartType::Pie => "yang cocok untuk menampilkan proporsi data",
    }
}

fn variation_sentence(variation: Variation, range: &str) -> String {
    match variation {
        Variation::High => format!(
            "<br>Data menunjukkan <strong>variasi yang tinggi</strong> dengan rentang {range}, menandakan adanya perbedaan signifikan antar kategori."
        ),
        Variation::Uniform => format!(
            "<br>Data menunjukkan <strong>distribusi yang merata</strong> dengan rentang {range}, menandakan konsistensi yang baik antar kategori."
        ),
        Variation::Moderate => format!(
            "<br>Data menunjukkan <strong>variasi yang moderat</strong> dengan rentang {range}."
        ),
    }
}

pub struct Interpreter<'a> {
    classifier: &'a ColumnClassifier,
    locale: NumberLocale,
}
impl<'a> Interpreter<'a> {
    pub fn new(classifier: &'a ColumnClassifier, locale: NumberLocale) -> Self {
        Self { classifier, locale }
    }
    fn fmt(&self, value: f64) -> String {
        format_number(Some(value), &self.locale)
    }
    pub fn interpret(
        &self,
        statistics: Option<&Statistics>,
        records: &[Record],
        _x_column: &str,
        y_column: &str,
    ) -> String {
        let Some(stats) = statistics else {
            return NO_DATA_MESSAGE.to_string();
        };
        let y_numeric = self
            .classifier
            .classify(records)
            .is_kind(y_column, ColumnKind::Numeric);

        let mut text = format!(
            "Dataset ini memiliki <span class=\"insight-highlight\">{} record data</span> dengan {} kolom. ",
            stats.total_records, stats.total_columns
        );
        text.push_str(&format!(
            "Visualisasi menggunakan <strong>{}</strong> {}. ",
            stats.chart_type.display_name(),
            chart_rationale(stats.chart_type)
        ));

        if y_numeric {
            text.push_str("<br><br><strong>Analisis Statistik:</strong><br>");
            text.push_str(&format!(
                "• Nilai tertinggi: <span class=\"trend-positive\">{}</span><br>",
                self.fmt(stats.max_value)
            ));
            text.push_str(&format!(
                "• Nilai terendah: <span class=\"trend-negative\">{}</span><br>",
                self.fmt(stats.min_value)
            ));
            text.push_str(&format!(
                "• Rata-rata: <span class=\"trend-neutral\">{}</span><br>",
                self.fmt(stats.avg_value)
            ));
            text.push_str(&format!(
                "• Total keseluruhan: <span class=\"insight-highlight\">{}</span><br>",
                self.fmt(stats.sum_value)
            ));
            text.push_str(&variation_sentence(
                Variation::classify(stats.data_range, stats.avg_value),
                &self.fmt(stats.data_range),
            ));
        } else {
            text.push_str("<br><br><strong>Analisis Distribusi:</strong><br>");
            text.push_str(&format!(
                "• Kategori terbanyak: <span class=\"insight-highlight\">{}</span><br>",
                stats.top_category
            ));
            text.push_str(&format!("• Total kategori: {}<br>", stats.category_count));
            text.push_str(&format!(
                "• Rata-rata per kategori: {} data<br>",
                self.fmt(stats.avg_value)
            ));
        }

        text.push_str(&format!(
            "<br><strong>Insight Utama:</strong> {} adalah kategori dengan nilai/jumlah tertinggi dalam dataset ini.",
            stats.top_category_label()
        ));
        text
    }
    /// Overview shown before any axes are chosen.
    pub fn basic_summary(&self, records: &[Record]) -> String {
        if records.is_empty() {
            return NO_DATA_MESSAGE.to_string();
        }
        format!(
            "Dataset ini memiliki <span class=\"insight-highlight\">{} record data</span> dengan {} kolom. Pilih kolom untuk sumbu X dan Y serta jenis chart untuk melihat analisis dan interpretasi data yang lebih detail.",
            records.len(),
            column_names(records).len()
        )
    }
}

pub fn interpret(
    statistics: Option<&Statistics>,
    records: &[Record],
    x_column: &str,
    y_column: &str,
) -> String {
    let classifier = ColumnClassifier::new();
    Interpreter::new(&classifier, NumberLocale::default())
        .interpret(statistics, records, x_column, y_column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::records_from_json_str;
    use crate::selector::ChartTypeRequest;
    use crate::statistics::compute_statistics;

    fn records(json: &str) -> Vec<Record> {
        records_from_json_str(json).unwrap()
    }

    #[test]
    fn variation_bands() {
        assert_eq!(Variation::classify(30.0, 10.0), Variation::High);
        assert_eq!(Variation::classify(4.0, 10.0), Variation::Uniform);
        assert_eq!(Variation::classify(10.0, 10.0), Variation::Moderate);
        assert_eq!(Variation::classify(0.0, 0.0), Variation::Uniform);
        assert_eq!(Variation::classify(10.0, 0.0), Variation::High);
        assert_eq!(Variation::classify(4.0, -10.0), Variation::Uniform);
        assert_eq!(Variation::classify(30.0, -10.0), Variation::Uniform);
    }

    #[test]
    fn numeric_interpretation_mentions_figures() {
        let data = records(
            r#"[{"kota":"A","jumlah":"1000"},{"kota":"B","jumlah":"2500"},{"kota":"A","jumlah":"5"}]"#,
        );
        let stats = compute_statistics(&data, "kota", "jumlah", ChartTypeRequest::Auto);
        let text = interpret(stats.as_ref(), &data, "kota", "jumlah");
        assert!(text.starts_with("Dataset ini memiliki <span class=\"insight-highlight\">3 record data</span> dengan 2 kolom."));
        assert!(text.contains("<strong>Pie Chart</strong>"));
        assert!(text.contains("Nilai tertinggi: <span class=\"trend-positive\">2.500</span>"));
        assert!(text.contains("Rata-rata: <span class=\"trend-neutral\">1.168,33</span>"));
        assert!(text.contains("Total keseluruhan: <span class=\"insight-highlight\">3.505</span>"));
        assert!(text.contains("variasi yang tinggi</strong> dengan rentang 2.495"));
        assert!(text.ends_with("<strong>Insight Utama:</strong> B adalah kategori dengan nilai/jumlah tertinggi dalam dataset ini."));
    }

    #[test]
    fn categorical_interpretation_lists_distribution() {
        let data = records(r#"[{"kota":"A","jenis":"x"},{"kota":"A","jenis":"y"},{"kota":"B","jenis":"z"}]"#);
        let stats = compute_statistics(&data, "kota", "jenis", ChartTypeRequest::Auto);
        let text = interpret(stats.as_ref(), &data, "kota", "jenis");
        assert!(text.contains("Analisis Distribusi"));
        assert!(text.contains("Kategori terbanyak: <span class=\"insight-highlight\">A (2 data)</span>"));
        assert!(text.contains("Total kategori: 2<br>"));
        assert!(text.contains("Rata-rata per kategori: 1,50 data"));
        assert!(text.contains("<strong>Insight Utama:</strong> A adalah"));
    }

    #[test]
    fn zero_mean_is_well_defined() {
        let data = records(r#"[{"kota":"A","jumlah":0},{"kota":"B","jumlah":"0"}]"#);
        let stats = compute_statistics(&data, "kota", "jumlah", ChartTypeRequest::Auto);
        let text = interpret(stats.as_ref(), &data, "kota", "jumlah");
        assert!(text.contains("distribusi yang merata"));
        assert!(!text.contains("NaN"));
        assert!(!text.contains("Infinity"));
    }

    #[test]
    fn missing_statistics_yield_no_data_message() {
        assert_eq!(interpret(None, &[], "x", "y"), NO_DATA_MESSAGE);
    }

    #[test]
    fn basic_summary_invites_selection() {
        let classifier = ColumnClassifier::new();
        let interpreter = Interpreter::new(&classifier, NumberLocale::default());
        let data = records(r#"[{"a":1,"b":2}]"#);
        let text = interpreter.basic_summary(&data);
        assert!(text.contains("1 record data</span> dengan 2 kolom"));
        assert!(text.contains("Pilih kolom"));
        assert_eq!(interpreter.basic_summary(&[]), NO_DATA_MESSAGE);
    }

    #[test]
    fn record_counts_are_raw_on_both_paths() {
        let rows: Vec<String> = (0..1500)
            .map(|i| format!(r#"{{"kota":"K{}","jumlah":{i}}}"#, i % 3))
            .collect();
        let data = records(&format!("[{}]", rows.join(",")));
        let classifier = ColumnClassifier::new();
        let interpreter = Interpreter::new(&classifier, NumberLocale::default());
        let expected = "<span class=\"insight-highlight\">1500 record data</span>";
        assert!(interpreter.basic_summary(&data).contains(expected));
        let stats = compute_statistics(&data, "kota", "jumlah", ChartTypeRequest::Auto);
        assert!(interpreter
            .interpret(stats.as_ref(), &data, "kota", "jumlah")
            .contains(expected));
    }

    #[test]
    fn negative_mean_reads_as_uniform() {
        let data = records(
            r#"[{"kota":"A","jumlah":-10},{"kota":"B","jumlah":-40},{"kota":"C","jumlah":-10}]"#,
        );
        let stats = compute_statistics(&data, "kota", "jumlah", ChartTypeRequest::Auto);
        let text = interpret(stats.as_ref(), &data, "kota", "jumlah");
        assert!(text.contains("distribusi yang merata</strong> dengan rentang 30"));
    }
}
