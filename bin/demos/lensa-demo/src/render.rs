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


//! Terminal rendering of chart reports.
//!
//! Only one chart is live at a time: a [`ChartSlot`] destroys whatever it holds before
//! drawing the replacement.

use lensa::{format_number, ChartReport, ChartType, NumberLocale};
use once_cell::sync::Lazy;
use regex::Regex;

const BAR_WIDTH: usize = 40;

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Something that can draw a report and later destroy what it drew.
pub trait ChartSurface {
    type Handle;
    fn draw(&mut self, report: &ChartReport) -> Self::Handle;
    fn destroy(&mut self, handle: Self::Handle);
}

pub struct ChartSlot<S: ChartSurface> {
    surface: S,
    live: Option<S::Handle>,
}
impl<S: ChartSurface> ChartSlot<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            live: None,
        }
    }
    pub fn replace(&mut self, report: &ChartReport) {
        self.teardown();
        let handle = self.surface.draw(report);
        self.live = Some(handle);
    }
    pub fn teardown(&mut self) {
        if let Some(handle) = self.live.take() {
            self.surface.destroy(handle);
        }
    }
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }
    pub fn surface(&self) -> &S {
        &self.surface
    }
}
impl<S: ChartSurface> Drop for ChartSlot<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Horizontal bar rendering. Pie charts show each slice's share of the total.
pub struct TextChart {
    locale: NumberLocale,
    next_id: u64,
    frame: Option<(u64, String)>,
}
impl TextChart {
    pub fn new(locale: NumberLocale) -> Self {
        Self {
            locale,
            next_id: 0,
            frame: None,
        }
    }
    pub fn frame(&self) -> Option<&str> {
        self.frame.as_ref().map(|(_, text)| text.as_str())
    }
    fn render(&self, report: &ChartReport) -> String {
        let series = &report.series;
        let mut out = format!(
            "{} : {} by {}\n",
            report.chart_type.display_name(),
            report.y_column,
            report.x_column
        );
        if series.is_empty() {
            out.push_str("  (no data)\n");
            return out;
        }
        let label_width = series.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let peak = series.values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        let total = series.total();
        for (label, value) in series.iter() {
            let filled = if peak > 0.0 {
                ((value.abs() / peak) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            let figure = match report.chart_type {
                ChartType::Pie if total != 0.0 => format!(
                    "{}%",
                    format_number(Some(value / total * 100.0), &self.locale)
                ),
                _ => format_number(Some(value), &self.locale),
            };
            out.push_str(&format!(
                "  {label:<label_width$} | {}{} {figure}\n",
                "#".repeat(filled),
                " ".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
            ));
        }
        out
    }
}
impl ChartSurface for TextChart {
    type Handle = u64;
    fn draw(&mut self, report: &ChartReport) -> u64 {
        self.next_id += 1;
        let text = self.render(report);
        tracing::debug!(chart = self.next_id, kind = %report.chart_type, "chart drawn");
        self.frame = Some((self.next_id, text));
        self.next_id
    }
    fn destroy(&mut self, handle: u64) {
        if matches!(self.frame, Some((id, _)) if id == handle) {
            tracing::debug!(chart = handle, "chart destroyed");
            self.frame = None;
        }
    }
}

/// Flattens the narration markup for a terminal.
pub fn plain_text(html: &str) -> String {
    let with_breaks = LINE_BREAK.replace_all(html, "\n");
    TAG.replace_all(&with_breaks, "").into_owned()
}
