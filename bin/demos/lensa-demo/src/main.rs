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

mod cli;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use lensa::{
    ingest::records_from_path, ChartAdvisor, ChartTypeRequest, DataError, EngineConfig,
    LensaError,
};
use render::{plain_text, ChartSlot, TextChart};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();

    let filter = if args.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&args) {
        eprintln!("ERROR: {err:#}");
        if let Some(lensa_err) = err.downcast_ref::<LensaError>() {
            eprintln!("{} problem: {}", lensa_err.category(), lensa_err.user_message());
            for suggestion in lensa_err.suggestions() {
                eprintln!("  - {suggestion}");
            }
        }
        std::process::exit(1);
    }
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_yaml_file(path)?,
        None => EngineConfig::default(),
    };
    Ok(config.with_env_overrides())
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    info!(locale = config.locale.tag(), "engine configured");
    let advisor = ChartAdvisor::with_config(config)?;

    let records = records_from_path(&args.input)
        .with_context(|| format!("loading records from {}", args.input.display()))?;
    if records.is_empty() {
        return Err(LensaError::from(DataError::EmptyDataset).into());
    }
    info!(records = records.len(), "dataset loaded");

    let columns = advisor.available_columns(&records);
    let report = advisor.report(
        &records,
        args.x.as_deref(),
        args.y.as_deref(),
        args.chart_type,
    );

    if args.json {
        let out = serde_json::json!({
            "availableColumns": columns,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}\n", plain_text(&advisor.basic_summary(&records)));
    println!("X columns: {}", columns.x_columns.join(", "));
    println!("Y columns: {}", columns.y_columns.join(", "));
    println!(
        "Recommended: x = {}, y = {}\n",
        columns.recommended_x.as_deref().unwrap_or("-"),
        columns.recommended_y.as_deref().unwrap_or("-")
    );

    let Some(report) = report else {
        println!("Nothing to chart: no usable X/Y columns were found.");
        return Ok(());
    };

    let mut slot = ChartSlot::new(TextChart::new(advisor.config().locale));
    let requests = if args.cycle {
        vec![
            ChartTypeRequest::Line,
            ChartTypeRequest::Bar,
            ChartTypeRequest::Pie,
        ]
    } else {
        vec![args.chart_type]
    };
    for request in requests {
        let current = if request == args.chart_type {
            report.clone()
        } else {
            advisor
                .report(&records, Some(&report.x_column), Some(&report.y_column), request)
                .context("re-rendering the selection")?
        };
        slot.replace(&current);
        if let Some(frame) = slot.surface().frame() {
            println!("{frame}");
        }
        println!("{}\n", plain_text(&current.interpretation));
    }
    info!(live = slot.is_live(), "render pass finished");
    Ok(())
}
