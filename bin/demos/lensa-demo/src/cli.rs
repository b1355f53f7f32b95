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


use clap::Parser;
use lensa::ChartTypeRequest;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lensa-demo")]
#[command(about = "Profiles a tabular dataset, picks chart axes and narrates the result")]
#[command(version)]
pub struct Args {
    #[arg(long, short, help = "Dataset file: .json (array or datastore response) or .csv")]
    pub input: PathBuf,

    #[arg(long, help = "Column for the X axis; defaults to the recommended column")]
    pub x: Option<String>,

    #[arg(long, help = "Column for the Y axis; defaults to the recommended column")]
    pub y: Option<String>,

    #[arg(long, default_value = "auto", help = "auto, line, bar or pie")]
    pub chart_type: ChartTypeRequest,

    #[arg(long, help = "YAML engine configuration; LENSA_* variables override it")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Print the report as JSON instead of text")]
    pub json: bool,

    #[arg(long, help = "Render the selection once per chart type, replacing the chart each time")]
    pub cycle: bool,

    #[arg(long, help = "Enable debug-level logging")]
    pub debug: bool,
}
