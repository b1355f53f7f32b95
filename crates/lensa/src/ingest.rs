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

//! Loading record arrays from the shapes data portals hand out.

use crate::error::{DataError, DataResult, LensaError, Result};
use crate::record::{Record, Value};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn records_from_json_value(value: serde_json::Value) -> DataResult<Vec<Record>> {
    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(DataError::NotAnArray {
                found: json_kind(&other).to_string(),
            })
        }
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect()),
            _ => Err(DataError::InvalidRecord { index }),
        })
        .collect()
}

pub fn records_from_json_str(input: &str) -> Result<Vec<Record>> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    Ok(records_from_json_value(value)?)
}

/// Accepts a CKAN `datastore_search` response, `{ "result": { "records": [...] } }`.
pub fn records_from_datastore_response(input: &str) -> Result<Vec<Record>> {
    let mut value: serde_json::Value = serde_json::from_str(input)?;
    let records = value
        .get_mut("result")
        .and_then(|result| result.get_mut("records"))
        .map(serde_json::Value::take)
        .ok_or(DataError::MissingDatastoreRecords)?;
    Ok(records_from_json_value(records)?)
}

/// Reads CSV with a header row. Every cell becomes a text value.
pub fn records_from_csv_reader<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(header, field)| (header.to_string(), Value::from(field)))
            .collect();
        records.push(record);
    }
    tracing::debug!(rows = records.len(), columns = headers.len(), "parsed CSV input");
    Ok(records)
}

/// Loads records from a `.json` (plain array or datastore envelope) or `.csv` file.
pub fn records_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => records_from_csv_reader(File::open(path)?),
        "json" => {
            let input = std::fs::read_to_string(path)?;
            match records_from_json_str(&input) {
                Err(LensaError::Data(DataError::NotAnArray { .. })) => {
                    records_from_datastore_response(&input)
                }
                other => other,
            }
        }
        _ => Err(DataError::UnsupportedFormat {
            format: path.display().to_string(),
        }
        .into()),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
