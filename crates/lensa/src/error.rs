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

use thiserror::Error;
#[derive(Error, Debug)]
pub enum LensaError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] SerialisationError),
}
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Record {index} is not a JSON object")]
    InvalidRecord { index: usize },
    #[error("Expected a JSON array of records, found {found}")]
    NotAnArray { found: String },
    #[error("Datastore response is missing 'result.records'")]
    MissingDatastoreRecords,
    #[error("Failed to read CSV input: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
    #[error("Unsupported input format: {format}")]
    UnsupportedFormat { format: String },
    #[error("Empty dataset provided")]
    EmptyDataset,
}
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {field} = {value}")]
    InvalidValue { field: String, value: String },
    #[error("Unknown locale '{locale}'")]
    UnknownLocale { locale: String },
    #[error("Unknown chart type '{value}'")]
    UnknownChartType { value: String },
    #[error("Failed to read configuration file '{path}': {source}")]
    ConfigFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
#[derive(Error, Debug)]
pub enum SerialisationError {
    #[error("JSON serialisation failed: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("YAML serialisation failed: {source}")]
    Yaml {
        #[from]
        source: serde_yaml::Error,
    },
}
pub type Result<T> = std::result::Result<T, LensaError>;
pub type DataResult<T> = std::result::Result<T, DataError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
impl From<serde_json::Error> for LensaError {
    fn from(err: serde_json::Error) -> Self {
        LensaError::Serialisation(SerialisationError::Json { source: err })
    }
}
impl From<serde_yaml::Error> for LensaError {
    fn from(err: serde_yaml::Error) -> Self {
        LensaError::Serialisation(SerialisationError::Yaml { source: err })
    }
}
impl From<csv::Error> for LensaError {
    fn from(err: csv::Error) -> Self {
        LensaError::Data(DataError::Csv { source: err })
    }
}
impl LensaError {
    pub fn category(&self) -> &'static str {
        match self {
            LensaError::Data(_) => "Data",
            LensaError::Config(_) => "Configuration",
            LensaError::Io(_) => "I/O",
            LensaError::Serialisation(_) => "Serialisation",
        }
    }
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            LensaError::Data(DataError::InvalidRecord { .. }) => vec![
                "Every record must be a JSON object with string keys".to_string(),
                "Check the input for nested arrays or bare values".to_string(),
            ],
            LensaError::Data(DataError::MissingDatastoreRecords) => vec![
                "Pass a plain JSON array instead of a datastore envelope".to_string(),
                "Verify the datastore query returned a 'result' object".to_string(),
            ],
            LensaError::Config(ConfigError::UnknownLocale { .. }) => {
                vec!["Supported locales are 'id-ID' and 'en-US'".to_string()]
            }
            LensaError::Config(ConfigError::UnknownChartType { .. }) => {
                vec!["Use one of: auto, line, bar, pie".to_string()]
            }
            _ => vec!["Check the error message for specific guidance".to_string()],
        }
    }
    pub fn user_message(&self) -> String {
        match self {
            LensaError::Data(DataError::EmptyDataset) => {
                "The dataset appears to be empty. Please provide data with at least one row."
                    .to_string()
            }
            LensaError::Config(ConfigError::ConfigFileError { path, .. }) => {
                format!("Unable to load configuration from '{path}'. Please check the file.")
            }
            _ => self.to_string(),
        }
    }
}
