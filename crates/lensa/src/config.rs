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

use crate::error::{ConfigError, ConfigResult, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// How the identifier name rule matches the `id` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierMatch {
    /// Any occurrence of `id` in the name, so `video` and `provinsi_identitas` match too.
    #[default]
    Substring,
    /// Only names ending in `id` (`id`, `_id`, `kode_id`, `userid`).
    Suffix,
}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub sample_size: usize,
    pub numeric_threshold: f64,
    pub identifier_match: IdentifierMatch,
}
impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            sample_size: 10,
            numeric_threshold: 0.7,
            identifier_match: IdentifierMatch::Substring,
        }
    }
}
/// Separators used when rendering numbers for people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NumberLocale {
    pub thousands_separator: char,
    pub decimal_separator: char,
}
impl NumberLocale {
    pub const fn id_id() -> Self {
        Self {
            thousands_separator: '.',
            decimal_separator: ',',
        }
    }
    pub const fn en_us() -> Self {
        Self {
            thousands_separator: ',',
            decimal_separator: '.',
        }
    }
    pub fn tag(&self) -> &'static str {
        if *self == Self::en_us() {
            "en-US"
        } else {
            "id-ID"
        }
    }
}
impl Default for NumberLocale {
    fn default() -> Self {
        Self::id_id()
    }
}
impl FromStr for NumberLocale {
    type Err = ConfigError;
    fn from_str(s: &str) -> ConfigResult<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "id" | "id-id" => Ok(Self::id_id()),
            "en" | "en-us" => Ok(Self::en_us()),
            _ => Err(ConfigError::UnknownLocale {
                locale: s.to_string(),
            }),
        }
    }
}
impl TryFrom<String> for NumberLocale {
    type Error = ConfigError;
    fn try_from(value: String) -> ConfigResult<Self> {
        value.parse()
    }
}
impl From<NumberLocale> for String {
    fn from(locale: NumberLocale) -> Self {
        locale.tag().to_string()
    }
}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub classifier: ClassifierConfig,
    /// Largest number of distinct regions still drawn as a pie.
    pub pie_max_categories: usize,
    pub locale: NumberLocale,
}
impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            pie_max_categories: 8,
            locale: NumberLocale::default(),
        }
    }
}
fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse::<T>().ok())
}
impl EngineConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.classifier.sample_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "classifier.sample_size".to_string(),
                value: "0".to_string(),
            });
        }
        let threshold = self.classifier.numeric_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "classifier.numeric_threshold".to_string(),
                value: threshold.to_string(),
            });
        }
        if self.pie_max_categories == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pie_max_categories".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let input =
            std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileError {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_yaml_str(&input)
    }
    /// Applies `LENSA_SAMPLE_SIZE`, `LENSA_NUMERIC_THRESHOLD`, `LENSA_PIE_MAX_CATEGORIES`
    /// and `LENSA_LOCALE` where set and parseable.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(n) = parse_env::<usize>("LENSA_SAMPLE_SIZE") {
            self.classifier.sample_size = n;
        }
        if let Some(t) = parse_env::<f64>("LENSA_NUMERIC_THRESHOLD") {
            self.classifier.numeric_threshold = t;
        }
        if let Some(n) = parse_env::<usize>("LENSA_PIE_MAX_CATEGORIES") {
            self.pie_max_categories = n;
        }
        if let Some(locale) = parse_env::<NumberLocale>("LENSA_LOCALE") {
            self.locale = locale;
        }
        self
    }
    pub fn for_large_datasets() -> Self {
        Self {
            classifier: ClassifierConfig {
                sample_size: 100,
                ..Default::default()
            },
            ..Default::default()
        }
    }
    pub fn for_strict_typing() -> Self {
        Self {
            classifier: ClassifierConfig {
                sample_size: 50,
                numeric_threshold: 0.95,
                identifier_match: IdentifierMatch::Suffix,
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::io::Write;
    use std::sync::Mutex;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    #[test]
    fn defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(EngineConfig::for_large_datasets().validate().is_ok());
        assert!(EngineConfig::for_strict_typing().validate().is_ok());
    }

    #[test]
    fn zero_sample_size_is_rejected() {
        let mut config = EngineConfig::default();
        config.classifier.sample_size = 0;
        assert!(config.validate().is_err());
        config.classifier.sample_size = 10;
        config.classifier.numeric_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn locale_parsing() {
        assert_eq!("id-ID".parse::<NumberLocale>().unwrap(), NumberLocale::id_id());
        assert_eq!("en_us".parse::<NumberLocale>().unwrap(), NumberLocale::en_us());
        assert!("fr-FR".parse::<NumberLocale>().is_err());
    }

    #[test]
    fn yaml_overrides_selected_fields() {
        let config = EngineConfig::from_yaml_str(
            "classifier:\n  sample_size: 25\n  identifier_match: suffix\nlocale: en-US\n",
        )
        .unwrap();
        assert_eq!(config.classifier.sample_size, 25);
        assert_eq!(config.classifier.numeric_threshold, 0.7);
        assert_eq!(config.classifier.identifier_match, IdentifierMatch::Suffix);
        assert_eq!(config.locale, NumberLocale::en_us());
        assert_eq!(config.pie_max_categories, 8);
    }

    #[test]
    fn yaml_file_is_validated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pie_max_categories: 0").unwrap();
        assert!(EngineConfig::from_yaml_file(file.path()).is_err());
        assert!(EngineConfig::from_yaml_file("/definitely/missing.yml").is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let _g = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        std::env::set_var("LENSA_SAMPLE_SIZE", "3");
        std::env::set_var("LENSA_LOCALE", "en-US");
        std::env::set_var("LENSA_NUMERIC_THRESHOLD", "not-a-number");
        let config = EngineConfig::default().with_env_overrides();
        for k in ["LENSA_SAMPLE_SIZE", "LENSA_LOCALE", "LENSA_NUMERIC_THRESHOLD"] {
            std::env::remove_var(k);
        }
        assert_eq!(config.classifier.sample_size, 3);
        assert_eq!(config.locale, NumberLocale::en_us());
        assert_eq!(config.classifier.numeric_threshold, 0.7);
    }
}
