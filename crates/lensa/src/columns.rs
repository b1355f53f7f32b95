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

use crate::classifier::{ColumnKind, DatasetAnalysis};
use serde::{Deserialize, Serialize};

/// Columns offered for axis selection. Identifier columns never appear.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableColumns {
    /// Date, then categorical, then numeric columns.
    pub x_columns: Vec<String>,
    /// Numeric, then categorical columns.
    pub y_columns: Vec<String>,
    pub recommended_x: Option<String>,
    pub recommended_y: Option<String>,
}
impl AvailableColumns {
    pub fn from_analysis(analysis: &DatasetAnalysis) -> Self {
        let gather = |kinds: &[ColumnKind]| -> Vec<String> {
            kinds
                .iter()
                .flat_map(|kind| analysis.columns_of(*kind))
                .map(str::to_string)
                .collect()
        };
        Self {
            x_columns: gather(&[ColumnKind::Date, ColumnKind::Categorical, ColumnKind::Numeric]),
            y_columns: gather(&[ColumnKind::Numeric, ColumnKind::Categorical]),
            recommended_x: analysis.best_x_column.clone(),
            recommended_y: analysis.best_y_column.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::ingest::records_from_json_str;

    #[test]
    fn lists_are_ordered_by_kind() {
        let data = records_from_json_str(
            r#"[{"_id":1,"jumlah":3,"kota":"A","tahun":"2020","jenis":"x"}]"#,
        )
        .unwrap();
        let columns = AvailableColumns::from_analysis(&classify(&data));
        assert_eq!(columns.x_columns, ["tahun", "kota", "jenis", "jumlah"]);
        assert_eq!(columns.y_columns, ["jumlah", "kota", "jenis"]);
        assert_eq!(columns.recommended_x.as_deref(), Some("tahun"));
        assert_eq!(columns.recommended_y.as_deref(), Some("jumlah"));
    }

    #[test]
    fn empty_analysis_has_no_columns() {
        let columns = AvailableColumns::from_analysis(&classify(&[]));
        assert!(columns.x_columns.is_empty());
        assert!(columns.recommended_x.is_none());
    }
}
