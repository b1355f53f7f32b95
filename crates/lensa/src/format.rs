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

use crate::config::NumberLocale;

/// Placeholder for values that cannot be shown.
pub const MISSING_PLACEHOLDER: &str = "-";

/// Renders a number for display.
///
/// Whole numbers get thousands separators and no fraction; everything else gets exactly two
/// fraction digits. `None`, NaN and infinities render as [`MISSING_PLACEHOLDER`].
pub fn format_number(value: Option<f64>, locale: &NumberLocale) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return MISSING_PLACEHOLDER.to_string();
    };
    let sign = if value < 0.0 { "-" } else { "" };
    if value.fract() == 0.0 {
        let digits = format!("{:.0}", value.abs());
        return format!("{sign}{}", group_digits(&digits, locale.thousands_separator));
    }
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!(
        "{sign}{}{}{fraction}",
        group_digits(whole, locale.thousands_separator),
        locale.decimal_separator
    )
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
