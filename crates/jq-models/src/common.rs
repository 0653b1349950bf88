/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Common types and structures shared by J-Quants API responses

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date formats J-Quants uses for day-resolution fields
pub const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

/// A numeric field exactly as it arrived on the wire
///
/// Statement figures come as strings (`"1234"`, or `""` when not disclosed),
/// price figures as JSON numbers. A JSON `null` or a missing key is modelled
/// as `None` on the enclosing `Option<RawField>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
  /// A JSON number
  Number(f64),

  /// A JSON string, possibly blank
  Text(String),
}

impl RawField {
  /// Whether the field carries no characters at all (the "not disclosed" marker)
  pub fn is_blank(&self) -> bool {
    match self {
      RawField::Number(_) => false,
      RawField::Text(text) => text.trim().is_empty(),
    }
  }
}

impl From<f64> for RawField {
  fn from(value: f64) -> Self {
    RawField::Number(value)
  }
}

impl From<&str> for RawField {
  fn from(value: &str) -> Self {
    RawField::Text(value.to_string())
  }
}

/// Error body returned by J-Quants on a failed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
  /// Human readable description
  pub message: String,
}

/// Parse a J-Quants day-resolution date field
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
  let raw = raw.trim();
  DATE_FORMATS.iter().find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_raw_field_untagged() {
    let fields: Vec<Option<RawField>> =
      serde_json::from_str(r#"["123.5", "", 42.0, null]"#).unwrap();
    assert_eq!(fields[0], Some(RawField::Text("123.5".to_string())));
    assert!(fields[1].as_ref().unwrap().is_blank());
    assert_eq!(fields[2], Some(RawField::Number(42.0)));
    assert_eq!(fields[3], None);
  }

  #[test]
  fn test_parse_date_formats() {
    let expected = NaiveDate::from_ymd_opt(2024, 3, 31);
    assert_eq!(parse_date("2024-03-31"), expected);
    assert_eq!(parse_date("20240331"), expected);
    assert_eq!(parse_date(""), None);
    assert_eq!(parse_date("31/03/2024"), None);
  }
}
