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

//! Listed issue information

use crate::common::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Snapshot of one listed issue as of a date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CompanyInfo {
  /// As-of date of the snapshot
  pub date: String,

  /// Issue code (J-Quants reports five digits, e.g. "79740")
  pub code: String,

  pub company_name: String,

  pub company_name_english: String,

  pub sector17_code: String,

  /// 17-sector classification name
  pub sector17_code_name: String,

  pub sector33_code: String,

  /// 33-sector classification name
  pub sector33_code_name: String,

  /// TOPIX scale category (e.g. "TOPIX Large70")
  pub scale_category: String,

  pub market_code: String,

  /// Market segment name (e.g. "プライム")
  pub market_code_name: String,
}

impl CompanyInfo {
  /// Parse the as-of date
  pub fn parsed_date(&self) -> Option<NaiveDate> {
    parse_date(&self.date)
  }
}

/// Response of `GET listed/info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedInfoResponse {
  pub info: Vec<CompanyInfo>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pagination_key: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_company_info_deserialization() {
    let json = r#"{
            "info": [{
                "Date": "2024-01-04",
                "Code": "79740",
                "CompanyName": "任天堂",
                "CompanyNameEnglish": "Nintendo Co.,Ltd.",
                "Sector17Code": "9",
                "Sector17CodeName": "電機・精密",
                "Sector33Code": "3700",
                "Sector33CodeName": "その他製品",
                "ScaleCategory": "TOPIX Large70",
                "MarketCode": "0111",
                "MarketCodeName": "プライム"
            }]
        }"#;

    let response: ListedInfoResponse = serde_json::from_str(json).unwrap();
    let info = &response.info[0];
    assert_eq!(info.code, "79740");
    assert_eq!(info.company_name_english, "Nintendo Co.,Ltd.");
    assert_eq!(info.sector33_code_name, "その他製品");
    assert_eq!(info.parsed_date(), NaiveDate::from_ymd_opt(2024, 1, 4));
    assert!(response.pagination_key.is_none());
  }

  #[test]
  fn test_missing_keys_default_to_blank() {
    let info: CompanyInfo = serde_json::from_str(r#"{"Code": "72030"}"#).unwrap();
    assert_eq!(info.code, "72030");
    assert!(info.company_name.is_empty());
    assert_eq!(info.parsed_date(), None);
  }
}
