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

//! Financial statement models

use crate::common::{parse_date, RawField};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One filed financial statement (決算短信) for one period
///
/// Figures not disclosed for the period arrive as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatementRecord {
  /// Date the statement was disclosed
  #[serde(default)]
  pub disclosed_date: String,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub disclosure_number: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub local_code: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub type_of_document: Option<String>,

  /// Period type label ("1Q", "2Q", "3Q", "FY", ...)
  #[serde(default)]
  pub type_of_current_period: String,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub current_period_start_date: Option<String>,

  /// Last day of the reported period
  #[serde(default)]
  pub current_period_end_date: String,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub current_fiscal_year_start_date: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub current_fiscal_year_end_date: Option<String>,

  #[serde(default)]
  pub net_sales: Option<RawField>,

  #[serde(default)]
  pub forecast_net_sales: Option<RawField>,

  #[serde(default)]
  pub operating_profit: Option<RawField>,

  #[serde(default)]
  pub forecast_operating_profit: Option<RawField>,

  /// Net profit attributable to owners of the parent
  #[serde(default)]
  pub profit: Option<RawField>,

  #[serde(default)]
  pub forecast_profit: Option<RawField>,

  #[serde(default)]
  pub earnings_per_share: Option<RawField>,

  #[serde(default)]
  pub forecast_earnings_per_share: Option<RawField>,

  #[serde(default)]
  pub total_assets: Option<RawField>,

  #[serde(default)]
  pub equity: Option<RawField>,

  #[serde(default)]
  pub book_value_per_share: Option<RawField>,
}

impl StatementRecord {
  /// Parse the disclosure date
  pub fn parsed_disclosed_date(&self) -> Option<NaiveDate> {
    parse_date(&self.disclosed_date)
  }

  /// Parse the period end date
  pub fn parsed_period_end(&self) -> Option<NaiveDate> {
    parse_date(&self.current_period_end_date)
  }
}

/// Response of `GET fins/statements`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementsResponse {
  pub statements: Vec<StatementRecord>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pagination_key: Option<String>,
}
