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

//! Daily stock price models

use crate::common::{parse_date, RawField};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of an issue
///
/// The `adjustment_*` figures are corrected for splits and reverse splits and
/// are the ones the dashboard plots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailyQuote {
  /// Trading date
  pub date: String,

  #[serde(default)]
  pub code: String,

  #[serde(default)]
  pub open: Option<RawField>,

  #[serde(default)]
  pub high: Option<RawField>,

  #[serde(default)]
  pub low: Option<RawField>,

  #[serde(default)]
  pub close: Option<RawField>,

  #[serde(default)]
  pub volume: Option<RawField>,

  /// Split adjustment factor applied on this date
  #[serde(default)]
  pub adjustment_factor: Option<RawField>,

  #[serde(default)]
  pub adjustment_open: Option<RawField>,

  #[serde(default)]
  pub adjustment_high: Option<RawField>,

  #[serde(default)]
  pub adjustment_low: Option<RawField>,

  #[serde(default)]
  pub adjustment_close: Option<RawField>,

  #[serde(default)]
  pub adjustment_volume: Option<RawField>,
}

impl DailyQuote {
  /// Parse the trading date
  pub fn parsed_date(&self) -> Option<NaiveDate> {
    parse_date(&self.date)
  }
}

/// Response of `GET prices/daily_quotes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyQuotesResponse {
  pub daily_quotes: Vec<DailyQuote>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pagination_key: Option<String>,
}
