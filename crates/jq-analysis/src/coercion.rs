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

//! Numeric coercion of raw J-Quants fields
//!
//! Every figure leaves this module as `Option<f64>`. A blank string, a JSON
//! null and a missing key all become `None`; nothing is ever defaulted to zero.

use chrono::NaiveDate;
use jq_models::{parse_date, DailyQuote, RawField, StatementRecord};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Coerce one raw field to a finite number
///
/// Non-numeric text and values parsing to NaN or infinity are treated as
/// absent and logged.
pub fn coerce(raw: Option<&RawField>, field: &str) -> Option<f64> {
  let value = match raw? {
    RawField::Number(value) => *value,
    RawField::Text(text) => {
      let text = text.trim();
      if text.is_empty() {
        return None;
      }
      match text.parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
          warn!(field, value = text, "non-numeric field treated as absent");
          return None;
        }
      }
    }
  };

  if value.is_finite() {
    Some(value)
  } else {
    warn!(field, value, "non-finite field treated as absent");
    None
  }
}

/// Coerce a day-resolution date field
pub fn coerce_date(raw: &str, field: &str) -> Option<NaiveDate> {
  if raw.trim().is_empty() {
    return None;
  }
  let parsed = parse_date(raw);
  if parsed.is_none() {
    warn!(field, value = raw, "unparseable date treated as absent");
  }
  parsed
}

/// A statement with every figure coerced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoercedStatement {
  pub disclosed_date: Option<NaiveDate>,
  pub period_end: Option<NaiveDate>,
  pub period_type: String,
  pub net_sales: Option<f64>,
  pub forecast_net_sales: Option<f64>,
  pub operating_profit: Option<f64>,
  pub forecast_operating_profit: Option<f64>,
  pub net_profit: Option<f64>,
  pub forecast_net_profit: Option<f64>,
  pub earnings_per_share: Option<f64>,
  pub forecast_earnings_per_share: Option<f64>,
  pub total_assets: Option<f64>,
  pub equity: Option<f64>,
  pub book_value_per_share: Option<f64>,
}

impl From<&StatementRecord> for CoercedStatement {
  fn from(raw: &StatementRecord) -> Self {
    CoercedStatement {
      disclosed_date: coerce_date(&raw.disclosed_date, "DisclosedDate"),
      period_end: coerce_date(&raw.current_period_end_date, "CurrentPeriodEndDate"),
      period_type: raw.type_of_current_period.trim().to_string(),
      net_sales: coerce(raw.net_sales.as_ref(), "NetSales"),
      forecast_net_sales: coerce(raw.forecast_net_sales.as_ref(), "ForecastNetSales"),
      operating_profit: coerce(raw.operating_profit.as_ref(), "OperatingProfit"),
      forecast_operating_profit: coerce(
        raw.forecast_operating_profit.as_ref(),
        "ForecastOperatingProfit",
      ),
      net_profit: coerce(raw.profit.as_ref(), "Profit"),
      forecast_net_profit: coerce(raw.forecast_profit.as_ref(), "ForecastProfit"),
      earnings_per_share: coerce(raw.earnings_per_share.as_ref(), "EarningsPerShare"),
      forecast_earnings_per_share: coerce(
        raw.forecast_earnings_per_share.as_ref(),
        "ForecastEarningsPerShare",
      ),
      total_assets: coerce(raw.total_assets.as_ref(), "TotalAssets"),
      equity: coerce(raw.equity.as_ref(), "Equity"),
      book_value_per_share: coerce(raw.book_value_per_share.as_ref(), "BookValuePerShare"),
    }
  }
}

/// One trading day with split-adjusted prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedQuote {
  pub date: NaiveDate,
  pub open: Option<f64>,
  pub high: Option<f64>,
  pub low: Option<f64>,
  pub close: Option<f64>,
}

impl AdjustedQuote {
  /// Coerce a raw quote; `None` when its date cannot be read
  pub fn from_raw(raw: &DailyQuote) -> Option<Self> {
    Some(AdjustedQuote {
      date: coerce_date(&raw.date, "Date")?,
      open: coerce(raw.adjustment_open.as_ref(), "AdjustmentOpen"),
      high: coerce(raw.adjustment_high.as_ref(), "AdjustmentHigh"),
      low: coerce(raw.adjustment_low.as_ref(), "AdjustmentLow"),
      close: coerce(raw.adjustment_close.as_ref(), "AdjustmentClose"),
    })
  }
}

/// Coerce a quote sequence, dropping days without a readable date
pub fn coerce_quotes(raw: &[DailyQuote]) -> Vec<AdjustedQuote> {
  raw.iter().filter_map(AdjustedQuote::from_raw).collect()
}
