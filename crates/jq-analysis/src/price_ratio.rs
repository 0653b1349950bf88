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

//! Price/earnings linkage
//!
//! Statements are left-joined to daily quotes on period-end date. The PER is
//! taken from the last joined row only: when the latest period ended on a
//! non-trading day it has no price and the PER is reported as no data rather
//! than borrowing an earlier period's close.

use crate::coercion::AdjustedQuote;
use crate::metric::{Metric, NoDataReason};
use crate::ratios::{checked_ratio, DerivedRatioRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// One statement period with the close of the matching trading day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JoinedPrice {
  pub period_end: Option<NaiveDate>,
  pub earnings_per_share: Option<f64>,
  /// Whether a trading day exists on the period end
  pub matched: bool,
  /// Adjusted close of that day
  pub close: Option<f64>,
}

/// Left join of statement periods onto quotes by period-end date
///
/// One row per record, in record order. When several quotes share a date the
/// first one wins.
pub fn join_quotes(records: &[DerivedRatioRecord], quotes: &[AdjustedQuote]) -> Vec<JoinedPrice> {
  let mut closes: HashMap<NaiveDate, Option<f64>> = HashMap::with_capacity(quotes.len());
  for quote in quotes {
    closes.entry(quote.date).or_insert(quote.close);
  }

  records
    .iter()
    .map(|record| {
      let period_end = record.statement.period_end;
      let matched = period_end.and_then(|date| closes.get(&date).copied());
      JoinedPrice {
        period_end,
        earnings_per_share: record.statement.earnings_per_share,
        matched: matched.is_some(),
        close: matched.flatten(),
      }
    })
    .collect()
}

/// PER of the latest statement period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceEarnings {
  pub period_end: Option<NaiveDate>,
  pub close: Option<f64>,
  pub earnings_per_share: Option<f64>,
  /// `round2(close / earnings_per_share)`
  pub per: Metric,
}

/// Price/earnings multiple from the latest joined row
pub fn price_earnings_ratio(
  records: &[DerivedRatioRecord],
  quotes: &[AdjustedQuote],
) -> PriceEarnings {
  let Some(latest) = join_quotes(records, quotes).pop() else {
    return PriceEarnings {
      period_end: None,
      close: None,
      earnings_per_share: None,
      per: Metric::NoData(NoDataReason::MissingInput),
    };
  };

  let per = if latest.matched {
    Metric::from_division(
      checked_ratio(latest.close, latest.earnings_per_share, 1.0),
      latest.close,
      latest.earnings_per_share,
    )
  } else {
    debug!(period_end = ?latest.period_end, "no trading day on latest period end");
    Metric::NoData(NoDataReason::UnmatchedQuote)
  };

  PriceEarnings {
    period_end: latest.period_end,
    close: latest.close,
    earnings_per_share: latest.earnings_per_share,
    per,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::coercion::CoercedStatement;
  use jq_core::test_utils::assert_some_approx_eq;

  fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
  }

  fn record(period_end: &str, eps: Option<f64>) -> DerivedRatioRecord {
    DerivedRatioRecord::from_statement(CoercedStatement {
      period_end: Some(date(period_end)),
      earnings_per_share: eps,
      ..Default::default()
    })
  }

  fn quote(day: &str, close: Option<f64>) -> AdjustedQuote {
    AdjustedQuote { date: date(day), open: close, high: close, low: close, close }
  }

  #[test]
  fn test_per_from_latest_period() {
    let records = vec![record("2022-12-31", Some(100.0)), record("2023-03-31", Some(250.0))];
    let quotes = vec![quote("2022-12-30", Some(5000.0)), quote("2023-03-31", Some(5800.0))];

    let result = price_earnings_ratio(&records, &quotes);
    assert_some_approx_eq(result.per.value(), 23.2);
    assert_eq!(result.close, Some(5800.0));
    assert_eq!(result.period_end, Some(date("2023-03-31")));
  }

  #[test]
  fn test_unmatched_latest_does_not_fall_back() {
    // 2023-12-31 is a Sunday; the earlier period does have a quote
    let records = vec![record("2023-09-30", Some(100.0)), record("2023-12-31", Some(120.0))];
    let quotes = vec![quote("2023-09-30", Some(6000.0)), quote("2023-12-29", Some(6100.0))];

    let result = price_earnings_ratio(&records, &quotes);
    assert_eq!(result.per, Metric::NoData(NoDataReason::UnmatchedQuote));
    assert_eq!(result.close, None);
  }

  #[test]
  fn test_zero_or_absent_eps() {
    let quotes = vec![quote("2023-03-31", Some(5800.0))];

    let zero = price_earnings_ratio(&[record("2023-03-31", Some(0.0))], &quotes);
    assert_eq!(zero.per, Metric::NoData(NoDataReason::ZeroDenominator));

    let absent = price_earnings_ratio(&[record("2023-03-31", None)], &quotes);
    assert_eq!(absent.per, Metric::NoData(NoDataReason::MissingInput));
  }

  #[test]
  fn test_negative_eps_keeps_sign() {
    let quotes = vec![quote("2023-03-31", Some(500.0))];
    let result = price_earnings_ratio(&[record("2023-03-31", Some(-25.0))], &quotes);
    assert_some_approx_eq(result.per.value(), -20.0);
  }

  #[test]
  fn test_join_is_left_and_ordered() {
    let records = vec![
      record("2022-06-30", Some(1.0)),
      record("2022-09-30", Some(2.0)),
      record("2022-12-31", Some(3.0)),
    ];
    let quotes = vec![quote("2022-12-31", None), quote("2022-06-30", Some(10.0))];

    let joined = join_quotes(&records, &quotes);
    assert_eq!(joined.len(), 3);
    assert!(joined[0].matched);
    assert_eq!(joined[0].close, Some(10.0));
    assert!(!joined[1].matched);
    // matched day with a null close
    assert!(joined[2].matched);
    assert_eq!(joined[2].close, None);
  }

  #[test]
  fn test_empty_records() {
    let result = price_earnings_ratio(&[], &[]);
    assert!(result.per.is_no_data());
  }
}
