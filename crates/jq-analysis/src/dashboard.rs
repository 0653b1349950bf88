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

//! End-to-end derivation for one dashboard load
//!
//! coercion -> per-period ratios -> (YoY comparison, forecast, PER), the last
//! three computed independently once the ratio sequence is complete.

use crate::coercion::{coerce_quotes, AdjustedQuote};
use crate::error::{AnalysisError, Result};
use crate::forecast::forecast;
use crate::metric::{explain_division, Metric, NoDataReason};
use crate::price_ratio::{price_earnings_ratio, PriceEarnings};
use crate::ratios::{derive_ratios, DerivedRatioRecord, RatioKind};
use crate::yoy::{compare, lookback_aligned, lookback_pair};
use chrono::NaiveDate;
use jq_models::{CompanyInfo, DailyQuote, StatementRecord};
use serde::Serialize;
use tracing::{debug, warn};

/// The three record collections a dashboard load consumes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDataset {
  pub company: Vec<CompanyInfo>,
  pub quotes: Vec<DailyQuote>,
  pub statements: Vec<StatementRecord>,
}

/// Latest value of a ratio with its change against four filings earlier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricCard {
  pub kind: RatioKind,
  pub value: Metric,
  pub delta: Metric,
}

/// Forward estimates as rendered
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastCard {
  pub forecast_ros: Metric,
  pub forecast_growth_rate: Metric,
}

/// Period the headline figures refer to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestPeriod {
  pub period_end: Option<NaiveDate>,
  pub period_type: String,
}

/// Everything the rendering surface needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
  pub company: Option<CompanyInfo>,
  pub quotes: Vec<AdjustedQuote>,
  pub ratios: Vec<DerivedRatioRecord>,
  pub latest_period: LatestPeriod,
  /// `Some(false)` when the lookback record has another period-type label
  pub lookback_aligned: Option<bool>,
  pub year_over_year: Vec<MetricCard>,
  pub forecast: ForecastCard,
  pub price_earnings: PriceEarnings,
}

/// Ratios shown as metric cards with a YoY delta
pub const YOY_KINDS: [RatioKind; 4] =
  [RatioKind::Roa, RatioKind::Ros, RatioKind::Tot, RatioKind::Roe];

/// Run the whole pipeline over one dataset
///
/// Fails only when there are no statements at all.
pub fn build_report(dataset: &RawDataset) -> Result<DashboardReport> {
  let (ratios, quotes) = rayon::join(
    || derive_ratios(&dataset.statements),
    || coerce_quotes(&dataset.quotes),
  );
  let ratios = ratios?;

  let latest = ratios.last().ok_or(AnalysisError::EmptyStatements)?;
  let latest_period = LatestPeriod {
    period_end: latest.statement.period_end,
    period_type: latest.statement.period_type.clone(),
  };

  let lookback_aligned = lookback_aligned(&ratios).ok();
  if lookback_aligned == Some(false) {
    if let Ok((latest, prior)) = lookback_pair(&ratios) {
      warn!(
        latest = %latest.statement.period_type,
        prior = %prior.statement.period_type,
        "positional lookback compares different period types"
      );
    }
  }

  let ((year_over_year, forecast), price_earnings) = rayon::join(
    || rayon::join(|| metric_cards(&ratios), || forecast_card(&ratios)),
    || price_earnings_ratio(&ratios, &quotes),
  );

  debug!(
    periods = ratios.len(),
    quotes = quotes.len(),
    per = ?price_earnings.per.value(),
    "dashboard report built"
  );

  Ok(DashboardReport {
    company: dataset.company.first().cloned(),
    quotes,
    ratios,
    latest_period,
    lookback_aligned,
    year_over_year,
    forecast,
    price_earnings,
  })
}

fn metric_cards(ratios: &[DerivedRatioRecord]) -> Vec<MetricCard> {
  YOY_KINDS.iter().map(|kind| metric_card(ratios, *kind)).collect()
}

fn metric_card(ratios: &[DerivedRatioRecord], kind: RatioKind) -> MetricCard {
  let value = match ratios.last() {
    Some(latest) => Metric::from_option(kind.of(latest), latest.explain(kind)),
    None => Metric::NoData(NoDataReason::MissingInput),
  };

  let delta = match (compare(ratios, kind), lookback_pair(ratios)) {
    (Ok(comparison), Ok((latest, prior))) => {
      // blame the operand that is actually absent
      let reason =
        if comparison.latest.is_none() { latest.explain(kind) } else { prior.explain(kind) };
      Metric::from_option(comparison.delta, reason)
    }
    _ => Metric::NoData(NoDataReason::InsufficientHistory),
  };

  MetricCard { kind, value, delta }
}

fn forecast_card(ratios: &[DerivedRatioRecord]) -> ForecastCard {
  let (estimate, pair) = match (forecast(ratios), lookback_pair(ratios)) {
    (Ok(estimate), Ok(pair)) => (estimate, pair),
    _ => {
      let missing = Metric::NoData(NoDataReason::InsufficientHistory);
      return ForecastCard { forecast_ros: missing, forecast_growth_rate: missing };
    }
  };
  let (latest, prior) = pair;

  let forecast_ros = match estimate.forecast_ros {
    Some(value) => Metric::Value(value),
    None if estimate.per_change.is_none() => {
      Metric::NoData(explain_division(latest.ros, prior.ros))
    }
    None => Metric::NoData(NoDataReason::MissingInput),
  };

  ForecastCard {
    forecast_ros,
    forecast_growth_rate: Metric::from_division(
      estimate.forecast_growth_rate,
      latest.statement.net_sales,
      prior.statement.net_sales,
    ),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use jq_core::test_utils::assert_some_approx_eq;
  use jq_models::RawField;

  const PERIODS: [(&str, &str); 6] = [
    ("2022-06-30", "1Q"),
    ("2022-09-30", "2Q"),
    ("2022-12-31", "3Q"),
    ("2023-03-31", "FY"),
    ("2023-06-30", "1Q"),
    ("2023-09-30", "2Q"),
  ];

  fn statement(index: usize, net_sales: f64, operating_profit: f64) -> StatementRecord {
    let (period_end, period_type) = PERIODS[index];
    StatementRecord {
      disclosed_date: period_end.to_string(),
      current_period_end_date: period_end.to_string(),
      type_of_current_period: period_type.to_string(),
      net_sales: Some(RawField::Text(net_sales.to_string())),
      operating_profit: Some(RawField::Text(operating_profit.to_string())),
      profit: Some(RawField::from("50")),
      earnings_per_share: Some(RawField::from("40")),
      total_assets: Some(RawField::from("1000")),
      equity: Some(RawField::from("500")),
      ..Default::default()
    }
  }

  fn quote(date: &str, close: f64) -> DailyQuote {
    DailyQuote {
      date: date.to_string(),
      adjustment_close: Some(RawField::Number(close)),
      ..Default::default()
    }
  }

  fn dataset(count: usize) -> RawDataset {
    RawDataset {
      company: vec![CompanyInfo { code: "79740".to_string(), ..Default::default() }],
      quotes: vec![quote("2023-06-30", 6000.0), quote("2023-09-29", 6200.0)],
      statements: (0..count)
        .map(|i| statement(i, 80.0 + 5.0 * i as f64, 10.0 + i as f64))
        .collect(),
    }
  }

  #[test]
  fn test_full_history_report() {
    let report = build_report(&dataset(6)).unwrap();

    assert_eq!(report.ratios.len(), 6);
    assert_eq!(report.latest_period.period_type, "2Q");
    assert_eq!(report.lookback_aligned, Some(true));
    assert_eq!(report.company.as_ref().unwrap().code, "79740");

    // latest OP 15 / TA 1000, four filings back OP 11 / TA 1000
    let roa = &report.year_over_year[0];
    assert_eq!(roa.kind, RatioKind::Roa);
    assert_some_approx_eq(roa.value.value(), 1.5);
    assert_some_approx_eq(roa.delta.value(), 0.4);

    // net sales 105 vs 85
    assert_some_approx_eq(report.forecast.forecast_growth_rate.value(), 1.24);
    assert!(report.forecast.forecast_ros.value().is_some());

    // 2023-09-30 is a Saturday: no fallback to the 2023-06-30 close
    assert_eq!(report.price_earnings.per, Metric::NoData(NoDataReason::UnmatchedQuote));
  }

  #[test]
  fn test_short_history_reports_insufficient() {
    let report = build_report(&dataset(3)).unwrap();

    assert_eq!(report.lookback_aligned, None);
    for card in &report.year_over_year {
      assert!(card.value.value().is_some());
      assert_eq!(card.delta, Metric::NoData(NoDataReason::InsufficientHistory));
    }
    assert_eq!(
      report.forecast.forecast_growth_rate,
      Metric::NoData(NoDataReason::InsufficientHistory)
    );
  }

  #[test]
  fn test_per_on_matching_trading_day() {
    let mut data = dataset(5);
    // latest period 2023-06-30 has a quote at 6000 with EPS 40
    data.quotes.push(quote("2023-06-30", 9999.0));
    let report = build_report(&data).unwrap();
    assert_some_approx_eq(report.price_earnings.per.value(), 150.0);
  }

  #[test]
  fn test_zero_net_sales_in_lookback() {
    let mut data = dataset(5);
    data.statements[0].net_sales = Some(RawField::from("0"));
    let report = build_report(&data).unwrap();
    assert_eq!(
      report.forecast.forecast_growth_rate,
      Metric::NoData(NoDataReason::ZeroDenominator)
    );
    assert_eq!(report.forecast.forecast_ros, Metric::NoData(NoDataReason::MissingInput));
  }

  #[test]
  fn test_delta_reason_follows_missing_operand() {
    let mut data = dataset(5);
    data.statements[4].net_sales = Some(RawField::from("0"));
    data.statements[0].total_assets = Some(RawField::from(""));
    let report = build_report(&data).unwrap();

    let ros = &report.year_over_year[1];
    assert_eq!(ros.kind, RatioKind::Ros);
    assert_eq!(ros.value, Metric::NoData(NoDataReason::ZeroDenominator));
    assert_eq!(ros.delta, Metric::NoData(NoDataReason::ZeroDenominator));

    // latest ROA is present, the one four filings back has no total assets
    let roa = &report.year_over_year[0];
    assert!(roa.value.value().is_some());
    assert_eq!(roa.delta, Metric::NoData(NoDataReason::MissingInput));
  }

  #[test]
  fn test_empty_statements_fail() {
    let data = RawDataset::default();
    assert_eq!(build_report(&data), Err(AnalysisError::EmptyStatements));
  }

  #[test]
  fn test_report_serializes_no_data_as_null() {
    let report = build_report(&dataset(3)).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["forecast"]["forecast_ros"]["value"], serde_json::Value::Null);
    assert_eq!(json["forecast"]["forecast_ros"]["reason"], "insufficient_history");
    assert_eq!(json["ratios"][0]["period_type"], "1Q");
  }
}
