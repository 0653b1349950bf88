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

//! Terminal rendering of a dashboard report
//!
//! Every section is built as a `String` so the commands decide where it goes.
//! A figure that could not be computed is always printed as `no data`.

use crate::period::DateRange;
use colored::Colorize;
use jq_analysis::dashboard::LatestPeriod;
use jq_analysis::{
  AdjustedQuote, DashboardReport, DerivedRatioRecord, Metric, MetricCard, RatioKind,
};
use jq_models::CompanyInfo;
use prettytable::{format, row, Table};

/// Placeholder for every absent figure
pub const NO_DATA: &str = "no data";

/// Default width of bar charts and the sparkline, in characters
pub const DEFAULT_CHART_WIDTH: usize = 40;

const SPARK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

const TREND_NOTE: &str = "Forecasts assume the change over the last four filings repeats once \
more. They are a naive trend continuation, not a statistical estimate.";

/// The whole dashboard, top to bottom
pub fn render_dashboard(
  report: &DashboardReport,
  range: Option<&DateRange>,
  width: usize,
) -> String {
  let mut out = String::new();

  out.push_str(&company_table(report.company.as_ref()));
  out.push('\n');
  out.push_str(&price_summary(&report.quotes, range, width));
  out.push('\n');

  out.push_str(&format!("{}\n", "Financial ratios".bold()));
  out.push_str(&ratio_table(&report.ratios));
  out.push_str(&period_caption(&report.latest_period));
  out.push('\n');
  if report.lookback_aligned == Some(false) {
    out.push_str(&format!(
      "{}\n",
      "note: the year-earlier filing has a different period type".yellow()
    ));
  }
  out.push('\n');

  out.push_str(&metric_cards(&report.year_over_year));
  out.push('\n');
  out.push_str(&bar_chart("ROA vs ROE", &report.ratios, &[RatioKind::Roa, RatioKind::Roe], width));
  out.push('\n');
  out.push_str(&bar_chart(
    "ROE breakdown",
    &report.ratios,
    &[RatioKind::Ros, RatioKind::Tot, RatioKind::Fl],
    width,
  ));
  out.push('\n');
  out.push_str(&forecast_cards(report));

  out
}

/// A number with two decimals and a unit, or `no data`
pub fn fmt_value(value: Option<f64>, unit: &str) -> String {
  match value {
    Some(value) if unit.is_empty() => format!("{:.2}", value),
    Some(value) => format!("{:.2} {}", value, unit),
    None => NO_DATA.to_string(),
  }
}

pub fn fmt_metric(metric: &Metric, unit: &str) -> String {
  fmt_value(metric.value(), unit)
}

/// Signed change, green when positive and red when negative
pub fn fmt_delta(delta: &Metric, unit: &str) -> String {
  match delta.value() {
    Some(value) if value > 0.0 => format!("+{}", fmt_value(Some(value), unit)).green().to_string(),
    Some(value) if value < 0.0 => fmt_value(Some(value), unit).red().to_string(),
    Some(value) => format!("±{}", fmt_value(Some(value), unit)),
    None => NO_DATA.to_string(),
  }
}

fn text_or_no_data(text: &str) -> &str {
  if text.trim().is_empty() {
    NO_DATA
  } else {
    text
  }
}

pub fn company_table(company: Option<&CompanyInfo>) -> String {
  let Some(company) = company else {
    return format!("{}: {}\n", "Company".bold(), NO_DATA);
  };

  let mut table = Table::new();
  table.set_format(*format::consts::FORMAT_BOX_CHARS);
  table.add_row(row!["Code", text_or_no_data(&company.code)]);
  table.add_row(row!["Name", text_or_no_data(&company.company_name)]);
  table.add_row(row!["English name", text_or_no_data(&company.company_name_english)]);
  table.add_row(row!["Sector (17)", text_or_no_data(&company.sector17_code_name)]);
  table.add_row(row!["Sector (33)", text_or_no_data(&company.sector33_code_name)]);
  table.add_row(row!["Scale", text_or_no_data(&company.scale_category)]);
  table.add_row(row!["Market", text_or_no_data(&company.market_code_name)]);

  format!("{}\n{}as of {}\n", "Company".bold(), table, text_or_no_data(&company.date))
}

/// Selected range, adjusted OHLC extremes and a sparkline of the close
pub fn price_summary(quotes: &[AdjustedQuote], range: Option<&DateRange>, width: usize) -> String {
  let shown_range = match (range, quotes.first(), quotes.last()) {
    (Some(range), _, _) => range.to_string(),
    (None, Some(first), Some(last)) => format!("{} .. {}", first.date, last.date),
    _ => NO_DATA.to_string(),
  };
  let mut out = format!("{}  {}\n", "Prices".bold(), shown_range);

  if quotes.is_empty() {
    out.push_str(&format!("{}\n", NO_DATA));
    return out;
  }

  let mut table = Table::new();
  table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
  table.set_titles(row!["", "Min", "Max", "Latest"]);
  let series: [(&str, fn(&AdjustedQuote) -> Option<f64>); 4] = [
    ("Open", |q| q.open),
    ("High", |q| q.high),
    ("Low", |q| q.low),
    ("Close", |q| q.close),
  ];
  for (name, field) in series {
    let values: Vec<f64> = quotes.iter().filter_map(field).collect();
    let min = values.iter().copied().reduce(f64::min);
    let max = values.iter().copied().reduce(f64::max);
    let latest = quotes.last().and_then(field);
    table.add_row(row![name, fmt_value(min, ""), fmt_value(max, ""), fmt_value(latest, "")]);
  }
  out.push_str(&table.to_string());

  let closes: Vec<Option<f64>> = quotes.iter().map(|q| q.close).collect();
  out.push_str(&format!("close {}\n", sparkline(&closes, width)));
  out
}

/// One glyph per bucket of values; a gap where a bucket has no value
pub fn sparkline(values: &[Option<f64>], width: usize) -> String {
  if values.is_empty() || width == 0 {
    return String::new();
  }

  let count = width.min(values.len());
  let buckets: Vec<Option<f64>> = (0..count)
    .map(|i| {
      let bucket = &values[i * values.len() / count..(i + 1) * values.len() / count];
      let present: Vec<f64> = bucket.iter().flatten().copied().collect();
      if present.is_empty() {
        None
      } else {
        Some(present.iter().sum::<f64>() / present.len() as f64)
      }
    })
    .collect();

  let present = buckets.iter().flatten().copied();
  let (lo, hi) = present.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
    (lo.min(v), hi.max(v))
  });

  buckets
    .iter()
    .map(|bucket| match bucket {
      Some(value) if hi > lo => {
        let level = ((value - lo) / (hi - lo) * (SPARK.len() - 1) as f64).round() as usize;
        SPARK[level.min(SPARK.len() - 1)]
      }
      Some(_) => SPARK[0],
      None => ' ',
    })
    .collect()
}

fn period_label(record: &DerivedRatioRecord) -> String {
  let end = record.statement.period_end.map(|d| d.to_string());
  format!("{} {}", end.as_deref().unwrap_or(NO_DATA), record.statement.period_type)
}

/// One row per period with all five ratios
pub fn ratio_table(ratios: &[DerivedRatioRecord]) -> String {
  let mut table = Table::new();
  table.set_format(*format::consts::FORMAT_BOX_CHARS);
  table.set_titles(row!["Period end", "Type", "ROA %", "ROS %", "TOT", "ROE %", "FL"]);

  for record in ratios {
    let end = record.statement.period_end.map(|d| d.to_string());
    table.add_row(row![
      end.as_deref().unwrap_or(NO_DATA),
      text_or_no_data(&record.statement.period_type),
      fmt_value(record.roa, ""),
      fmt_value(record.ros, ""),
      fmt_value(record.tot, ""),
      fmt_value(record.roe, ""),
      fmt_value(record.fl, "")
    ]);
  }

  table.to_string()
}

pub fn period_caption(latest: &LatestPeriod) -> String {
  let end = latest.period_end.map(|d| d.to_string());
  format!(
    "as of {} / {}\n",
    end.as_deref().unwrap_or(NO_DATA),
    text_or_no_data(&latest.period_type)
  )
}

/// Latest value and YoY change of each card
pub fn metric_cards(cards: &[MetricCard]) -> String {
  let mut out = String::new();
  for card in cards {
    out.push_str(&format!(
      "{:<30} {:>14}   YoY {}\n",
      card.kind.name().bold(),
      fmt_metric(&card.value, card.kind.unit()),
      fmt_delta(&card.delta, card.kind.unit())
    ));
  }
  out
}

/// Horizontal bars per period, each ratio scaled to its own largest magnitude
pub fn bar_chart(
  title: &str,
  ratios: &[DerivedRatioRecord],
  kinds: &[RatioKind],
  width: usize,
) -> String {
  let mut out = format!("{}\n", title.bold());
  let scales: Vec<f64> = kinds
    .iter()
    .map(|kind| ratios.iter().filter_map(|r| kind.of(r)).map(f64::abs).fold(0.0, f64::max))
    .collect();

  for record in ratios {
    let label = period_label(record);
    for (kind, scale) in kinds.iter().zip(&scales) {
      let line = match kind.of(record) {
        Some(value) => format!("{} {:.2}", bar(value, *scale, width), value),
        None => NO_DATA.to_string(),
      };
      out.push_str(&format!("  {:<16} {:<4} {}\n", label, kind.label(), line));
    }
  }
  out
}

fn bar(value: f64, scale: f64, width: usize) -> String {
  if scale <= 0.0 || value == 0.0 {
    return String::new();
  }
  let length = ((value.abs() / scale) * width as f64).round().max(1.0) as usize;
  let glyph = if value < 0.0 { '▒' } else { '█' };
  std::iter::repeat(glyph).take(length).collect()
}

/// PER, forecast operating margin and forecast sales growth
pub fn forecast_cards(report: &DashboardReport) -> String {
  let cards = [
    ("PER", fmt_metric(&report.price_earnings.per, "times")),
    ("Forecast ROS", fmt_metric(&report.forecast.forecast_ros, "%")),
    ("Forecast sales growth", fmt_metric(&report.forecast.forecast_growth_rate, "times")),
  ];

  let mut out = String::new();
  for (name, value) in cards {
    out.push_str(&format!("{:<30} {:>14}\n", name.bold(), value));
  }
  out.push_str(&format!("{}\n", TREND_NOTE.dimmed()));
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;
  use jq_analysis::{build_report, CoercedStatement, NoDataReason, RawDataset};
  use jq_models::{RawField, StatementRecord};

  fn record(roa: Option<f64>, roe: Option<f64>) -> DerivedRatioRecord {
    DerivedRatioRecord {
      statement: CoercedStatement {
        period_end: NaiveDate::from_ymd_opt(2023, 3, 31),
        period_type: "FY".to_string(),
        ..Default::default()
      },
      roa,
      ros: None,
      tot: None,
      roe,
      fl: None,
    }
  }

  #[test]
  fn test_fmt_value() {
    assert_eq!(fmt_value(Some(18.5), "%"), "18.50 %");
    assert_eq!(fmt_value(Some(1.2), "times"), "1.20 times");
    assert_eq!(fmt_value(None, "%"), NO_DATA);
    assert_eq!(fmt_metric(&Metric::NoData(NoDataReason::ZeroDenominator), "%"), NO_DATA);
  }

  #[test]
  fn test_fmt_delta_sign() {
    assert!(fmt_delta(&Metric::Value(0.4), "%").contains("+0.40 %"));
    assert!(fmt_delta(&Metric::Value(-1.25), "%").contains("-1.25 %"));
    assert_eq!(fmt_delta(&Metric::NoData(NoDataReason::InsufficientHistory), "%"), NO_DATA);
  }

  #[test]
  fn test_sparkline_levels_and_gaps() {
    let values = [Some(1.0), Some(2.0), None, Some(9.0)];
    assert_eq!(sparkline(&values, 4), "▁▂ █");
  }

  #[test]
  fn test_sparkline_downsamples() {
    let values: Vec<Option<f64>> = (0..100).map(|i| Some(i as f64)).collect();
    let line = sparkline(&values, 10);
    assert_eq!(line.chars().count(), 10);
    assert!(line.starts_with('▁'));
    assert!(line.ends_with('█'));
  }

  #[test]
  fn test_sparkline_flat_and_empty() {
    assert_eq!(sparkline(&[Some(3.0), Some(3.0)], 10), "▁▁");
    assert_eq!(sparkline(&[], 10), "");
  }

  #[test]
  fn test_bar_lengths() {
    assert_eq!(bar(5.0, 10.0, 10).chars().count(), 5);
    assert_eq!(bar(-10.0, 10.0, 4), "▒▒▒▒");
    // tiny but non-zero values stay visible
    assert_eq!(bar(0.01, 100.0, 10).chars().count(), 1);
    assert_eq!(bar(0.0, 10.0, 10), "");
  }

  #[test]
  fn test_ratio_table_prints_no_data() {
    let table = ratio_table(&[record(Some(18.5), None)]);
    assert!(table.contains("18.50"));
    assert!(table.contains(NO_DATA));
    assert!(table.contains("2023-03-31"));
  }

  #[test]
  fn test_bar_chart_rows() {
    let kinds = [RatioKind::Roa, RatioKind::Roe];
    let chart = bar_chart("ROA vs ROE", &[record(Some(2.0), None)], &kinds, 8);
    assert!(chart.contains("ROA"));
    assert!(chart.contains("████████ 2.00"));
    assert!(chart.contains(NO_DATA));
  }

  #[test]
  fn test_company_missing() {
    assert!(company_table(None).contains(NO_DATA));
  }

  #[test]
  fn test_dashboard_with_single_period() {
    let dataset = RawDataset {
      company: vec![],
      quotes: vec![],
      statements: vec![StatementRecord {
        current_period_end_date: "2023-03-31".to_string(),
        type_of_current_period: "FY".to_string(),
        net_sales: Some(RawField::from("100")),
        operating_profit: Some(RawField::from("")),
        ..Default::default()
      }],
    };
    let report = build_report(&dataset).unwrap();
    let text = render_dashboard(&report, None, DEFAULT_CHART_WIDTH);

    assert!(text.contains("as of 2023-03-31 / FY"));
    assert!(text.contains(NO_DATA));
    assert!(text.contains("naive trend"));
  }
}
