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

//! Ratio engine
//!
//! Derives five ratios per statement period. A ratio is `None` when an input
//! is absent or the denominator is exactly zero; negative denominators are
//! valid and keep their sign.

use crate::coercion::CoercedStatement;
use crate::error::{AnalysisError, Result};
use crate::metric::{explain_division, NoDataReason};
use jq_models::StatementRecord;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Round to 2 decimal places, half away from zero
pub fn round2(value: f64) -> f64 {
  let rounded = (value * 100.0).round() / 100.0;
  // collapse -0.0
  if rounded == 0.0 { 0.0 } else { rounded }
}

/// Round a finite value to 2 decimals; `None` for NaN or infinity
pub fn rounded(value: f64) -> Option<f64> {
  if !value.is_finite() {
    return None;
  }
  let value = round2(value);
  value.is_finite().then_some(value)
}

/// Unrounded `numerator / denominator`, absent on absent input or zero denominator
pub fn checked_div(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
  let (numerator, denominator) = (numerator?, denominator?);
  if denominator == 0.0 {
    return None;
  }
  let quotient = numerator / denominator;
  quotient.is_finite().then_some(quotient)
}

/// `round2(numerator / denominator * scale)` under the `checked_div` rules
pub fn checked_ratio(numerator: Option<f64>, denominator: Option<f64>, scale: f64) -> Option<f64> {
  checked_div(numerator, denominator).and_then(|quotient| rounded(quotient * scale))
}

/// The five derived ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatioKind {
  /// Return on assets, operating profit basis (%)
  Roa,
  /// Return on sales, operating margin (%)
  Ros,
  /// Total asset turnover (times)
  Tot,
  /// Return on equity, net profit basis (%)
  Roe,
  /// Financial leverage (times)
  Fl,
}

impl RatioKind {
  pub const ALL: [RatioKind; 5] =
    [RatioKind::Roa, RatioKind::Ros, RatioKind::Tot, RatioKind::Roe, RatioKind::Fl];

  /// Short label used in tables
  pub fn label(&self) -> &'static str {
    match self {
      RatioKind::Roa => "ROA",
      RatioKind::Ros => "ROS",
      RatioKind::Tot => "TOT",
      RatioKind::Roe => "ROE",
      RatioKind::Fl => "FL",
    }
  }

  /// Descriptive name
  pub fn name(&self) -> &'static str {
    match self {
      RatioKind::Roa => "ROA (operating profit basis)",
      RatioKind::Ros => "Operating margin",
      RatioKind::Tot => "Total asset turnover",
      RatioKind::Roe => "ROE (net profit basis)",
      RatioKind::Fl => "Financial leverage",
    }
  }

  /// Display unit of the ratio
  pub fn unit(&self) -> &'static str {
    match self {
      RatioKind::Roa | RatioKind::Ros | RatioKind::Roe => "%",
      RatioKind::Tot | RatioKind::Fl => "times",
    }
  }

  fn scale(&self) -> f64 {
    match self {
      RatioKind::Roa | RatioKind::Ros | RatioKind::Roe => 100.0,
      RatioKind::Tot | RatioKind::Fl => 1.0,
    }
  }

  /// `(numerator, denominator)` of the ratio for one statement
  pub fn inputs(&self, statement: &CoercedStatement) -> (Option<f64>, Option<f64>) {
    match self {
      RatioKind::Roa => (statement.operating_profit, statement.total_assets),
      RatioKind::Ros => (statement.operating_profit, statement.net_sales),
      RatioKind::Tot => (statement.net_sales, statement.total_assets),
      RatioKind::Roe => (statement.net_profit, statement.equity),
      RatioKind::Fl => (statement.total_assets, statement.equity),
    }
  }

  /// Compute the ratio for one statement
  pub fn compute(&self, statement: &CoercedStatement) -> Option<f64> {
    let (numerator, denominator) = self.inputs(statement);
    checked_ratio(numerator, denominator, self.scale())
  }

  /// Read the precomputed ratio off a derived record
  pub fn of(&self, record: &DerivedRatioRecord) -> Option<f64> {
    match self {
      RatioKind::Roa => record.roa,
      RatioKind::Ros => record.ros,
      RatioKind::Tot => record.tot,
      RatioKind::Roe => record.roe,
      RatioKind::Fl => record.fl,
    }
  }
}

impl std::fmt::Display for RatioKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.label())
  }
}

/// A coerced statement plus its derived ratios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRatioRecord {
  #[serde(flatten)]
  pub statement: CoercedStatement,
  pub roa: Option<f64>,
  pub ros: Option<f64>,
  pub tot: Option<f64>,
  pub roe: Option<f64>,
  pub fl: Option<f64>,
}

impl DerivedRatioRecord {
  pub fn from_statement(statement: CoercedStatement) -> Self {
    DerivedRatioRecord {
      roa: RatioKind::Roa.compute(&statement),
      ros: RatioKind::Ros.compute(&statement),
      tot: RatioKind::Tot.compute(&statement),
      roe: RatioKind::Roe.compute(&statement),
      fl: RatioKind::Fl.compute(&statement),
      statement,
    }
  }

  /// Why `kind` is absent on this record
  pub fn explain(&self, kind: RatioKind) -> NoDataReason {
    let (numerator, denominator) = kind.inputs(&self.statement);
    explain_division(numerator, denominator)
  }
}

/// Coerce every statement and derive its ratios, preserving order
pub fn derive_ratios(statements: &[StatementRecord]) -> Result<Vec<DerivedRatioRecord>> {
  if statements.is_empty() {
    return Err(AnalysisError::EmptyStatements);
  }

  let records: Vec<DerivedRatioRecord> = statements
    .par_iter()
    .map(|raw| DerivedRatioRecord::from_statement(CoercedStatement::from(raw)))
    .collect();

  debug!(periods = records.len(), "derived ratio records");
  Ok(records)
}

#[cfg(test)]
mod tests {
  use super::*;
  use jq_core::test_utils::{assert_approx_zero, assert_percentage_eq, assert_some_approx_eq};
  use jq_models::RawField;

  fn statement(
    net_sales: &str,
    operating_profit: &str,
    profit: &str,
    total_assets: &str,
    equity: &str,
  ) -> StatementRecord {
    StatementRecord {
      current_period_end_date: "2023-03-31".to_string(),
      type_of_current_period: "FY".to_string(),
      net_sales: Some(RawField::from(net_sales)),
      operating_profit: Some(RawField::from(operating_profit)),
      profit: Some(RawField::from(profit)),
      total_assets: Some(RawField::from(total_assets)),
      equity: Some(RawField::from(equity)),
      ..Default::default()
    }
  }

  #[test]
  fn test_round2() {
    assert_eq!(round2(18.5), 18.5);
    assert_eq!(round2(1.23456), 1.23);
    assert_eq!(round2(-1.23556), -1.24);
    assert_eq!(round2(0.125), 0.13);
    assert_eq!(round2(-0.001).to_string(), "0");
    assert_approx_zero(round2(0.004));
  }

  #[test]
  fn test_roa_from_operating_profit_and_assets() {
    let records = derive_ratios(&[statement("100", "37", "10", "200", "100")]).unwrap();
    assert_some_approx_eq(records[0].roa, 18.5);
    assert_some_approx_eq(records[0].ros, 37.0);
    assert_some_approx_eq(records[0].tot, 0.5);
    assert_some_approx_eq(records[0].roe, 10.0);
    assert_some_approx_eq(records[0].fl, 2.0);
  }

  #[test]
  fn test_negative_equity_keeps_sign() {
    let records = derive_ratios(&[statement("100", "37", "10", "200", "-50")]).unwrap();
    assert_some_approx_eq(records[0].fl, -4.0);
    assert_percentage_eq(records[0].roe.unwrap(), -20.0);
  }

  #[test]
  fn test_zero_and_absent_denominators() {
    let records = derive_ratios(&[statement("0", "37", "", "200", "0")]).unwrap();
    let record = &records[0];
    assert_eq!(record.ros, None);
    assert_eq!(record.explain(RatioKind::Ros), NoDataReason::ZeroDenominator);
    assert_eq!(record.fl, None);
    assert_eq!(record.roe, None);
    assert_eq!(record.explain(RatioKind::Roe), NoDataReason::MissingInput);
    // zero numerator is a legitimate zero
    assert_eq!(record.tot, Some(0.0));
    assert_some_approx_eq(record.roa, 18.5);
  }

  #[test]
  fn test_results_are_rounded_to_two_decimals() {
    let records = derive_ratios(&[statement("3", "1", "1", "3", "7")]).unwrap();
    assert_percentage_eq(records[0].roa.unwrap(), 33.33);
    assert_eq!(records[0].ros, Some(33.33));
    assert_eq!(records[0].roe, Some(14.29));
    assert_eq!(records[0].fl, Some(0.43));
  }

  #[test]
  fn test_order_is_preserved() {
    let statements: Vec<StatementRecord> = (1..=40)
      .map(|i| statement("100", &i.to_string(), "1", "100", "100"))
      .collect();
    let records = derive_ratios(&statements).unwrap();
    let roas: Vec<f64> = records.iter().map(|r| r.roa.unwrap()).collect();
    let expected: Vec<f64> = (1..=40).map(f64::from).collect();
    assert_eq!(roas, expected);
  }

  #[test]
  fn test_empty_statements_rejected() {
    assert_eq!(derive_ratios(&[]), Err(AnalysisError::EmptyStatements));
  }

  #[test]
  fn test_labels_and_units() {
    assert_eq!(RatioKind::Roa.label(), "ROA");
    assert_eq!(RatioKind::Tot.unit(), "times");
    assert_eq!(RatioKind::Roe.unit(), "%");
    assert_eq!(RatioKind::ALL.len(), 5);
  }
}
