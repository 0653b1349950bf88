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

//! Values handed to the rendering surface

use serde::{Deserialize, Serialize};

/// Why a metric has no value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoDataReason {
  /// An input figure was not disclosed
  MissingInput,
  /// The denominator was exactly zero
  ZeroDenominator,
  /// Fewer statement periods than the lookback needs
  InsufficientHistory,
  /// No trading day matched the statement's period end
  UnmatchedQuote,
}

impl std::fmt::Display for NoDataReason {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      NoDataReason::MissingInput => write!(f, "input not disclosed"),
      NoDataReason::ZeroDenominator => write!(f, "zero denominator"),
      NoDataReason::InsufficientHistory => write!(f, "insufficient history"),
      NoDataReason::UnmatchedQuote => write!(f, "no quote on period end"),
    }
  }
}

/// A rounded number, or an explicit "no data" marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "MetricRepr")]
pub enum Metric {
  Value(f64),
  NoData(NoDataReason),
}

impl Metric {
  /// Wrap an optional value, attributing absence to `reason`
  pub fn from_option(value: Option<f64>, reason: NoDataReason) -> Self {
    match value {
      Some(value) => Metric::Value(value),
      None => Metric::NoData(reason),
    }
  }

  /// Wrap the result of `numerator / denominator`, explaining absence from the inputs
  pub fn from_division(
    value: Option<f64>,
    numerator: Option<f64>,
    denominator: Option<f64>,
  ) -> Self {
    match value {
      Some(value) => Metric::Value(value),
      None => Metric::NoData(explain_division(numerator, denominator)),
    }
  }

  pub fn value(&self) -> Option<f64> {
    match self {
      Metric::Value(value) => Some(*value),
      Metric::NoData(_) => None,
    }
  }

  pub fn reason(&self) -> Option<NoDataReason> {
    match self {
      Metric::Value(_) => None,
      Metric::NoData(reason) => Some(*reason),
    }
  }

  pub fn is_no_data(&self) -> bool {
    matches!(self, Metric::NoData(_))
  }
}

/// Reason an undefined quotient is undefined
pub fn explain_division(numerator: Option<f64>, denominator: Option<f64>) -> NoDataReason {
  match (numerator, denominator) {
    (Some(_), Some(d)) if d == 0.0 => NoDataReason::ZeroDenominator,
    _ => NoDataReason::MissingInput,
  }
}

/// Wire shape of a metric: `{"value": 1.5}` or `{"value": null, "reason": "..."}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct MetricRepr {
  value: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  reason: Option<NoDataReason>,
}

impl From<Metric> for MetricRepr {
  fn from(metric: Metric) -> Self {
    MetricRepr { value: metric.value(), reason: metric.reason() }
  }
}
