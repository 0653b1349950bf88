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

//! Forecast estimator
//!
//! A naive trend continuation: it assumes the change seen over the last four
//! filings repeats once more. It is not a statistical forecast and carries no
//! confidence measure.

use crate::error::Result;
use crate::ratios::{checked_div, rounded, DerivedRatioRecord};
use crate::yoy::lookback_pair;
use serde::{Deserialize, Serialize};

/// Forward estimates derived from the latest and year-earlier records
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
  /// `ROS[latest] / ROS[latest - 4]`, unrounded
  pub per_change: Option<f64>,
  /// `round2(ROS[latest] * per_change)`
  pub forecast_ros: Option<f64>,
  /// `round2(NetSales[latest] / NetSales[latest - 4])`, a multiple
  pub forecast_growth_rate: Option<f64>,
}

/// Project operating margin and sales growth one year forward
pub fn forecast(records: &[DerivedRatioRecord]) -> Result<Forecast> {
  let (latest, prior) = lookback_pair(records)?;

  let per_change = checked_div(latest.ros, prior.ros);
  let forecast_ros = match (latest.ros, per_change) {
    (Some(ros), Some(change)) => rounded(ros * change),
    _ => None,
  };
  let forecast_growth_rate =
    checked_div(latest.statement.net_sales, prior.statement.net_sales).and_then(rounded);

  Ok(Forecast { per_change, forecast_ros, forecast_growth_rate })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::coercion::CoercedStatement;
  use crate::error::AnalysisError;
  use jq_core::test_utils::assert_some_approx_eq;

  fn record(net_sales: Option<f64>, ros: Option<f64>) -> DerivedRatioRecord {
    DerivedRatioRecord {
      statement: CoercedStatement { net_sales, ..Default::default() },
      roa: None,
      ros,
      tot: None,
      roe: None,
      fl: None,
    }
  }

  fn history(first: DerivedRatioRecord, last: DerivedRatioRecord) -> Vec<DerivedRatioRecord> {
    let filler = record(Some(1.0), Some(1.0));
    vec![first, filler.clone(), filler.clone(), filler, last]
  }

  #[test]
  fn test_growth_rate_multiple() {
    let records = history(record(Some(80.0), Some(10.0)), record(Some(100.0), Some(12.0)));
    let forecast = forecast(&records).unwrap();
    assert_some_approx_eq(forecast.forecast_growth_rate, 1.25);
  }

  #[test]
  fn test_forecast_ros_repeats_change() {
    let records = history(record(Some(80.0), Some(10.0)), record(Some(100.0), Some(12.0)));
    let forecast = forecast(&records).unwrap();
    assert_some_approx_eq(forecast.per_change, 1.2);
    // 12 * 1.2
    assert_some_approx_eq(forecast.forecast_ros, 14.4);
  }

  #[test]
  fn test_zero_prior_gives_no_data() {
    let records = history(record(Some(0.0), Some(0.0)), record(Some(100.0), Some(12.0)));
    let forecast = forecast(&records).unwrap();
    assert_eq!(forecast.per_change, None);
    assert_eq!(forecast.forecast_ros, None);
    assert_eq!(forecast.forecast_growth_rate, None);
  }

  #[test]
  fn test_absent_ratio_propagates() {
    let records = history(record(Some(80.0), Some(10.0)), record(None, None));
    let forecast = forecast(&records).unwrap();
    assert_eq!(forecast.forecast_ros, None);
    assert_eq!(forecast.forecast_growth_rate, None);
  }

  #[test]
  fn test_insufficient_history() {
    let records = vec![record(Some(1.0), Some(1.0)); 3];
    assert_eq!(
      forecast(&records),
      Err(AnalysisError::InsufficientHistory { required: 5, available: 3 })
    );
  }
}
