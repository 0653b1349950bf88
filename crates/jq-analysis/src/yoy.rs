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

//! Year-over-year comparison by positional lookback
//!
//! "One year earlier" is the record four filings before the latest one
//! (index `len - 5`). This assumes exactly four quarterly filings per year
//! with none skipped. It is not a date lookup: restatements, fiscal-year
//! changes or missed quarters silently shift the comparison onto another
//! period. [`lookback_aligned`] reports whether the two records at least
//! carry the same period-type label.

use crate::error::{AnalysisError, Result};
use crate::ratios::{rounded, DerivedRatioRecord, RatioKind};
use serde::{Deserialize, Serialize};

/// Filings between a period and the same period one year earlier
pub const LOOKBACK_PERIODS: usize = 4;

/// Records needed for one lookback: the latest plus four earlier filings
pub const MIN_HISTORY: usize = LOOKBACK_PERIODS + 1;

/// The latest record and the record four filings before it
pub fn lookback_pair(
  records: &[DerivedRatioRecord],
) -> Result<(&DerivedRatioRecord, &DerivedRatioRecord)> {
  if records.len() < MIN_HISTORY {
    return Err(AnalysisError::InsufficientHistory {
      required: MIN_HISTORY,
      available: records.len(),
    });
  }
  Ok((&records[records.len() - 1], &records[records.len() - MIN_HISTORY]))
}

/// Whether the lookback record has the same period-type label as the latest one
pub fn lookback_aligned(records: &[DerivedRatioRecord]) -> Result<bool> {
  let (latest, prior) = lookback_pair(records)?;
  Ok(latest.statement.period_type == prior.statement.period_type)
}

/// `round2(latest - prior)` for one ratio
///
/// `Ok(None)` when either value is absent.
pub fn year_over_year(records: &[DerivedRatioRecord], kind: RatioKind) -> Result<Option<f64>> {
  Ok(compare(records, kind)?.delta)
}

/// Both operands of a year-over-year comparison and their delta
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YoyComparison {
  pub kind: RatioKind,
  pub latest: Option<f64>,
  pub prior: Option<f64>,
  pub delta: Option<f64>,
}

/// Compare the latest value of `kind` with the value four filings earlier
pub fn compare(records: &[DerivedRatioRecord], kind: RatioKind) -> Result<YoyComparison> {
  let (latest, prior) = lookback_pair(records)?;
  let (latest, prior) = (kind.of(latest), kind.of(prior));
  let delta = match (latest, prior) {
    (Some(latest), Some(prior)) => rounded(latest - prior),
    _ => None,
  };
  Ok(YoyComparison { kind, latest, prior, delta })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::coercion::CoercedStatement;
  use jq_core::test_utils::{assert_approx_zero, assert_some_approx_eq};

  fn record(period_type: &str, roa: Option<f64>) -> DerivedRatioRecord {
    DerivedRatioRecord {
      statement: CoercedStatement { period_type: period_type.to_string(), ..Default::default() },
      roa,
      ros: Some(10.0),
      tot: None,
      roe: Some(5.0),
      fl: Some(2.0),
    }
  }

  fn quarters(roas: &[Option<f64>]) -> Vec<DerivedRatioRecord> {
    let labels = ["1Q", "2Q", "3Q", "FY"];
    roas.iter().enumerate().map(|(i, roa)| record(labels[i % 4], *roa)).collect()
  }

  #[test]
  fn test_delta_uses_offset_minus_five() {
    let records = quarters(&[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0), Some(7.25)]);
    // latest = 7.25, len-5 = index 1 = 2.0
    assert_some_approx_eq(year_over_year(&records, RatioKind::Roa).unwrap(), 5.25);
  }

  #[test]
  fn test_delta_is_rounded() {
    let records = quarters(&[Some(0.1), Some(0.0), Some(0.0), Some(0.0), Some(0.3)]);
    assert_eq!(year_over_year(&records, RatioKind::Roa).unwrap(), Some(0.2));
  }

  #[test]
  fn test_flat_ratio_has_zero_delta() {
    let records = quarters(&[Some(3.1); 6]);
    assert_approx_zero(year_over_year(&records, RatioKind::Roa).unwrap().unwrap());
  }

  #[test]
  fn test_absent_operand_gives_no_delta() {
    let records = quarters(&[None, Some(2.0), Some(3.0), Some(4.0), Some(5.0)]);
    let comparison = compare(&records, RatioKind::Roa).unwrap();
    assert_eq!(comparison.prior, None);
    assert_eq!(comparison.latest, Some(5.0));
    assert_eq!(comparison.delta, None);
    assert_eq!(year_over_year(&records, RatioKind::Tot).unwrap(), None);
  }

  #[test]
  fn test_three_periods_is_insufficient_history() {
    let records = quarters(&[Some(1.0), Some(2.0), Some(3.0)]);
    assert_eq!(
      year_over_year(&records, RatioKind::Roa),
      Err(AnalysisError::InsufficientHistory { required: 5, available: 3 })
    );
    assert!(lookback_aligned(&records).is_err());
  }

  #[test]
  fn test_lookback_alignment() {
    let aligned = quarters(&[Some(1.0); 5]);
    assert!(lookback_aligned(&aligned).unwrap());

    let mut skipped = quarters(&[Some(1.0); 5]);
    skipped[0].statement.period_type = "2Q".to_string();
    assert!(!lookback_aligned(&skipped).unwrap());
  }
}
