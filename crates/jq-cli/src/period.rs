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

//! Selectable date range of the dashboard
//!
//! Quotes are searchable over a two-year window that ends twelve weeks before
//! today. Users may narrow the range inside that window but never widen it.

use chrono::{Duration, Local, Months, NaiveDate};
use thiserror::Error;

/// Weeks between today and the end of the searchable window
pub const LAG_WEEKS: i64 = 12;

/// Length of the searchable window
pub const HISTORY_MONTHS: u32 = 24;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
  #[error("{date} is outside the searchable window {start} .. {end}")]
  OutsideWindow { date: NaiveDate, start: NaiveDate, end: NaiveDate },

  #[error("range starts after it ends: {from} > {to}")]
  Inverted { from: NaiveDate, to: NaiveDate },
}

/// Inclusive date range of requested quotes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
  pub from: NaiveDate,
  pub to: NaiveDate,
}

impl DateRange {
  pub fn contains(&self, date: NaiveDate) -> bool {
    self.from <= date && date <= self.to
  }
}

impl std::fmt::Display for DateRange {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} .. {}", self.from, self.to)
  }
}

/// The searchable window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
  pub start: NaiveDate,
  pub end: NaiveDate,
}

impl SearchWindow {
  /// Window as seen on `today`
  pub fn as_of(today: NaiveDate) -> Self {
    let end = today - Duration::weeks(LAG_WEEKS);
    // Feb 29 clamps to Feb 28
    let start = end.checked_sub_months(Months::new(HISTORY_MONTHS)).unwrap_or(NaiveDate::MIN);
    Self { start, end }
  }

  /// Window as seen today, local time
  pub fn current() -> Self {
    Self::as_of(Local::now().date_naive())
  }

  /// The whole window as a range
  pub fn full(&self) -> DateRange {
    DateRange { from: self.start, to: self.end }
  }

  /// Resolve optional user bounds, defaulting to the window edges
  pub fn select(
    &self,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
  ) -> Result<DateRange, PeriodError> {
    let from = from.unwrap_or(self.start);
    let to = to.unwrap_or(self.end);

    for date in [from, to] {
      if !self.full().contains(date) {
        return Err(PeriodError::OutsideWindow { date, start: self.start, end: self.end });
      }
    }
    if from > to {
      return Err(PeriodError::Inverted { from, to });
    }

    Ok(DateRange { from, to })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
  }

  #[test]
  fn test_window_edges() {
    let window = SearchWindow::as_of(date("2024-03-25"));
    assert_eq!(window.end, date("2024-01-01"));
    assert_eq!(window.start, date("2022-01-01"));
  }

  #[test]
  fn test_leap_day_end_clamps() {
    // 2024-05-23 minus 12 weeks is 2024-02-29
    let window = SearchWindow::as_of(date("2024-05-23"));
    assert_eq!(window.end, date("2024-02-29"));
    assert_eq!(window.start, date("2022-02-28"));
  }

  #[test]
  fn test_defaults_to_full_window() {
    let window = SearchWindow::as_of(date("2024-03-25"));
    assert_eq!(window.select(None, None).unwrap(), window.full());
  }

  #[test]
  fn test_narrowed_range() {
    let window = SearchWindow::as_of(date("2024-03-25"));
    let range = window.select(Some(date("2023-04-01")), None).unwrap();
    assert_eq!(range, DateRange { from: date("2023-04-01"), to: date("2024-01-01") });
  }

  #[test]
  fn test_rejects_bounds_outside_window() {
    let window = SearchWindow::as_of(date("2024-03-25"));
    assert!(matches!(
      window.select(None, Some(date("2024-02-01"))),
      Err(PeriodError::OutsideWindow { .. })
    ));
    assert!(matches!(
      window.select(Some(date("2021-12-31")), None),
      Err(PeriodError::OutsideWindow { .. })
    ));
  }

  #[test]
  fn test_rejects_inverted_range() {
    let window = SearchWindow::as_of(date("2024-03-25"));
    assert_eq!(
      window.select(Some(date("2023-06-01")), Some(date("2023-05-01"))),
      Err(PeriodError::Inverted { from: date("2023-06-01"), to: date("2023-05-01") })
    );
  }
}
