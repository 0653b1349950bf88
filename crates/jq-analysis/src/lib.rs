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

//! # jq-analysis
//!
//! Financial ratio derivation over J-Quants statements and daily quotes.
//!
//! The pipeline runs in a fixed order:
//!
//! 1. [`coercion`] turns raw, possibly blank fields into `Option<f64>`;
//! 2. [`ratios`] derives ROA, ROS, TOT, ROE and FL for every period;
//! 3. [`yoy`], [`forecast`] and [`price_ratio`] consume the complete ratio
//!    sequence independently of each other.
//!
//! [`dashboard::build_report`] runs all of it and returns a
//! [`DashboardReport`] in which every figure is either a number rounded to
//! two decimals or an explicit [`Metric::NoData`].
//!
//! ## Usage
//!
//! ```ignore
//! use jq_analysis::{build_report, RawDataset};
//!
//! let report = build_report(&RawDataset { company, quotes, statements })?;
//! for card in &report.year_over_year {
//!     println!("{}: {:?} ({:?} YoY)", card.kind, card.value, card.delta);
//! }
//! ```
//!
//! ## Missing data
//!
//! Nothing in this crate substitutes zero for an undisclosed figure. A ratio
//! whose input is absent, or whose denominator is exactly zero, is `None`,
//! and so is anything computed from it.

#![warn(clippy::all)]

pub mod coercion;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod metric;
pub mod price_ratio;
pub mod ratios;
pub mod yoy;

pub use coercion::{coerce, AdjustedQuote, CoercedStatement};
pub use dashboard::{build_report, DashboardReport, MetricCard, RawDataset};
pub use error::{AnalysisError, Result};
pub use forecast::Forecast;
pub use metric::{Metric, NoDataReason};
pub use price_ratio::{JoinedPrice, PriceEarnings};
pub use ratios::{derive_ratios, round2, DerivedRatioRecord, RatioKind};
pub use yoy::{year_over_year, YoyComparison, LOOKBACK_PERIODS, MIN_HISTORY};
