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

//! Daily quotes

use super::EndpointCore;
use crate::transport::Params;
use chrono::NaiveDate;
use jq_core::{Endpoint, Error, Result, SecurityCode};
use jq_models::DailyQuote;
use std::sync::Arc;
use tracing::instrument;

/// Access to `prices/daily_quotes`
pub struct PricesEndpoints {
  core: Arc<EndpointCore>,
}

impl PricesEndpoints {
  /// Create a new prices endpoints instance
  pub fn new(core: Arc<EndpointCore>) -> Self {
    Self { core }
  }

  /// Daily quotes of a security between two dates, both inclusive
  ///
  /// Records come back in ascending date order, all pages joined.
  #[instrument(skip(self), fields(code = %code, from = %from, to = %to))]
  pub async fn daily_quotes(
    &self,
    code: SecurityCode,
    from: NaiveDate,
    to: NaiveDate,
  ) -> Result<Vec<DailyQuote>> {
    if from > to {
      return Err(Error::Config(format!("Quote window starts after it ends: {} > {}", from, to)));
    }

    let mut params = Params::new();
    params.insert("code".to_string(), code.to_string());
    params.insert("from".to_string(), from.format("%Y-%m-%d").to_string());
    params.insert("to".to_string(), to.format("%Y-%m-%d").to_string());

    self.core.fetch_collection(Endpoint::DailyQuotes, params).await
  }
}
