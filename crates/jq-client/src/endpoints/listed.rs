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

//! Listed issue information

use super::EndpointCore;
use crate::transport::Params;
use chrono::NaiveDate;
use jq_core::{Endpoint, Result, SecurityCode};
use jq_models::CompanyInfo;
use std::sync::Arc;
use tracing::instrument;

/// Access to `listed/info`
pub struct ListedEndpoints {
  core: Arc<EndpointCore>,
}

impl ListedEndpoints {
  /// Create a new listed endpoints instance
  pub fn new(core: Arc<EndpointCore>) -> Self {
    Self { core }
  }

  /// Listed issue master record(s) for a security
  ///
  /// Without a `date` J-Quants answers with the current listing.
  #[instrument(skip(self), fields(code = %code))]
  pub async fn info(
    &self,
    code: SecurityCode,
    date: Option<NaiveDate>,
  ) -> Result<Vec<CompanyInfo>> {
    let mut params = Params::new();
    params.insert("code".to_string(), code.to_string());
    if let Some(date) = date {
      params.insert("date".to_string(), date.format("%Y-%m-%d").to_string());
    }

    self.core.fetch_collection(Endpoint::ListedInfo, params).await
  }
}
