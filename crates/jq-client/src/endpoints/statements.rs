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

//! Financial statements

use super::EndpointCore;
use crate::transport::Params;
use jq_core::{Endpoint, Result, SecurityCode};
use jq_models::StatementRecord;
use std::sync::Arc;
use tracing::instrument;

/// Access to `fins/statements`
pub struct StatementsEndpoints {
  core: Arc<EndpointCore>,
}

impl StatementsEndpoints {
  /// Create a new statements endpoints instance
  pub fn new(core: Arc<EndpointCore>) -> Self {
    Self { core }
  }

  /// Every disclosed statement of a security, in disclosure order
  #[instrument(skip(self), fields(code = %code))]
  pub async fn statements(&self, code: SecurityCode) -> Result<Vec<StatementRecord>> {
    let mut params = Params::new();
    params.insert("code".to_string(), code.to_string());

    self.core.fetch_collection(Endpoint::Statements, params).await
  }
}
