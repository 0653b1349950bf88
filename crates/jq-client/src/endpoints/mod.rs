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

//! Endpoint modules
//!
//! Every data endpoint shares one [`EndpointCore`]: it waits on the rate
//! limiter, attaches the ID token, follows `pagination_key` until the last
//! page and serves repeated requests from the response cache.

pub mod listed;
pub mod prices;
pub mod statements;

use crate::auth::TokenManager;
use crate::cache::{CacheResult, ResponseCache};
use crate::transport::{Params, Transport};
use governor::DefaultDirectRateLimiter;
use jq_core::{Endpoint, Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Shared request machinery of the endpoint modules
pub struct EndpointCore {
  /// HTTP layer
  pub transport: Arc<Transport>,
  /// ID token source
  pub tokens: Arc<TokenManager>,
  /// Complete responses by request
  pub cache: Arc<ResponseCache>,
  /// Request budget shared by all endpoints
  pub rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl EndpointCore {
  /// Create a new endpoint core
  pub fn new(
    transport: Arc<Transport>,
    tokens: Arc<TokenManager>,
    cache: Arc<ResponseCache>,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
  ) -> Self {
    Self { transport, tokens, cache, rate_limiter }
  }

  /// Fetch every record of a collection endpoint, all pages joined
  #[instrument(skip(self, params), fields(endpoint = %endpoint))]
  pub async fn fetch_collection<T>(&self, endpoint: Endpoint, params: Params) -> Result<Vec<T>>
  where
    T: DeserializeOwned,
  {
    let key = ResponseCache::make_key(endpoint, &params);

    let records = match self.cache.get(&key).await {
      CacheResult::Hit(records) => records,
      CacheResult::Miss | CacheResult::Skipped => {
        let records = self.fetch_all_pages(endpoint, &params).await?;
        self.cache.set(&key, records.clone()).await;
        records
      }
    };

    serde_json::from_value(records)
      .map_err(|e| Error::Parse(format!("Failed to decode {} records: {}", endpoint, e)))
  }

  async fn fetch_all_pages(&self, endpoint: Endpoint, params: &Params) -> Result<Value> {
    let collection_key = endpoint
      .collection_key()
      .ok_or_else(|| Error::Unexpected(format!("{} is not a collection endpoint", endpoint)))?;

    let mut records = Vec::new();
    let mut pagination_key: Option<String> = None;
    let mut pages = 0;

    loop {
      let mut page_params = params.clone();
      if let Some(key) = &pagination_key {
        page_params.insert("pagination_key".to_string(), key.clone());
      }

      let mut page = self.get_authorized(endpoint, &page_params).await?;
      pages += 1;

      match page.get_mut(collection_key).map(Value::take) {
        Some(Value::Array(items)) => records.extend(items),
        _ => return Err(Error::MissingField(collection_key.to_string())),
      }

      let next = page
        .get("pagination_key")
        .and_then(Value::as_str)
        .filter(|key| !key.is_empty())
        .map(str::to_string);

      match next {
        Some(next) if pagination_key.as_deref() == Some(next.as_str()) => {
          return Err(Error::InvalidResponse(format!(
            "{} repeated pagination_key {}",
            endpoint, next
          )));
        }
        Some(next) => pagination_key = Some(next),
        None => break,
      }
    }

    debug!("Fetched {} records from {} over {} pages", records.len(), endpoint, pages);
    Ok(Value::Array(records))
  }

  /// One GET with the current ID token, renewed once if the API rejects it
  async fn get_authorized(&self, endpoint: Endpoint, params: &Params) -> Result<Value> {
    self.rate_limiter.until_ready().await;
    let id_token = self.tokens.id_token(&self.transport).await?;

    match self.transport.get(endpoint, params, &id_token).await {
      Err(Error::Auth(message)) => {
        warn!("ID token rejected by {} ({}), renewing", endpoint, message);
        self.tokens.invalidate_id_token().await;
        let id_token = self.tokens.id_token(&self.transport).await?;
        self.rate_limiter.until_ready().await;
        self.transport.get(endpoint, params, &id_token).await
      }
      other => other,
    }
  }
}
