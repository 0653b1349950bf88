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

//! The client facade over the endpoint modules

use crate::auth::TokenManager;
use crate::cache::{CacheConfig, ResponseCache};
use crate::endpoints::{
  listed::ListedEndpoints, prices::PricesEndpoints, statements::StatementsEndpoints, EndpointCore,
};
use crate::transport::Transport;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use jq_core::{Config, Result, DEFAULT_RATE_LIMIT};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Main J-Quants API client
///
/// Provides access to the listed-info, daily-quote and statement endpoints.
/// Handles the token exchange, rate limiting, paging and response caching
/// automatically.
///
/// # Examples
///
/// ```ignore
/// use jq_client::JQuantsClient;
/// use jq_core::{Config, SecurityCode};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = JQuantsClient::new(Config::from_env()?)?;
///     let code = SecurityCode::default();
///
///     let statements = client.statements().statements(code).await?;
///     println!("{} statements disclosed", statements.len());
///
///     Ok(())
/// }
/// ```
pub struct JQuantsClient {
  core: Arc<EndpointCore>,
}

impl JQuantsClient {
  /// Create a new client, caching responses for `config.cache_ttl_secs`
  ///
  /// # Errors
  ///
  /// Returns an error if the HTTP client cannot be created.
  pub fn new(config: Config) -> Result<Self> {
    let cache = CacheConfig::with_ttl_secs(config.cache_ttl_secs);
    Self::with_cache_config(config, cache)
  }

  /// Create a new client with explicit cache behaviour
  pub fn with_cache_config(config: Config, cache: CacheConfig) -> Result<Self> {
    // a zero limit falls back to the default budget
    let rate_limit = NonZeroU32::new(config.rate_limit)
      .or_else(|| NonZeroU32::new(DEFAULT_RATE_LIMIT))
      .unwrap_or(NonZeroU32::MIN);
    let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(rate_limit)));

    Self::with_rate_limiter(config, cache, rate_limiter)
  }

  /// Create a new client with custom rate limiting
  pub fn with_rate_limiter(
    config: Config,
    cache: CacheConfig,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
  ) -> Result<Self> {
    let transport = Arc::new(Transport::new(&config)?);
    let tokens = Arc::new(TokenManager::new(config.credentials));
    let cache = Arc::new(ResponseCache::new(cache));

    Ok(Self { core: Arc::new(EndpointCore::new(transport, tokens, cache, rate_limiter)) })
  }

  /// Get access to the listed issue endpoint
  pub fn listed(&self) -> ListedEndpoints {
    ListedEndpoints::new(self.core.clone())
  }

  /// Get access to the daily quotes endpoint
  pub fn prices(&self) -> PricesEndpoints {
    PricesEndpoints::new(self.core.clone())
  }

  /// Get access to the financial statements endpoint
  pub fn statements(&self) -> StatementsEndpoints {
    StatementsEndpoints::new(self.core.clone())
  }

  /// The response cache shared by all endpoints
  pub fn cache(&self) -> &ResponseCache {
    &self.core.cache
  }

  /// The token manager shared by all endpoints
  pub fn tokens(&self) -> &TokenManager {
    &self.core.tokens
  }

  /// Base URL requests are sent to
  pub fn base_url(&self) -> &str {
    self.core.transport.base_url()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use jq_core::Credentials;

  #[test]
  fn test_zero_rate_limit_falls_back() {
    let mut config = Config::default_with_credentials(Credentials::RefreshToken("rt".to_string()));
    config.rate_limit = 0;
    let client = JQuantsClient::new(config).unwrap();
    assert_eq!(client.base_url(), "https://api.jquants.com/v1");
    assert_eq!(client.cache().config().ttl.as_secs(), 3600);
  }
}
