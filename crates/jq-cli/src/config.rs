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

use crate::commands::CacheArgs;
use anyhow::{Context, Result};
use jq_client::{CacheConfig, JQuantsClient};
use jq_core::Config as CoreConfig;

/// Settings of the dashboard binary
#[derive(Debug, Clone)]
pub struct Config {
  pub api_config: CoreConfig,
}

impl Config {
  /// Load from the environment (and `.env`)
  pub fn from_env() -> Result<Self> {
    let api_config = CoreConfig::from_env().context(
      "loading J-Quants settings; set MAIL_ADDRESS and PASSWORD, or JQUANTS_REFRESH_TOKEN",
    )?;

    Ok(Self { api_config })
  }

  /// Response cache settings for the given command-line options
  pub fn cache_config(&self, args: &CacheArgs) -> CacheConfig {
    if args.no_cache {
      return CacheConfig::disabled();
    }
    CacheConfig {
      force_refresh: args.refresh,
      ..CacheConfig::with_ttl_secs(self.api_config.cache_ttl_secs)
    }
  }

  /// Build an API client with the requested caching behaviour
  pub fn client(&self, args: &CacheArgs) -> Result<JQuantsClient> {
    JQuantsClient::with_cache_config(self.api_config.clone(), self.cache_config(args))
      .context("creating the J-Quants client")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use jq_core::Credentials;

  fn config() -> Config {
    let mut api_config =
      CoreConfig::default_with_credentials(Credentials::RefreshToken("token".to_string()));
    api_config.cache_ttl_secs = 120;
    Config { api_config }
  }

  #[test]
  fn test_cache_config_from_args() {
    let cached = config().cache_config(&CacheArgs::default());
    assert!(cached.enabled);
    assert!(!cached.force_refresh);
    assert_eq!(cached.ttl.as_secs(), 120);

    let refreshed = config().cache_config(&CacheArgs { refresh: true, ..Default::default() });
    assert!(refreshed.enabled);
    assert!(refreshed.force_refresh);
    assert_eq!(refreshed.ttl.as_secs(), 120);

    let uncached = config().cache_config(&CacheArgs { no_cache: true, ..Default::default() });
    assert!(!uncached.enabled);
  }
}
