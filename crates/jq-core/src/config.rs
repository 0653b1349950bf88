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

//! Configuration management for the J-Quants client

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// How the client obtains its refresh token
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq)]
pub enum Credentials {
  /// Registered mail address and password, exchanged at `token/auth_user`
  LoginPassword { mail_address: String, password: String },

  /// A refresh token obtained out of band
  RefreshToken(String),
}

impl std::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Credentials::LoginPassword { mail_address, .. } => f
        .debug_struct("LoginPassword")
        .field("mail_address", mail_address)
        .field("password", &"***")
        .finish(),
      Credentials::RefreshToken(_) => f.debug_tuple("RefreshToken").field(&"***").finish(),
    }
  }
}

/// Main configuration struct for the J-Quants client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
  /// Credentials used for the token exchange
  pub credentials: Credentials,

  /// API rate limit (requests per minute)
  pub rate_limit: u32,

  /// Request timeout in seconds
  pub timeout_secs: u64,

  /// Maximum retries for failed requests
  pub max_retries: u32,

  /// Base delay of the exponential retry backoff in milliseconds
  pub retry_delay_ms: u64,

  /// Base URL for the J-Quants API
  pub base_url: String,

  /// Lifetime of cached responses in seconds
  pub cache_ttl_secs: u64,
}

impl Config {
  /// Load configuration from environment variables
  ///
  /// A `.env` file in the working directory is honoured.
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Load configuration through an arbitrary variable lookup
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let credentials = match lookup("JQUANTS_REFRESH_TOKEN").filter(|t| !t.is_empty()) {
      Some(token) => Credentials::RefreshToken(token),
      None => {
        let mail_address = lookup("MAIL_ADDRESS")
          .ok_or_else(|| Error::Credentials("MAIL_ADDRESS not set".to_string()))?;
        let password = lookup("PASSWORD")
          .ok_or_else(|| Error::Credentials("PASSWORD not set".to_string()))?;
        Credentials::LoginPassword { mail_address, password }
      }
    };

    let rate_limit = parse_var(&lookup, "JQ_RATE_LIMIT", crate::DEFAULT_RATE_LIMIT)?;
    let timeout_secs = parse_var(&lookup, "JQ_TIMEOUT_SECS", 30)?;
    let max_retries = parse_var(&lookup, "JQ_MAX_RETRIES", 3)?;
    let retry_delay_ms = parse_var(&lookup, "JQ_RETRY_DELAY_MS", 1000)?;
    let cache_ttl_secs = parse_var(&lookup, "JQ_CACHE_TTL_SECS", 3600)?;

    let base_url = lookup("JQ_BASE_URL").unwrap_or_else(|| crate::JQUANTS_BASE_URL.to_string());
    url::Url::parse(&base_url)
      .map_err(|e| Error::Config(format!("Invalid JQ_BASE_URL {}: {}", base_url, e)))?;

    Ok(Config {
      credentials,
      rate_limit,
      timeout_secs,
      max_retries,
      retry_delay_ms,
      base_url: base_url.trim_end_matches('/').to_string(),
      cache_ttl_secs,
    })
  }

  /// Create a config with default values (for testing)
  pub fn default_with_credentials(credentials: Credentials) -> Self {
    Config {
      credentials,
      rate_limit: crate::DEFAULT_RATE_LIMIT,
      timeout_secs: 30,
      max_retries: 3,
      retry_delay_ms: 1000,
      base_url: crate::JQUANTS_BASE_URL.to_string(),
      cache_ttl_secs: 3600,
    }
  }

  /// Builder: point the client at another base URL
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into().trim_end_matches('/').to_string();
    self
  }

  /// Builder: set max_retries
  pub fn with_max_retries(mut self, retries: u32) -> Self {
    self.max_retries = retries;
    self
  }

  /// Builder: set the retry backoff base delay
  pub fn with_retry_delay_ms(mut self, delay_ms: u64) -> Self {
    self.retry_delay_ms = delay_ms;
    self
  }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
  F: Fn(&str) -> Option<String>,
  T: FromStr,
{
  match lookup(key) {
    Some(raw) => raw.trim().parse().map_err(|_| Error::Config(format!("Invalid {}", key))),
    None => Ok(default),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> =
      pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key| vars.get(key).cloned()
  }

  #[test]
  fn test_config_from_login() {
    let config =
      Config::from_lookup(lookup_from(&[("MAIL_ADDRESS", "me@example.com"), ("PASSWORD", "pw")]))
        .unwrap();
    assert_eq!(
      config.credentials,
      Credentials::LoginPassword {
        mail_address: "me@example.com".to_string(),
        password: "pw".to_string()
      }
    );
    assert_eq!(config.rate_limit, 60);
    assert_eq!(config.base_url, "https://api.jquants.com/v1");
  }

  #[test]
  fn test_refresh_token_wins() {
    let config = Config::from_lookup(lookup_from(&[
      ("JQUANTS_REFRESH_TOKEN", "rt"),
      ("MAIL_ADDRESS", "me@example.com"),
    ]))
    .unwrap();
    assert_eq!(config.credentials, Credentials::RefreshToken("rt".to_string()));
  }

  #[test]
  fn test_missing_credentials() {
    let result = Config::from_lookup(lookup_from(&[("MAIL_ADDRESS", "me@example.com")]));
    assert!(matches!(result, Err(Error::Credentials(_))));
  }

  #[test]
  fn test_invalid_numeric_override() {
    let result = Config::from_lookup(lookup_from(&[
      ("JQUANTS_REFRESH_TOKEN", "rt"),
      ("JQ_TIMEOUT_SECS", "soon"),
    ]));
    assert!(matches!(result, Err(Error::Config(_))));
  }

  #[test]
  fn test_base_url_override() {
    let config = Config::from_lookup(lookup_from(&[
      ("JQUANTS_REFRESH_TOKEN", "rt"),
      ("JQ_BASE_URL", "http://localhost:9000/v1/"),
      ("JQ_MAX_RETRIES", "0"),
    ]))
    .unwrap();
    assert_eq!(config.base_url, "http://localhost:9000/v1");
    assert_eq!(config.max_retries, 0);
  }

  #[test]
  fn test_debug_hides_secrets() {
    let creds = Credentials::LoginPassword {
      mail_address: "me@example.com".to_string(),
      password: "hunter2".to_string(),
    };
    assert!(!format!("{:?}", creds).contains("hunter2"));
  }
}
