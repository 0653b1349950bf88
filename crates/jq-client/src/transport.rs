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

//! HTTP transport layer for J-Quants API requests

use jq_core::{Config, Endpoint, Error, Result};
use jq_models::ApiMessage;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};
use url::Url;

/// Query parameters of a single request, kept sorted so URLs are stable
pub type Params = BTreeMap<String, String>;

/// HTTP transport layer for making requests to the J-Quants API
pub struct Transport {
  client: Client,
  base_url: String,
  timeout: Duration,
  max_retries: u32,
  retry_delay: Duration,
}

impl Transport {
  /// Create a new transport instance
  pub fn new(config: &Config) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .user_agent(concat!("jq-client/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_string(),
      timeout: Duration::from_secs(config.timeout_secs),
      max_retries: config.max_retries,
      retry_delay: Duration::from_millis(config.retry_delay_ms),
    })
  }

  /// GET a data endpoint with a bearer ID token
  #[instrument(skip(self, params, id_token), fields(endpoint = %endpoint))]
  pub async fn get<T>(&self, endpoint: Endpoint, params: &Params, id_token: &str) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let url = self.build_url(endpoint, params)?;
    debug!("Making request to: {}", url);

    let text = self.send_with_retries(|| self.client.get(url.clone()).bearer_auth(id_token)).await?;
    parse_body(endpoint, &text)
  }

  /// POST to a token endpoint, with an optional JSON body
  #[instrument(skip(self, params, body), fields(endpoint = %endpoint))]
  pub async fn post<B, T>(&self, endpoint: Endpoint, params: &Params, body: Option<&B>) -> Result<T>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let url = self.build_url(endpoint, params)?;
    // refresh tokens travel in the query string; keep them out of the log
    debug!("Posting to: {}", endpoint.path());

    let text = self
      .send_with_retries(|| {
        let request = self.client.post(url.clone());
        match body {
          Some(body) => request.json(body),
          None => request,
        }
      })
      .await?;
    parse_body(endpoint, &text)
  }

  /// Build the full URL for an API request
  pub fn build_url(&self, endpoint: Endpoint, params: &Params) -> Result<Url> {
    let mut url = Url::parse(&format!("{}/{}", self.base_url, endpoint.path()))
      .map_err(|e| Error::Config(format!("Invalid base URL: {}", e)))?;

    if !params.is_empty() {
      let mut query_pairs = url.query_pairs_mut();
      for (key, value) in params {
        query_pairs.append_pair(key, value);
      }
    }

    Ok(url)
  }

  /// Send a request, retrying transport failures and 5xx responses with
  /// exponential backoff
  async fn send_with_retries<F>(&self, build: F) -> Result<String>
  where
    F: Fn() -> RequestBuilder,
  {
    let mut attempt = 0;

    loop {
      if attempt > 0 {
        let delay = backoff_delay(self.retry_delay, attempt);
        warn!("Retrying request in {}ms (attempt {})", delay.as_millis(), attempt + 1);
        tokio::time::sleep(delay).await;
      }

      match self.execute(build()).await {
        Ok(text) => return Ok(text),
        Err(e) if e.is_retryable() && attempt < self.max_retries => {
          warn!("Request failed (attempt {}): {}", attempt + 1, e);
          attempt += 1;
        }
        Err(e) => {
          if e.is_retryable() {
            error!("Giving up after {} attempts: {}", attempt + 1, e);
          }
          return Err(e);
        }
      }
    }
  }

  /// Make the actual HTTP request and classify a failed status
  async fn execute(&self, request: RequestBuilder) -> Result<String> {
    let response =
      request.send().await.map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

    let status = response.status();
    let text = response
      .text()
      .await
      .map_err(|e| Error::Http(format!("Failed to read response body: {}", e)))?;

    if status.is_success() {
      debug!("Request successful with status: {}, {} bytes", status, text.len());
      return Ok(text);
    }

    let message = serde_json::from_str::<ApiMessage>(&text)
      .map(|body| body.message)
      .unwrap_or_else(|_| excerpt(&text, 200).to_string());
    error!("Request failed with status: {}: {}", status, message);

    Err(match status {
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Auth(message),
      StatusCode::TOO_MANY_REQUESTS => Error::RateLimit(message),
      s if s.is_server_error() => Error::Http(format!("HTTP {}: {}", s, message)),
      s => Error::Api(format!("HTTP {}: {}", s, message)),
    })
  }

  /// Get the base URL being used
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Get request timeout duration
  pub fn timeout(&self) -> Duration {
    self.timeout
  }
}

/// Longest wait between two attempts
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Wait before retry number `attempt` (1-based): `base * 2^(attempt - 1)`, capped
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
  let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
  base.saturating_mul(factor).min(MAX_BACKOFF)
}

fn parse_body<T: DeserializeOwned>(endpoint: Endpoint, text: &str) -> Result<T> {
  serde_json::from_str::<T>(text).map_err(|e| {
    error!("Failed to parse JSON response from {}: {}", endpoint, e);
    Error::Parse(format!("Failed to parse response: {}. Response: {}", e, excerpt(text, 200)))
  })
}

/// Leading part of a body for log and error messages, cut on a char boundary
fn excerpt(text: &str, max_chars: usize) -> &str {
  match text.char_indices().nth(max_chars) {
    Some((index, _)) => &text[..index],
    None => text,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use jq_core::Credentials;

  fn transport() -> Transport {
    let config = Config::default_with_credentials(Credentials::RefreshToken("rt".to_string()))
      .with_base_url("https://mock.jquants.test/v1/");
    Transport::new(&config).unwrap()
  }

  #[test]
  fn test_backoff_doubles_and_saturates() {
    let base = Duration::from_millis(250);
    assert_eq!(backoff_delay(base, 1), base);
    assert_eq!(backoff_delay(base, 3), Duration::from_secs(1));
    assert_eq!(backoff_delay(base, 33), MAX_BACKOFF);
    assert_eq!(backoff_delay(Duration::MAX, u32::MAX), MAX_BACKOFF);
  }

  #[test]
  fn test_build_url() {
    let mut params = Params::new();
    params.insert("to".to_string(), "2023-12-31".to_string());
    params.insert("code".to_string(), "7974".to_string());

    let url = transport().build_url(Endpoint::DailyQuotes, &params).unwrap();
    assert_eq!(
      url.as_str(),
      "https://mock.jquants.test/v1/prices/daily_quotes?code=7974&to=2023-12-31"
    );
  }

  #[test]
  fn test_build_url_without_params() {
    let url = transport().build_url(Endpoint::AuthUser, &Params::new()).unwrap();
    assert_eq!(url.as_str(), "https://mock.jquants.test/v1/token/auth_user");
  }

  #[test]
  fn test_excerpt_respects_char_boundaries() {
    assert_eq!(excerpt("任天堂株式会社", 3), "任天堂");
    assert_eq!(excerpt("short", 200), "short");
  }

  #[test]
  fn test_parse_body_error() {
    let result: Result<ApiMessage> = parse_body(Endpoint::Statements, "<html>oops</html>");
    assert!(matches!(result, Err(Error::Parse(_))));
  }
}
