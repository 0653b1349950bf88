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

pub mod config;
pub mod error;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{Config, Credentials};
pub use error::{Error, Result};
pub use types::SecurityCode;

/// The J-Quants API endpoints used by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
  // Token exchange
  AuthUser,
  AuthRefresh,

  // Listed issue master
  ListedInfo,

  // Prices
  DailyQuotes,

  // Financial statements
  Statements,
}

impl Endpoint {
  /// Path of the endpoint relative to the API base URL
  pub fn path(&self) -> &'static str {
    match self {
      Endpoint::AuthUser => "token/auth_user",
      Endpoint::AuthRefresh => "token/auth_refresh",
      Endpoint::ListedInfo => "listed/info",
      Endpoint::DailyQuotes => "prices/daily_quotes",
      Endpoint::Statements => "fins/statements",
    }
  }

  /// Name of the JSON array holding the records in a data response
  pub fn collection_key(&self) -> Option<&'static str> {
    match self {
      Endpoint::AuthUser | Endpoint::AuthRefresh => None,
      Endpoint::ListedInfo => Some("info"),
      Endpoint::DailyQuotes => Some("daily_quotes"),
      Endpoint::Statements => Some("statements"),
    }
  }

  /// Whether the request must carry an ID token
  pub fn requires_id_token(&self) -> bool {
    !matches!(self, Endpoint::AuthUser | Endpoint::AuthRefresh)
  }
}

impl std::fmt::Display for Endpoint {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.path())
  }
}

/// Base URL for the J-Quants API
pub const JQUANTS_BASE_URL: &str = "https://api.jquants.com/v1";

/// Default request budget (requests per minute)
pub const DEFAULT_RATE_LIMIT: u32 = 60;

/// Lifetime of a refresh token issued by `token/auth_user`
pub const REFRESH_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Lifetime of an ID token issued by `token/auth_refresh`
pub const ID_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_endpoint_paths() {
    assert_eq!(Endpoint::DailyQuotes.path(), "prices/daily_quotes");
    assert_eq!(Endpoint::Statements.to_string(), "fins/statements");
    assert_eq!(Endpoint::ListedInfo.collection_key(), Some("info"));
    assert_eq!(Endpoint::AuthUser.collection_key(), None);
  }

  #[test]
  fn test_token_requirements() {
    assert!(!Endpoint::AuthUser.requires_id_token());
    assert!(!Endpoint::AuthRefresh.requires_id_token());
    assert!(Endpoint::Statements.requires_id_token());
  }
}
