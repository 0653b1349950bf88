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

//! Token exchange
//!
//! J-Quants authenticates in two steps: the registered mail address and
//! password are exchanged for a refresh token (valid seven days), which is
//! exchanged for an ID token (valid 24 hours). Data requests carry the ID
//! token as a bearer credential. Both tokens are cached here and renewed
//! shortly before they lapse.

use crate::transport::{Params, Transport};
use jq_core::{Credentials, Endpoint, Error, Result, ID_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_SECS};
use jq_models::{AuthUserRequest, IdTokenResponse, RefreshTokenResponse};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Tokens are renewed this long before their nominal expiry
pub const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Clone)]
struct CachedToken {
  value: String,
  expires_at: Instant,
}

impl CachedToken {
  fn issued_now(value: String, ttl_secs: u64) -> Self {
    let ttl = Duration::from_secs(ttl_secs).saturating_sub(EXPIRY_MARGIN);
    Self { value, expires_at: Instant::now() + ttl }
  }

  fn is_fresh(&self) -> bool {
    Instant::now() < self.expires_at
  }
}

#[derive(Default)]
struct TokenState {
  refresh: Option<CachedToken>,
  id: Option<CachedToken>,
}

/// Obtains and caches the tokens a client needs
pub struct TokenManager {
  credentials: Credentials,
  state: Mutex<TokenState>,
}

impl TokenManager {
  /// Create a manager; nothing is requested until the first
  /// [`id_token`](Self::id_token) call
  pub fn new(credentials: Credentials) -> Self {
    let refresh = match &credentials {
      Credentials::RefreshToken(token) => {
        Some(CachedToken::issued_now(token.clone(), REFRESH_TOKEN_TTL_SECS))
      }
      Credentials::LoginPassword { .. } => None,
    };

    Self { credentials, state: Mutex::new(TokenState { refresh, id: None }) }
  }

  /// A valid ID token, exchanging credentials as needed
  #[instrument(skip(self, transport))]
  pub async fn id_token(&self, transport: &Transport) -> Result<String> {
    let mut state = self.state.lock().await;

    if let Some(id) = state.id.as_ref().filter(|token| token.is_fresh()) {
      return Ok(id.value.clone());
    }

    let refresh_token = self.refresh_token(&mut state, transport).await?;
    let id_token = match self.exchange_refresh_token(transport, &refresh_token).await {
      Ok(token) => token,
      Err(Error::Auth(message)) if self.can_log_in() => {
        warn!("Refresh token rejected ({}), logging in again", message);
        state.refresh = None;
        let refresh_token = self.refresh_token(&mut state, transport).await?;
        self.exchange_refresh_token(transport, &refresh_token).await?
      }
      Err(e) => return Err(e),
    };

    state.id = Some(CachedToken::issued_now(id_token.clone(), ID_TOKEN_TTL_SECS));
    info!("Obtained new ID token");
    Ok(id_token)
  }

  /// Forget the cached ID token, e.g. after the API rejected it
  pub async fn invalidate_id_token(&self) {
    self.state.lock().await.id = None;
    debug!("ID token invalidated");
  }

  /// Whether an ID token is cached and not yet due for renewal
  pub async fn has_fresh_id_token(&self) -> bool {
    self.state.lock().await.id.as_ref().is_some_and(CachedToken::is_fresh)
  }

  fn can_log_in(&self) -> bool {
    matches!(self.credentials, Credentials::LoginPassword { .. })
  }

  async fn refresh_token(&self, state: &mut TokenState, transport: &Transport) -> Result<String> {
    if let Some(refresh) = state.refresh.as_ref().filter(|token| token.is_fresh()) {
      return Ok(refresh.value.clone());
    }

    let Credentials::LoginPassword { mail_address, password } = &self.credentials else {
      return Err(Error::Auth(
        "Refresh token has expired; supply a new one or log in with MAIL_ADDRESS/PASSWORD"
          .to_string(),
      ));
    };

    let request =
      AuthUserRequest { mail_address: mail_address.clone(), password: password.clone() };
    let response: RefreshTokenResponse =
      transport.post(Endpoint::AuthUser, &Params::new(), Some(&request)).await?;

    if response.refresh_token.is_empty() {
      return Err(Error::Auth("token/auth_user returned an empty refresh token".to_string()));
    }

    info!("Obtained new refresh token");
    state.refresh =
      Some(CachedToken::issued_now(response.refresh_token.clone(), REFRESH_TOKEN_TTL_SECS));
    Ok(response.refresh_token)
  }

  async fn exchange_refresh_token(
    &self,
    transport: &Transport,
    refresh_token: &str,
  ) -> Result<String> {
    let mut params = Params::new();
    params.insert("refreshtoken".to_string(), refresh_token.to_string());

    let response: IdTokenResponse =
      transport.post::<(), _>(Endpoint::AuthRefresh, &params, None).await?;

    if response.id_token.is_empty() {
      return Err(Error::Auth("token/auth_refresh returned an empty ID token".to_string()));
    }
    Ok(response.id_token)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cached_token_freshness() {
    assert!(CachedToken::issued_now("t".to_string(), ID_TOKEN_TTL_SECS).is_fresh());
    // shorter than the margin: due immediately
    assert!(!CachedToken::issued_now("t".to_string(), 30).is_fresh());
  }

  #[test]
  fn test_refresh_token_credentials_seed_cache() {
    let manager = TokenManager::new(Credentials::RefreshToken("rt".to_string()));
    let state = manager.state.try_lock().unwrap();
    assert_eq!(state.refresh.as_ref().map(|t| t.value.as_str()), Some("rt"));
    assert!(state.id.is_none());
    assert!(!manager.can_log_in());
  }
}
