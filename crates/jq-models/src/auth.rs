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

//! Token exchange payloads

use serde::{Deserialize, Serialize};

/// Body of `POST token/auth_user`
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUserRequest {
  #[serde(rename = "mailaddress")]
  pub mail_address: String,

  pub password: String,
}

impl std::fmt::Debug for AuthUserRequest {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AuthUserRequest")
      .field("mail_address", &self.mail_address)
      .field("password", &"***")
      .finish()
  }
}

/// Response of `POST token/auth_user`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
  #[serde(rename = "refreshToken")]
  pub refresh_token: String,
}

/// Response of `POST token/auth_refresh`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdTokenResponse {
  #[serde(rename = "idToken")]
  pub id_token: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_auth_user_request_wire_names() {
    let request =
      AuthUserRequest { mail_address: "me@example.com".to_string(), password: "pw".to_string() };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["mailaddress"], "me@example.com");
    assert_eq!(json["password"], "pw");
  }

  #[test]
  fn test_token_responses() {
    let refresh: RefreshTokenResponse =
      serde_json::from_str(r#"{"refreshToken": "abc"}"#).unwrap();
    assert_eq!(refresh.refresh_token, "abc");

    let id: IdTokenResponse = serde_json::from_str(r#"{"idToken": "xyz"}"#).unwrap();
    assert_eq!(id.id_token, "xyz");
  }
}
