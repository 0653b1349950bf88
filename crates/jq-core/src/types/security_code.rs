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

//! Listed issue codes

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Four digit security code of a listed issue (e.g. 7974)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct SecurityCode(u16);

impl SecurityCode {
  /// Smallest accepted code
  pub const MIN: u16 = 1000;
  /// Largest accepted code
  pub const MAX: u16 = 9999;

  /// Validate a numeric code
  pub fn new(code: u16) -> Result<Self> {
    if (Self::MIN..=Self::MAX).contains(&code) {
      Ok(SecurityCode(code))
    } else {
      Err(Error::Config(format!(
        "security code {} outside {}..={}",
        code,
        Self::MIN,
        Self::MAX
      )))
    }
  }

  /// The numeric value
  pub fn value(&self) -> u16 {
    self.0
  }
}

impl Default for SecurityCode {
  fn default() -> Self {
    SecurityCode(7974)
  }
}

impl std::fmt::Display for SecurityCode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for SecurityCode {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let code: u16 = s
      .trim()
      .parse()
      .map_err(|_| Error::Parse(format!("security code must be numeric: {:?}", s)))?;
    SecurityCode::new(code)
  }
}

impl TryFrom<u16> for SecurityCode {
  type Error = Error;

  fn try_from(code: u16) -> Result<Self> {
    SecurityCode::new(code)
  }
}

impl From<SecurityCode> for u16 {
  fn from(code: SecurityCode) -> u16 {
    code.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_code_bounds() {
    assert!(SecurityCode::new(999).is_err());
    assert!(SecurityCode::new(10000).is_err());
    assert_eq!(SecurityCode::new(1000).unwrap().value(), 1000);
    assert_eq!(SecurityCode::new(9999).unwrap().value(), 9999);
  }

  #[test]
  fn test_parse_code() {
    assert_eq!("7203".parse::<SecurityCode>().unwrap().to_string(), "7203");
    assert!("72O3".parse::<SecurityCode>().is_err());
    assert_eq!(SecurityCode::default().value(), 7974);
  }
}
