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

//! # jq-client
//!
//! Async client for the J-Quants market data API.
//!
//! ## Features
//!
//! - Two-step token exchange (credentials, refresh token, ID token) with
//!   cached tokens renewed before they lapse
//! - Automatic paging over `pagination_key`
//! - Rate limiting and retry with exponential backoff
//! - In-memory TTL cache of complete responses
//!
//! ## Usage
//!
//! ```ignore
//! use jq_client::JQuantsClient;
//! use jq_core::{Config, SecurityCode};
//!
//! let client = JQuantsClient::new(Config::from_env()?)?;
//! let code: SecurityCode = "7974".parse()?;
//! let company = client.listed().info(code, None).await?;
//! let quotes = client.prices().daily_quotes(code, from, to).await?;
//! ```
//!
//! ## Error Handling
//!
//! All methods return `Result<T, jq_core::Error>`. A rejected token surfaces
//! as `Error::Auth`, HTTP 429 as `Error::RateLimit` and any other J-Quants
//! error body as `Error::Api` carrying its `message`.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod cache;
pub mod client;
pub mod endpoints;
pub mod transport;

pub use auth::TokenManager;
pub use cache::{CacheConfig, CacheResult, ResponseCache};
pub use client::JQuantsClient;
pub use endpoints::{
  listed::ListedEndpoints, prices::PricesEndpoints, statements::StatementsEndpoints,
};
pub use jq_core::{Config, Error, Result};
