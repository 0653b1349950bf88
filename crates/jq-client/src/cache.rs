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

//! In-memory response cache
//!
//! Holds the complete (all pages joined) record array of each request, keyed
//! on endpoint path and query parameters. Repeated dashboard loads for the
//! same security within the TTL are served without touching the network.

use crate::transport::Params;
use jq_core::Endpoint;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Configuration for response caching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
  /// Enable caching
  pub enabled: bool,
  /// Lifetime of a cached response
  pub ttl: Duration,
  /// Force refresh (bypass cache reads, but still write)
  pub force_refresh: bool,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self { enabled: true, ttl: Duration::from_secs(3600), force_refresh: false }
  }
}

impl CacheConfig {
  /// Create config with a custom TTL
  pub fn with_ttl_secs(ttl_secs: u64) -> Self {
    Self { ttl: Duration::from_secs(ttl_secs), ..Default::default() }
  }

  /// Create config with caching disabled entirely
  pub fn disabled() -> Self {
    Self { enabled: false, ..Default::default() }
  }
}

/// Result of a cache lookup
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
  /// Cache hit with data
  Hit(T),
  /// Cache miss (no data or expired)
  Miss,
  /// Cache disabled or force refresh
  Skipped,
}

struct CacheEntry {
  value: Value,
  expires_at: Instant,
}

/// TTL cache of decoded JSON responses
pub struct ResponseCache {
  config: CacheConfig,
  entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
  /// Create an empty cache
  pub fn new(config: CacheConfig) -> Self {
    Self { config, entries: RwLock::new(HashMap::new()) }
  }

  /// Get the cache configuration
  pub fn config(&self) -> &CacheConfig {
    &self.config
  }

  /// Cache key of a request: endpoint path plus its sorted query
  pub fn make_key(endpoint: Endpoint, params: &Params) -> String {
    let query: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    format!("{}?{}", endpoint.path(), query.join("&"))
  }

  /// Look up a cached response
  pub async fn get(&self, key: &str) -> CacheResult<Value> {
    if !self.config.enabled || self.config.force_refresh {
      return CacheResult::Skipped;
    }

    let now = Instant::now();
    match self.entries.read().await.get(key) {
      Some(entry) if now < entry.expires_at => {
        info!("Cache hit for key: {}", key);
        return CacheResult::Hit(entry.value.clone());
      }
      Some(_) => debug!("Cache entry expired for key: {}", key),
      None => {
        debug!("Cache miss for key: {}", key);
        return CacheResult::Miss;
      }
    }

    // Another task may have replaced the entry between the two locks
    let mut entries = self.entries.write().await;
    if entries.get(key).is_some_and(|entry| now >= entry.expires_at) {
      entries.remove(key);
    }
    CacheResult::Miss
  }

  /// Store a response; returns false when caching is disabled
  pub async fn set(&self, key: &str, value: Value) -> bool {
    if !self.config.enabled {
      return false;
    }

    let now = Instant::now();
    let mut entries = self.entries.write().await;
    let purged = purge_expired(&mut entries, now);
    if purged > 0 {
      debug!("Purged {} expired cache entries", purged);
    }

    let entry = CacheEntry { value, expires_at: now + self.config.ttl };
    entries.insert(key.to_string(), entry);
    debug!("Cached {} for {}s", key, self.config.ttl.as_secs());
    true
  }

  /// Number of stored entries; expired ones linger until the next write
  pub async fn len(&self) -> usize {
    self.entries.read().await.len()
  }

  /// Whether nothing is stored
  pub async fn is_empty(&self) -> bool {
    self.entries.read().await.is_empty()
  }
}

/// Drop entries expired at `now`, returning how many were removed
fn purge_expired(entries: &mut HashMap<String, CacheEntry>, now: Instant) -> usize {
  let before = entries.len();
  entries.retain(|_, entry| now < entry.expires_at);
  before - entries.len()
}
