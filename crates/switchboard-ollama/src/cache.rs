// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! TTL response cache for deterministic completion calls.
//!
//! Keyed by a digest of (model, exact prompt text). Only low-temperature,
//! structured-output calls are cached -- those are the ones whose responses
//! are stable enough to replay. Expired entries are evicted lazily on
//! insert; concurrent writers on the same key resolve last-write-wins.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

struct CacheEntry {
    content: String,
    expires_at: Instant,
}

/// In-memory TTL cache in front of the completion service.
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Build the cache key for a (model, prompt) pair.
    pub fn key(model: &str, prompt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(model.as_bytes());
        hasher.update(b":");
        hasher.update(prompt.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Look up a cached response; expired entries count as misses.
    pub async fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.content.clone())
    }

    /// Store a response under `key`, sweeping out expired entries.
    pub async fn insert(&self, key: String, content: String) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key,
            CacheEntry {
                content,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Number of live (possibly expired, not yet swept) entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hit_within_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let key = ResponseCache::key("gemma3:1b", "classify: hello");
        cache.insert(key.clone(), "cached".to_string()).await;
        assert_eq!(cache.get(&key).await.as_deref(), Some("cached"));
    }

    #[tokio::test]
    async fn miss_after_expiry() {
        let cache = ResponseCache::new(Duration::from_millis(10));
        let key = ResponseCache::key("gemma3:1b", "classify: hello");
        cache.insert(key.clone(), "cached".to_string()).await;
        tokio::time::sleep(Duration::from_millis(25)).await;
        assert_eq!(cache.get(&key).await, None);
    }

    #[tokio::test]
    async fn key_distinguishes_model_and_prompt() {
        let a = ResponseCache::key("gemma3:1b", "prompt");
        let b = ResponseCache::key("gemma3:4b", "prompt");
        let c = ResponseCache::key("gemma3:1b", "other prompt");
        assert_ne!(a, b);
        assert_ne!(a, c);
        // Same inputs, same key.
        assert_eq!(a, ResponseCache::key("gemma3:1b", "prompt"));
    }

    #[tokio::test]
    async fn insert_sweeps_expired_entries() {
        let cache = ResponseCache::new(Duration::from_millis(10));
        cache.insert("a".to_string(), "1".to_string()).await;
        cache.insert("b".to_string(), "2".to_string()).await;
        tokio::time::sleep(Duration::from_millis(25)).await;

        cache.insert("c".to_string(), "3".to_string()).await;
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn last_write_wins_on_same_key() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("k".to_string(), "first".to_string()).await;
        cache.insert("k".to_string(), "second".to_string()).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("second"));
    }
}
