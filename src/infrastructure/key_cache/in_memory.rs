//! In-memory key cache implementation using moka

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use moka::policy::EvictionPolicy;
use tracing::debug;

use crate::domain::key_cache::{KeyCache, KeyCacheEntry};

/// Default number of cached credentials
pub const DEFAULT_KEY_CACHE_CAPACITY: u64 = 10_000;

/// Configuration for the in-memory key cache
#[derive(Debug, Clone)]
pub struct InMemoryKeyCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
}

impl Default for InMemoryKeyCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: DEFAULT_KEY_CACHE_CAPACITY,
        }
    }
}

impl InMemoryKeyCacheConfig {
    /// Sets the maximum capacity
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }
}

/// Thread-safe LRU key cache backed by moka
///
/// Entries never expire by time. Once the cache is full, admitting a new
/// pair evicts the least-recently-used one. Both `contains` hits and `add`
/// refresh recency.
#[derive(Debug)]
pub struct InMemoryKeyCache {
    cache: MokaCache<KeyCacheEntry, ()>,
    config: InMemoryKeyCacheConfig,
}

impl InMemoryKeyCache {
    /// Creates a key cache with the default capacity
    pub fn new() -> Self {
        Self::with_config(InMemoryKeyCacheConfig::default())
    }

    /// Creates a key cache holding at most `capacity` pairs
    pub fn with_capacity(capacity: u64) -> Self {
        Self::with_config(InMemoryKeyCacheConfig::default().with_max_capacity(capacity))
    }

    pub fn with_config(config: InMemoryKeyCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self { cache, config }
    }
}

impl Default for InMemoryKeyCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyCache for InMemoryKeyCache {
    async fn contains(&self, account: &str, api_key: &str) -> bool {
        // `get` records the read, `contains_key` would not touch recency
        self.cache
            .get(&KeyCacheEntry::new(account, api_key))
            .await
            .is_some()
    }

    async fn add(&self, account: &str, api_key: &str) {
        let entry = KeyCacheEntry::new(account, api_key);
        let fingerprint = entry.key_fingerprint();
        debug!(
            account = %entry.account(),
            key_fingerprint = %&fingerprint[..12],
            "Caching validated API key"
        );

        self.cache.insert(entry, ()).await;

        // Apply buffered reads and the insert so the capacity bound holds on return
        self.cache.run_pending_tasks().await;
    }

    async fn len(&self) -> usize {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count() as usize
    }

    fn capacity(&self) -> u64 {
        self.config.max_capacity
    }
}
