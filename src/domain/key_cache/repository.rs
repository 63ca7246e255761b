//! Key cache trait definition

use std::fmt::Debug;

use async_trait::async_trait;

/// Bounded membership store of (account, API key) pairs known to be valid
///
/// Operations are total: absence is a normal outcome and insertion always
/// succeeds, possibly evicting the least-recently-used entry.
#[async_trait]
pub trait KeyCache: Send + Sync + Debug {
    /// Checks whether the pair is cached as valid, refreshing its recency on a hit
    async fn contains(&self, account: &str, api_key: &str) -> bool;

    /// Marks the pair as valid and most-recently-used
    async fn add(&self, account: &str, api_key: &str);

    /// Number of cached pairs once pending evictions have been applied
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Fixed maximum number of cached pairs
    fn capacity(&self) -> u64;
}
