//! Composite cache key for a validated (account, API key) pair

use sha2::{Digest, Sha256};

/// Identity of a known-valid credential in the key cache
///
/// Only a SHA-256 digest of the API key is kept, so the cache never holds
/// plaintext secrets. Account and digest are separate fields, which keeps
/// `("ab", "c")` and `("a", "bc")` distinct without any delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCacheEntry {
    account: String,
    key_digest: [u8; 32],
}

impl KeyCacheEntry {
    pub fn new(account: impl Into<String>, api_key: &str) -> Self {
        Self {
            account: account.into(),
            key_digest: Sha256::digest(api_key.as_bytes()).into(),
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Hex-encoded digest of the API key
    pub fn key_fingerprint(&self) -> String {
        hex::encode(self.key_digest)
    }
}
