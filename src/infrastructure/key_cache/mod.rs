//! Key cache infrastructure - Key cache implementations

mod in_memory;

pub use in_memory::{DEFAULT_KEY_CACHE_CAPACITY, InMemoryKeyCache, InMemoryKeyCacheConfig};
