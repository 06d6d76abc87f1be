use moka::future::Cache as MokaCache;
use sha2::{Digest, Sha256};

use fedsearch_core::{CacheConfig, SearchResult};

/// Result cache keyed by `(resource id, query)`.
///
/// Keys are SHA-256 hashes so identical lookups hash to identical keys
/// regardless of the characters peers put into queries or ids. Entries
/// expire by TTL and capacity; eviction is the cache's business, the
/// resolution core only sees hit or miss.
#[derive(Clone)]
pub struct ResultCache {
    memory_cache: MokaCache<String, SearchResult>,
}

impl ResultCache {
    /// Creates a cache with the configured capacity and TTL.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let memory_cache = MokaCache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl())
            .build();

        Self { memory_cache }
    }

    /// Generate the cache key for a `(resource id, query)` pair.
    #[must_use]
    pub fn generate_key(resource_id: &str, query: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(resource_id.as_bytes());
        hasher.update([0u8]);
        hasher.update(query.as_bytes());
        format!("rc:{:x}", hasher.finalize())
    }

    /// Looks up the cached result for `(resource id, query)`.
    pub async fn get(&self, resource_id: &str, query: &str) -> Option<SearchResult> {
        self.memory_cache
            .get(&Self::generate_key(resource_id, query))
            .await
    }

    /// Stores a result under `(resource id, query)`.
    pub async fn put(&self, resource_id: &str, query: &str, result: SearchResult) {
        self.memory_cache
            .insert(Self::generate_key(resource_id, query), result)
            .await;
    }

    /// Number of live entries (eviction may lag).
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.memory_cache.entry_count()
    }
}
