use std::path::Path;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use fedsearch_core::{CacheConfig, CoreResult, Hit, SearchIndex, SearchResult};

use crate::cache::ResultCache;
use crate::corpus::CorpusIndex;

/// In-memory implementation of the `SearchIndex` collaborator: the
/// node's own corpus plus the write-through result cache.
pub struct MemoryIndex {
    corpus: RwLock<CorpusIndex>,
    cache: ResultCache,
}

impl MemoryIndex {
    /// Creates an empty index with the given cache settings.
    #[must_use]
    pub fn new(cache_config: &CacheConfig) -> Self {
        Self {
            corpus: RwLock::new(CorpusIndex::new()),
            cache: ResultCache::new(cache_config),
        }
    }

    /// Adds one document to the local corpus.
    pub async fn insert_document(&self, hit: Hit) {
        self.corpus.write().await.insert(hit);
    }

    /// Loads a JSON array of documents into the corpus, returning how
    /// many were indexed.
    pub async fn ingest_file<P: AsRef<Path>>(&self, path: P) -> CoreResult<usize> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let hits: Vec<Hit> = serde_json::from_str(&raw)?;
        let count = hits.len();

        let mut corpus = self.corpus.write().await;
        for hit in hits {
            corpus.insert(hit);
        }
        debug!(count, path = %path.as_ref().display(), "corpus ingested");

        Ok(count)
    }
}

#[async_trait]
impl SearchIndex for MemoryIndex {
    async fn search(&self, query: &str) -> CoreResult<SearchResult> {
        let corpus = self.corpus.read().await;
        Ok(SearchResult::from_hits(corpus.search(query)))
    }

    async fn cache_search(
        &self,
        query: &str,
        resource_id: &str,
    ) -> CoreResult<Option<SearchResult>> {
        Ok(self.cache.get(resource_id, query).await)
    }

    async fn offer(&self, result: SearchResult) {
        // Cache entries always carry provenance; an untagged offer has
        // nowhere to be filed.
        let (resource_id, query) = match (&result.resource_id, &result.query) {
            (Some(resource_id), Some(query)) => (resource_id.clone(), query.clone()),
            _ => {
                warn!("dropping untagged result offered to the cache");
                return;
            }
        };
        self.cache.put(&resource_id, &query, result).await;
    }
}
