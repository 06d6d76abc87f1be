use async_trait::async_trait;

use crate::error::{CoreResult, RemoteError};
use crate::resource::{DirectoryHealth, ResourceDescriptor};
use crate::result::SearchResult;

/// Keyed store of resource descriptors with role bookkeeping.
///
/// Implementations own their synchronization: concurrent `get`/`put` on
/// the same id are linearizable and never observe a partially-written
/// descriptor.
#[async_trait]
pub trait ResourceDirectory: Send + Sync {
    /// Returns the descriptor of the local node. Exactly one descriptor
    /// holds this role at all times.
    async fn self_descriptor(&self) -> CoreResult<ResourceDescriptor>;

    /// Returns the mother descriptor, when one is configured.
    async fn mother(&self) -> CoreResult<Option<ResourceDescriptor>>;

    /// Fetches a descriptor by id.
    async fn get(&self, id: &str) -> CoreResult<Option<ResourceDescriptor>>;

    /// Writes a descriptor, refreshing its `last_updated` stamp, and
    /// returns the stored copy. Writing the same descriptor twice is
    /// safe.
    async fn put(&self, descriptor: ResourceDescriptor) -> CoreResult<ResourceDescriptor>;

    /// Returns all descriptors, tombstones included.
    async fn list(&self) -> CoreResult<Vec<ResourceDescriptor>>;

    /// Summarizes the directory for health reporting.
    async fn health(&self) -> CoreResult<DirectoryHealth>;
}

/// Stores previously computed search results and serves the node's own
/// corpus.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Searches the local corpus. May fail when the index is unusable.
    async fn search(&self, query: &str) -> CoreResult<SearchResult>;

    /// Looks up a cached result for `(query, resource_id)`.
    async fn cache_search(&self, query: &str, resource_id: &str)
        -> CoreResult<Option<SearchResult>>;

    /// Best-effort write-through of a provenance-tagged result. Failures
    /// are logged by the implementation, never propagated.
    async fn offer(&self, result: SearchResult);
}

/// Performs live calls against a peer's remote API.
///
/// One attempt per request; timeouts and cancellation are the
/// implementation's responsibility, retries are nobody's.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Asks the peer `via` (usually mother) for the descriptor of `id`.
    async fn resolve_descriptor(
        &self,
        via: &ResourceDescriptor,
        id: &str,
    ) -> Result<ResourceDescriptor, RemoteError>;

    /// Runs `query` against `target`'s search API.
    async fn live_search(
        &self,
        target: &ResourceDescriptor,
        query: &str,
    ) -> Result<SearchResult, RemoteError>;
}

/// Ranks which child resources are relevant to a self-path result.
///
/// Invoked exactly once per self-path request that yields a non-empty or
/// health-only result; annotates the result in place. Implementations
/// must not fail: anything going wrong internally degrades to an
/// unscored result.
pub trait SelectionScorer: Send + Sync {
    fn score(
        &self,
        result: &mut SearchResult,
        query: Option<&str>,
        resources: &[ResourceDescriptor],
    );
}
