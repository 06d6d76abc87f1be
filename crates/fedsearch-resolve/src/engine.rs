use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use fedsearch_core::{
    CounterSnapshot, DirectoryHealth, Hit, PolicyConfig, QueryCounters, RemoteClient,
    ResourceDescriptor, ResourceDirectory, ResourceHealth, ResourceView, SearchIndex,
    SearchResult, SelectionScorer,
};

use crate::error::ResolveError;

/// Successful resolution payload.
///
/// `resource` is always present. `hits` is present whenever a search was
/// attempted (possibly empty). `health` is present on self-path
/// descriptor requests and, sharing policy permitting, on child
/// descriptor requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hits: Option<Vec<Hit>>,

    pub resource: ResourceView,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<Health>,
}

/// Health block of a [`QueryResponse`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Health {
    /// Local node health: counters plus directory summary.
    Node(NodeHealth),
    /// Per-resource health of a child descriptor.
    Resource(ResourceHealth),
}

/// Health report of the local node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeHealth {
    #[serde(flatten)]
    pub queries: CounterSnapshot,
    pub directory: DirectoryHealth,
}

/// Orchestrates directory, index, remote client, and scorer into one
/// `resolve` operation per inbound request.
///
/// Holds no per-request state and no locks of its own; collaborators
/// own their synchronization, the engine owns the policy.
pub struct ResolutionEngine {
    directory: Arc<dyn ResourceDirectory>,
    index: Arc<dyn SearchIndex>,
    remote: Arc<dyn RemoteClient>,
    scorer: Arc<dyn SelectionScorer>,
    counters: Arc<QueryCounters>,
    policy: PolicyConfig,
}

impl ResolutionEngine {
    /// Wires the engine to its collaborators.
    pub fn new(
        directory: Arc<dyn ResourceDirectory>,
        index: Arc<dyn SearchIndex>,
        remote: Arc<dyn RemoteClient>,
        scorer: Arc<dyn SelectionScorer>,
        counters: Arc<QueryCounters>,
        policy: PolicyConfig,
    ) -> Self {
        Self {
            directory,
            index,
            remote,
            scorer,
            counters,
            policy,
        }
    }

    /// Counter snapshot, for callers assembling their own diagnostics.
    #[must_use]
    pub fn counters(&self) -> CounterSnapshot {
        self.counters.snapshot()
    }

    /// Resolves one request against a target resource id with an
    /// optional query. Empty and whitespace-only queries count as
    /// absent.
    pub async fn resolve(
        &self,
        resource_id: &str,
        query: Option<&str>,
    ) -> Result<QueryResponse, ResolveError> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());

        let me = self.directory.self_descriptor().await?;
        if resource_id == me.id {
            self.resolve_self(&me, query).await
        } else {
            self.resolve_child(resource_id, query).await
        }
    }

    async fn resolve_self(
        &self,
        me: &ResourceDescriptor,
        query: Option<&str>,
    ) -> Result<QueryResponse, ResolveError> {
        let Some(query) = query else {
            let mut result = SearchResult::new();
            self.run_selection(&mut result, None).await;

            let health = NodeHealth {
                queries: self.counters.snapshot(),
                directory: self.directory.health().await?,
            };
            info!(id = %me.id, "self descriptor request");
            return Ok(QueryResponse {
                hits: Some(result.hits),
                resource: me.client_view(true),
                health: Some(Health::Node(health)),
            });
        };

        let mut result = match self.index.search(query).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "local search failed");
                self.counters.record_error();
                return Err(ResolveError::ServiceUnavailable(e.to_string()));
            }
        };
        self.counters.record_ok();

        if result.is_empty() {
            if let Some(mother) = self.directory.mother().await? {
                match self.remote.live_search(&mother, query).await {
                    Ok(mut remote_result) => {
                        let mut cache_copy = remote_result.clone();
                        cache_copy.tag_provenance(mother.id.clone(), query, Utc::now());
                        self.index.offer(cache_copy).await;

                        remote_result.strip_provenance();
                        info!(query, "empty local result answered by mother");
                        result = remote_result;
                    }
                    // Deliberate policy: a failing mother never turns a
                    // successful local query into an error.
                    Err(e) => {
                        warn!(error = %e, "mother fallback failed, keeping local result");
                    }
                }
            } else {
                self.run_selection(&mut result, Some(query)).await;
            }
        } else {
            self.run_selection(&mut result, Some(query)).await;
        }

        info!(id = %me.id, query, hits = result.hits.len(), "local query served");
        Ok(QueryResponse {
            hits: Some(result.hits),
            resource: me.client_view(true),
            health: None,
        })
    }

    async fn resolve_child(
        &self,
        resource_id: &str,
        query: Option<&str>,
    ) -> Result<QueryResponse, ResolveError> {
        let mut engine = self.directory.get(resource_id).await?;

        // Tombstones win over everything, escalation included.
        if engine.as_ref().is_some_and(|d| d.deleted) {
            info!(id = resource_id, "tombstoned resource requested");
            return Err(ResolveError::Gone(resource_id.to_string()));
        }

        let now = Utc::now();
        let needs_escalation = match &engine {
            None => true,
            Some(descriptor) => descriptor.is_stale(now, self.policy.stale_threshold_secs),
        };

        if needs_escalation {
            if let Some(mother) = self.directory.mother().await? {
                match self.remote.resolve_descriptor(&mother, resource_id).await {
                    Ok(descriptor) => {
                        let stored = self.directory.put(descriptor).await?;
                        debug!(id = resource_id, "descriptor refreshed via mother");
                        engine = Some(stored);
                    }
                    Err(e) => {
                        warn!(id = resource_id, error = %e, "mother lookup failed");
                        return Err(ResolveError::NotFound(resource_id.to_string()));
                    }
                }
            }
        }

        let Some(engine) = engine else {
            warn!(id = resource_id, "unknown resource identifier");
            return Err(ResolveError::Unknown(resource_id.to_string()));
        };

        // Mother may have answered with a tombstone; it is stored above
        // so the next request short-circuits, and this one is gone too.
        if engine.deleted {
            return Err(ResolveError::Gone(resource_id.to_string()));
        }

        let share = self.policy.share_resources;

        let Some(query) = query else {
            info!(id = %engine.id, "child descriptor request");
            return Ok(QueryResponse {
                hits: None,
                resource: engine.client_view(share),
                health: share.then(|| Health::Resource(engine.health_view())),
            });
        };

        if let Some(mut cached) = self.index.cache_search(query, &engine.id).await? {
            // The stored copy carries provenance; the client copy never
            // does. It is stamped with the descriptor resolved now, not
            // whatever was current when cached.
            cached.strip_provenance();
            info!(id = %engine.id, query, "served from cache");
            return Ok(QueryResponse {
                hits: Some(cached.hits),
                resource: engine.client_view(share),
                health: None,
            });
        }

        match self.remote.live_search(&engine, query).await {
            Ok(mut result) => {
                result.strip_provenance();

                let mut cache_copy = result.clone();
                cache_copy.tag_provenance(engine.id.clone(), query, Utc::now());
                self.index.offer(cache_copy).await;

                info!(id = %engine.id, query, hits = result.hits.len(), "live query served");
                Ok(QueryResponse {
                    hits: Some(result.hits),
                    resource: engine.client_view(share),
                    health: None,
                })
            }
            Err(e) => {
                warn!(id = %engine.id, query, error = %e, "live query failed");
                Err(ResolveError::ResourceUnavailable {
                    id: engine.id.clone(),
                    cause: e.to_string(),
                })
            }
        }
    }

    /// Resource-selection scoring may never fail a request: any
    /// collaborator trouble degrades to an unscored result.
    async fn run_selection(&self, result: &mut SearchResult, query: Option<&str>) {
        match self.directory.list().await {
            Ok(resources) => self.scorer.score(result, query, &resources),
            Err(e) => warn!(error = %e, "resource selection skipped"),
        }
    }
}
