use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use fedsearch_core::{
    CoreError, CoreResult, DirectoryHealth, ResourceDescriptor, ResourceDirectory,
};

/// In-memory resource directory.
///
/// Descriptors live in a `HashMap` behind a `tokio::sync::RwLock`, so
/// concurrent `get`/`put` on the same id are linearizable. The self
/// descriptor is inserted at construction and never removed, which keeps
/// the exactly-one-self invariant without further checks.
pub struct MemoryDirectory {
    self_id: String,
    mother_id: Option<String>,
    entries: RwLock<HashMap<String, ResourceDescriptor>>,
}

impl MemoryDirectory {
    /// Creates a directory whose `self` role is held by `myself`.
    #[must_use]
    pub fn new(myself: ResourceDescriptor) -> Self {
        let self_id = myself.id.clone();
        let mut entries = HashMap::new();
        entries.insert(self_id.clone(), myself);

        Self {
            self_id,
            mother_id: None,
            entries: RwLock::new(entries),
        }
    }

    /// Registers `mother` as the parent node (builder pattern).
    #[must_use]
    pub fn with_mother(mut self, mother: ResourceDescriptor) -> Self {
        let mother_id = mother.id.clone();
        self.entries
            .get_mut()
            .insert(mother_id.clone(), mother);
        self.mother_id = Some(mother_id);
        self
    }
}

#[async_trait]
impl ResourceDirectory for MemoryDirectory {
    async fn self_descriptor(&self) -> CoreResult<ResourceDescriptor> {
        let entries = self.entries.read().await;
        entries
            .get(&self.self_id)
            .cloned()
            .ok_or_else(|| CoreError::internal("self descriptor missing from directory"))
    }

    async fn mother(&self) -> CoreResult<Option<ResourceDescriptor>> {
        let Some(mother_id) = &self.mother_id else {
            return Ok(None);
        };
        let entries = self.entries.read().await;
        Ok(entries.get(mother_id).cloned())
    }

    async fn get(&self, id: &str) -> CoreResult<Option<ResourceDescriptor>> {
        let entries = self.entries.read().await;
        Ok(entries.get(id).cloned())
    }

    async fn put(&self, mut descriptor: ResourceDescriptor) -> CoreResult<ResourceDescriptor> {
        descriptor.last_updated = Utc::now();

        let mut entries = self.entries.write().await;
        entries.insert(descriptor.id.clone(), descriptor.clone());
        debug!(id = %descriptor.id, deleted = descriptor.deleted, "descriptor stored");

        Ok(descriptor)
    }

    async fn list(&self) -> CoreResult<Vec<ResourceDescriptor>> {
        let entries = self.entries.read().await;
        let mut descriptors: Vec<ResourceDescriptor> = entries.values().cloned().collect();
        descriptors.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(descriptors)
    }

    async fn health(&self) -> CoreResult<DirectoryHealth> {
        let entries = self.entries.read().await;
        let deleted = entries.values().filter(|d| d.deleted).count();
        let oldest_update = entries
            .values()
            .filter(|d| !d.deleted)
            .map(|d| d.last_updated)
            .min();

        Ok(DirectoryHealth {
            resources: entries.len(),
            deleted,
            mother: self.mother_id.clone(),
            oldest_update,
        })
    }
}
