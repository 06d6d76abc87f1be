//! Resource descriptors: the federation's view of one search engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptor of one search engine in the federation: the local node
/// itself, its mother, or a child resource learned from mother.
///
/// Descriptors are written into a directory, never deleted outright:
/// marking `deleted` overwrites a live descriptor with a tombstone so
/// repeat requests keep getting a stable "gone" answer instead of
/// re-resolving the id as unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// Unique identifier within the directory.
    pub id: String,

    /// Human-readable name advertised by the peer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// URL template for the peer's search API. `{q}` expands to the
    /// query, `{r}` to a resource id. Absent for descriptors that must
    /// not be called or shared.
    #[serde(
        rename = "apitemplate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub api_template: Option<String>,

    /// Favicon URL advertised by the peer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    /// Refreshed whenever the descriptor is written into a directory.
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,

    /// Tombstone flag. Once true, the resource is gone for good.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,
}

impl ResourceDescriptor {
    /// Creates a descriptor with the given id and no remote endpoint.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            api_template: None,
            favicon: None,
            last_updated: Utc::now(),
            deleted: false,
        }
    }

    /// Creates a tombstone for the given id.
    #[must_use]
    pub fn tombstone(id: impl Into<String>) -> Self {
        let mut descriptor = Self::new(id);
        descriptor.deleted = true;
        descriptor
    }

    /// Sets the human-readable name (builder pattern).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the API template (builder pattern).
    #[must_use]
    pub fn with_api_template(mut self, template: impl Into<String>) -> Self {
        self.api_template = Some(template.into());
        self
    }

    /// Sets the favicon URL (builder pattern).
    #[must_use]
    pub fn with_favicon(mut self, favicon: impl Into<String>) -> Self {
        self.favicon = Some(favicon.into());
        self
    }

    /// Seconds elapsed since the descriptor was last written.
    #[must_use]
    pub fn seconds_since_update(&self, now: DateTime<Utc>) -> i64 {
        (now - self.last_updated).num_seconds()
    }

    /// True when the descriptor is older than the staleness threshold.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, threshold_secs: u64) -> bool {
        self.seconds_since_update(now) > threshold_secs as i64
    }

    /// Client-facing projection of the descriptor.
    ///
    /// The API template is included only when the sharing policy allows
    /// exposing it; when withheld the field is omitted, not nulled.
    #[must_use]
    pub fn client_view(&self, share_template: bool) -> ResourceView {
        ResourceView {
            id: self.id.clone(),
            name: self.name.clone(),
            api_template: share_template.then(|| self.api_template.clone()).flatten(),
            favicon: self.favicon.clone(),
        }
    }

    /// Per-resource health block for descriptor responses.
    #[must_use]
    pub fn health_view(&self) -> ResourceHealth {
        ResourceHealth {
            last_updated: self.last_updated,
            deleted: self.deleted,
        }
    }
}

/// Sanitized, client-facing projection of a [`ResourceDescriptor`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "apitemplate", skip_serializing_if = "Option::is_none")]
    pub api_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

/// Health block attached to child descriptor responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceHealth {
    pub last_updated: DateTime<Utc>,
    pub deleted: bool,
}

/// Structured summary of a resource directory, embedded in the local
/// node's health report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryHealth {
    /// Total descriptors, tombstones included.
    pub resources: usize,

    /// Tombstoned descriptors.
    pub deleted: usize,

    /// Mother id, when one is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother: Option<String>,

    /// Oldest `last_updated` across non-deleted descriptors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest_update: Option<DateTime<Utc>>,
}
