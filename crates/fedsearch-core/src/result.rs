//! Search results and the provenance tags carried by cache-bound copies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// One search hit. The core only cares that hits exist and keep their
/// order; everything beyond the common fields is passed through opaquely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Peer-specific fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Hit {
    /// Creates an empty hit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title (builder pattern).
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the url (builder pattern).
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Relevance annotation produced by resource-selection scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceScore {
    pub resource_id: String,
    pub score: usize,
}

/// An ordered set of hits plus the provenance tags identifying how the
/// result was produced.
///
/// Provenance (`resource_id`, `query`, `retrieved_at`) is stamped onto
/// the copy that goes into the result cache and stripped from every
/// client-facing copy: the response payload carries the descriptor the
/// engine resolved, never whatever a peer claims about itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub hits: Vec<Hit>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieved_at: Option<DateTime<Utc>>,

    /// Filled in by resource-selection scoring on self-path results.
    /// Never serialized; ranking internals are a collaborator concern.
    #[serde(skip)]
    pub scored_resources: Vec<ResourceScore>,
}

impl SearchResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a result from hits, with no provenance.
    #[must_use]
    pub fn from_hits(hits: Vec<Hit>) -> Self {
        Self {
            hits,
            ..Self::default()
        }
    }

    /// True when the result carries no hits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Stamps the provenance tags onto this copy.
    pub fn tag_provenance(
        &mut self,
        resource_id: impl Into<String>,
        query: impl Into<String>,
        retrieved_at: DateTime<Utc>,
    ) {
        self.resource_id = Some(resource_id.into());
        self.query = Some(query.into());
        self.retrieved_at = Some(retrieved_at);
    }

    /// Removes all provenance tags from this copy.
    pub fn strip_provenance(&mut self) {
        self.resource_id = None;
        self.query = None;
        self.retrieved_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_and_strip_provenance() {
        let mut result = SearchResult::from_hits(vec![Hit::new().with_title("first")]);
        assert!(result.resource_id.is_none());

        result.tag_provenance("wiki", "test query", Utc::now());
        assert_eq!(result.resource_id.as_deref(), Some("wiki"));
        assert_eq!(result.query.as_deref(), Some("test query"));
        assert!(result.retrieved_at.is_some());

        result.strip_provenance();
        assert!(result.resource_id.is_none());
        assert!(result.query.is_none());
        assert!(result.retrieved_at.is_none());
        assert_eq!(result.hits.len(), 1);
    }

    #[test]
    fn test_client_serialization_has_no_provenance_fields() {
        let mut result = SearchResult::from_hits(vec![Hit::new().with_url("http://a.example")]);
        result.strip_provenance();

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("resource_id").is_none());
        assert!(json.get("query").is_none());
        assert!(json.get("retrieved_at").is_none());
        assert_eq!(json["hits"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_hit_passthrough_fields() {
        let json = r#"{"title":"t","url":"http://a.example","tags":["x","y"]}"#;
        let hit: Hit = serde_json::from_str(json).unwrap();

        assert_eq!(hit.title.as_deref(), Some("t"));
        assert_eq!(hit.extra["tags"].as_array().unwrap().len(), 2);

        let round = serde_json::to_value(&hit).unwrap();
        assert_eq!(round["tags"][0], "x");
    }
}
