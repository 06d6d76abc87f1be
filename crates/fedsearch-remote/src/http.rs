use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use fedsearch_core::{
    CoreError, CoreResult, RemoteClient, RemoteConfig, RemoteError, ResourceDescriptor,
    SearchResult,
};

use crate::template::expand_template;

/// `RemoteClient` over HTTP.
///
/// One GET per call, bounded by the configured timeout; no retries. A
/// peer's self-reported provenance never crosses this boundary: results
/// come back stripped, ready for the engine to stamp with the descriptor
/// it actually resolved.
pub struct HttpRemoteClient {
    http: reqwest::Client,
}

impl HttpRemoteClient {
    /// Creates a client with the configured per-request timeout.
    pub fn new(config: &RemoteConfig) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CoreError::internal(format!("building HTTP client: {e}")))?;

        Ok(Self { http })
    }

    async fn fetch_json(&self, url: &str) -> Result<(reqwest::StatusCode, JsonValue), RemoteError> {
        debug!(url, "remote call");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| RemoteError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Ok((status, JsonValue::Null));
        }

        let body = response
            .json::<JsonValue>()
            .await
            .map_err(|e| RemoteError::Unavailable(format!("malformed response: {e}")))?;

        Ok((status, body))
    }
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn resolve_descriptor(
        &self,
        via: &ResourceDescriptor,
        id: &str,
    ) -> Result<ResourceDescriptor, RemoteError> {
        let Some(template) = &via.api_template else {
            return Err(RemoteError::Unavailable(format!(
                "resource {} has no api template",
                via.id
            )));
        };

        let url = expand_template(template, id, "");
        let (status, body) = self.fetch_json(&url).await?;

        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::GONE {
            return Err(RemoteError::NotFound);
        }
        if !status.is_success() {
            return Err(RemoteError::Unavailable(format!(
                "peer answered {status}"
            )));
        }

        parse_descriptor(&body, id)
    }

    async fn live_search(
        &self,
        target: &ResourceDescriptor,
        query: &str,
    ) -> Result<SearchResult, RemoteError> {
        let Some(template) = &target.api_template else {
            return Err(RemoteError::Unavailable(format!(
                "resource {} has no api template",
                target.id
            )));
        };

        let url = expand_template(template, &target.id, query);
        let (status, body) = self.fetch_json(&url).await?;

        if !status.is_success() {
            warn!(target = %target.id, %status, "live search failed");
            return Err(RemoteError::Unavailable(format!(
                "peer answered {status}"
            )));
        }

        parse_search_result(body)
    }
}

/// Pulls the descriptor for `id` out of a peer's `{"resource": …}`
/// response.
fn parse_descriptor(body: &JsonValue, id: &str) -> Result<ResourceDescriptor, RemoteError> {
    let resource = body
        .get("resource")
        .ok_or_else(|| RemoteError::Unavailable("response carries no resource".to_string()))?;

    let descriptor: ResourceDescriptor = serde_json::from_value(resource.clone())
        .map_err(|e| RemoteError::Unavailable(format!("malformed resource: {e}")))?;

    if descriptor.id != id {
        return Err(RemoteError::Unavailable(format!(
            "asked for {id}, peer described {}",
            descriptor.id
        )));
    }

    Ok(descriptor)
}

/// Parses a peer's `{"hits": …}` response, dropping whatever provenance
/// the peer claims for itself.
fn parse_search_result(body: JsonValue) -> Result<SearchResult, RemoteError> {
    let mut result: SearchResult = serde_json::from_value(body)
        .map_err(|e| RemoteError::Unavailable(format!("malformed result: {e}")))?;

    result.strip_provenance();
    Ok(result)
}
