//! Resolution handler: one GET per resource id, with or without query.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use fedsearch_resolve::{QueryResponse, ResolveError};

use crate::state::AppState;

/// Query-string parameters of a resolution request
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search text; absent or blank turns the request into a
    /// descriptor/health lookup
    pub q: Option<String>,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Resolve a resource id, optionally running a search against it
pub async fn resolve_resource(
    State(state): State<AppState>,
    Path(resource_id): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Json<QueryResponse>, ApiError> {
    // A trailing ".json" is a transport-level alias for the bare id;
    // the engine only ever sees the stripped form.
    let resource_id = resource_id
        .strip_suffix(".json")
        .unwrap_or(&resource_id);

    debug!(resource_id, query = ?params.q, "resolution request");

    let response = state
        .engine
        .resolve(resource_id, params.q.as_deref())
        .await?;

    Ok(Json(response))
}

/// Transport wrapper for the engine's status taxonomy
#[derive(Debug)]
pub struct ApiError(ResolveError);

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = self.0.to_string();

        (status, Json(ErrorResponse { message })).into_response()
    }
}
