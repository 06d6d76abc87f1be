//! API state management

use std::sync::Arc;

use fedsearch_resolve::ResolutionEngine;

/// Shared application state for the API server.
///
/// The engine already holds its collaborators; the transport layer only
/// needs a handle to it.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ResolutionEngine>,
}

impl AppState {
    /// Create a new application state around a wired engine.
    pub fn new(engine: Arc<ResolutionEngine>) -> Self {
        Self { engine }
    }
}
