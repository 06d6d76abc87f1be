pub mod handlers;
pub mod rest;
pub mod state;

pub use rest::build_router;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use fedsearch_core::{
    CoreError, CoreResult, FedsearchConfig, QueryCounters, ResourceDescriptor,
};
use fedsearch_directory::MemoryDirectory;
use fedsearch_index::MemoryIndex;
use fedsearch_remote::HttpRemoteClient;
use fedsearch_resolve::{ResolutionEngine, TermOverlapScorer};

/// Boots the fedsearch API stack with configuration from files and
/// environment.
pub async fn run_server() -> CoreResult<()> {
    let config = FedsearchConfig::load()
        .map_err(|e| CoreError::internal(format!("loading configuration: {e}")))?;

    run_with_config(config).await
}

/// Boots the fedsearch API stack with an explicit configuration.
pub async fn run_with_config(config: FedsearchConfig) -> CoreResult<()> {
    let state = build_state(&config).await?;
    let app = rest::build_router(state);

    let addr: SocketAddr = config.server.bind_address.parse().map_err(|e| {
        CoreError::internal(format!(
            "invalid bind address '{}': {e}",
            config.server.bind_address
        ))
    })?;

    info!("Starting fedsearch API server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| CoreError::internal(format!("failed to bind to {addr}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CoreError::internal(format!("server error: {e}")))?;

    info!("fedsearch API server shutdown complete");
    Ok(())
}

/// Wires directory, index, remote client, and engine from configuration.
pub async fn build_state(config: &FedsearchConfig) -> CoreResult<AppState> {
    let mut myself = ResourceDescriptor::new(config.node.id.clone());
    myself.name = config.node.name.clone();
    myself.api_template = config.node.api_template.clone();
    myself.favicon = config.node.favicon.clone();

    let mut directory = MemoryDirectory::new(myself);
    if let (Some(mother_id), Some(template)) =
        (&config.node.mother_id, &config.node.mother_template)
    {
        info!(mother = %mother_id, "mother configured");
        directory = directory.with_mother(
            ResourceDescriptor::new(mother_id.clone()).with_api_template(template.clone()),
        );
    }

    let index = MemoryIndex::new(&config.cache);
    if let Some(path) = &config.node.corpus_path {
        let count = index.ingest_file(path).await?;
        info!(count, path, "local corpus ingested");
    }

    let remote = HttpRemoteClient::new(&config.remote)?;

    let engine = ResolutionEngine::new(
        Arc::new(directory),
        Arc::new(index),
        Arc::new(remote),
        Arc::new(TermOverlapScorer),
        Arc::new(QueryCounters::new()),
        config.policy.clone(),
    );

    Ok(AppState::new(Arc::new(engine)))
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received CTRL+C signal, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM signal, initiating graceful shutdown");
        }
    }
}
