//! Reliability Tracker HTTP Server Binary
//!
//! This is the main entry point for the REST API server.
//! It initializes the repository, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Empty in-memory repository
//! cargo run --bin reliability-server
//!
//! # Preloaded from a dataset file
//! RELIABILITY_DATASET=data/dataset.json cargo run --bin reliability-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `CORS_ORIGINS`: Comma-separated allowed origins (default: any)
//! - `REPOSITORY_TYPE`: Repository backend (default: local)
//! - `RELIABILITY_DATASET`: JSON dataset to preload
//! - `RUST_LOG`: Log level (default: info)

use std::env;

use anyhow::Context;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use reliability_tracker::db::{self, RepositoryBuilder, RepositoryFactory};
use reliability_tracker::http::{create_router_with_config, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Reliability Tracker HTTP Server");

    let repository = create_repository().await?;
    let healthy = db::health_check(repository.as_ref()).await?;
    info!(
        "Repository initialized (healthy: {}, dataset: {})",
        healthy,
        repository
            .dataset_checksum()
            .unwrap_or_else(|| "none".to_string())
    );

    let config = ServerConfig::from_env();
    let state = AppState::new(repository);
    let app = create_router_with_config(state, &config);

    let addr = config
        .socket_addr()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.port))?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Environment first, then `repository.toml`, then an empty local store.
async fn create_repository() -> anyhow::Result<std::sync::Arc<dyn db::FullRepository>> {
    if env::var("REPOSITORY_TYPE").is_ok() || db::factory::dataset_path_from_env().is_some() {
        return RepositoryFactory::from_env()
            .await
            .context("failed to create repository from environment");
    }

    let builder = match RepositoryBuilder::new().from_default_config() {
        Ok(builder) => builder,
        Err(e) => {
            warn!("No usable repository.toml ({}); starting with an empty store", e);
            RepositoryBuilder::new()
        }
    };
    builder
        .build()
        .await
        .context("failed to create repository from repository.toml")
}
