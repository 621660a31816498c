//! `mehndi-api serve`
//!
//! # Environment Variables
//!
//! See [`mehndi_api::config`] for the server settings. `DATABASE_URL` is
//! required unless `--in-memory` is given.

use mehndi_api::{
    app::{build_router, AppState},
    config::Config,
};
use mehndi_shared::{
    db::{migrations::run_migrations, ConnectionManager},
    repository::{Datastore, MemoryStore, PgStore},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Starts the server and runs until Ctrl-C
pub async fn run(in_memory: bool) -> anyhow::Result<()> {
    let config = Config::from_env()?;

    info!(
        "Mehndi Studio API v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let store: Arc<dyn Datastore> = if in_memory {
        warn!("Using the in-memory store; data will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        let manager = ConnectionManager::global();
        let pool = manager.connect().await?;
        run_migrations(&pool).await?;
        Arc::new(PgStore::new(manager))
    };

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(store, config));

    let listener = TcpListener::bind(&bind_address).await?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        return std::future::pending().await;
    }
    info!("Shutdown signal received, exiting...");
}
