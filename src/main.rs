//! KnowledgeHub backend server

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use knowledgehub_backend::{
    routes, AppState, Config, HttpSearchClient, R2ObjectStorage, SqliteStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "knowledgehub_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(port = config.port, db = %config.database_path, "Loaded configuration");

    // Open the catalog database; one store serves both entity types
    let store = Arc::new(SqliteStore::open(&config.database_path)?);

    // Wire up the object-storage bucket and the external search provider
    let storage = Arc::new(R2ObjectStorage::new(&config.storage));
    let search = Arc::new(HttpSearchClient::new(config.search.clone()));

    let state = Arc::new(AppState::new(store.clone(), store, storage, search));

    // Create router
    let app = routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Backend listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
