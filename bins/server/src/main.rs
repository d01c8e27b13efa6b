//! Sarraf API Server
//!
//! Main entry point for the Sarraf ledger backend.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sarraf_api::{AppState, create_router};
use sarraf_core::LedgerService;
use sarraf_shared::AppConfig;
use sarraf_store::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sarraf=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    info!(
        enforce_funds_on_create = config.ledger.enforce_funds_on_create,
        cascade_delete_transactions = config.ledger.cascade_delete_transactions,
        "Ledger policy loaded"
    );

    // Wire the store and the ledger service
    let store = Arc::new(MemoryStore::new());
    let ledger = Arc::new(LedgerService::new(store.clone(), config.ledger));

    let state = AppState { ledger, store };
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
