//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for customers, transactions, the exchange rate,
//!   backup, the dashboard, and analysis views
//! - The shared application state
//! - Error-to-response mapping

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use sarraf_core::{LedgerService, LedgerStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The ledger service owning every balance-mutating path.
    pub ledger: Arc<LedgerService>,
    /// The store, for read-only listings and backup.
    pub store: Arc<dyn LedgerStore>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
