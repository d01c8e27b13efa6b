//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod analysis;
pub mod backup;
pub mod customers;
pub mod dashboard;
pub mod exchange_rate;
pub mod health;
pub mod transactions;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(customers::routes())
        .merge(transactions::routes())
        .merge(exchange_rate::routes())
        .merge(backup::routes())
        .merge(dashboard::routes())
        .merge(analysis::routes())
}
