//! Backup dump and destructive restore.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::get;
use axum::{Json, Router};
use sarraf_core::{BackupData, LedgerError};
use serde_json::{Value, json};
use tracing::info;

use crate::AppState;
use crate::error::ApiResult;

/// Creates the backup routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/backup", get(export_backup).post(import_backup))
}

/// GET `/backup` - Full JSON dump of the store.
async fn export_backup(State(state): State<AppState>) -> ApiResult<Json<BackupData>> {
    let data = state.store.snapshot().await.map_err(LedgerError::Store)?;
    Ok(Json(data))
}

/// POST `/backup` - Destructive restore: every existing customer,
/// transaction, and rate record is replaced by the imported dump.
async fn import_backup(
    State(state): State<AppState>,
    payload: Result<Json<BackupData>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(data) = payload
        .map_err(|rejection| LedgerError::Validation(rejection.body_text()))?;

    let customers = data.customers.len();
    let transactions = data.transactions.len();
    state.store.restore(data).await.map_err(LedgerError::Store)?;

    info!(customers, transactions, "Backup imported");
    Ok(Json(json!({ "message": "Backup restored" })))
}
