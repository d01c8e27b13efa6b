//! Transaction routes: listing, creation, edit, delete, and transfer.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use sarraf_core::{
    LedgerError, NewTransaction, Transaction, TransactionFilter, TransactionKind,
    TransactionUpdate, TransferRequest,
};
use sarraf_shared::{Currency, CustomerId, TransactionId};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::AppState;
use crate::error::ApiResult;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/transactions/transfer", post(transfer))
        .route(
            "/transactions/customer/{customer_id}",
            get(list_customer_transactions),
        )
        .route(
            "/transactions/{id}",
            axum::routing::put(update_transaction).delete(delete_transaction),
        )
}

/// Request body for creating a transaction.
///
/// The type arrives as free text so an unrecognized value maps to the
/// dedicated `INVALID_TRANSACTION_TYPE` error instead of a generic
/// deserialization failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Transaction type: `deposit`, `withdraw`, or `exchange`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Amount in `fromCurrency`.
    pub amount: Decimal,
    /// Source currency.
    pub from_currency: Currency,
    /// Target currency, required for exchanges.
    pub to_currency: Option<Currency>,
    /// Optional free-text note.
    pub note: Option<String>,
}

/// Request body for editing a transaction in place.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionRequest {
    /// New transaction type.
    #[serde(rename = "type")]
    pub kind: String,
    /// New amount.
    pub amount: Decimal,
    /// New source currency.
    pub from_currency: Currency,
    /// New target currency for exchanges.
    pub to_currency: Option<Currency>,
    /// New note.
    pub note: Option<String>,
}

/// Request body for a customer-to-customer transfer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferMoneyRequest {
    /// Customer to debit.
    pub from_customer_id: CustomerId,
    /// Customer to credit.
    pub to_customer_id: CustomerId,
    /// Amount to move.
    pub amount: Decimal,
    /// Currency of both legs.
    pub currency: Currency,
}

/// Response for a completed transfer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    /// Human-readable confirmation.
    pub message: &'static str,
    /// The withdraw leg on the source customer.
    pub withdraw_transaction: Transaction,
    /// The deposit leg on the target customer.
    pub deposit_transaction: Transaction,
}

fn parse_kind(kind: &str) -> Result<TransactionKind, LedgerError> {
    kind.parse().map_err(LedgerError::InvalidKind)
}

/// GET `/transactions` - List every transaction, newest first.
async fn list_transactions(State(state): State<AppState>) -> ApiResult<Json<Vec<Transaction>>> {
    let txs = state
        .store
        .list_transactions(&TransactionFilter::default())
        .await
        .map_err(LedgerError::Store)?;
    Ok(Json(txs))
}

/// GET `/transactions/customer/{customer_id}` - One customer's history.
async fn list_customer_transactions(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let filter = TransactionFilter {
        customer_id: Some(customer_id),
        ..TransactionFilter::default()
    };
    let txs = state
        .store
        .list_transactions(&filter)
        .await
        .map_err(LedgerError::Store)?;
    Ok(Json(txs))
}

/// POST `/transactions` - Apply a new transaction to its customer.
async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransactionRequest>,
) -> ApiResult<Json<Transaction>> {
    let kind = parse_kind(&payload.kind)?;
    let tx = state
        .ledger
        .create_transaction(NewTransaction {
            customer_id: payload.customer_id,
            kind,
            amount: payload.amount,
            from_currency: payload.from_currency,
            to_currency: payload.to_currency,
            note: payload.note,
        })
        .await?;
    Ok(Json(tx))
}

/// PUT `/transactions/{id}` - Replace a transaction and rebalance.
async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<TransactionId>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> ApiResult<Json<Transaction>> {
    let kind = parse_kind(&payload.kind)?;
    let tx = state
        .ledger
        .update_transaction(
            id,
            TransactionUpdate {
                kind,
                amount: payload.amount,
                from_currency: payload.from_currency,
                to_currency: payload.to_currency,
                note: payload.note,
            },
        )
        .await?;
    Ok(Json(tx))
}

/// DELETE `/transactions/{id}` - Reverse and remove a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<TransactionId>,
) -> ApiResult<Json<Value>> {
    state.ledger.delete_transaction(id).await?;
    Ok(Json(json!({ "message": "Transaction deleted" })))
}

/// POST `/transactions/transfer` - Move funds between two customers.
async fn transfer(
    State(state): State<AppState>,
    Json(payload): Json<TransferMoneyRequest>,
) -> ApiResult<Json<TransferResponse>> {
    let outcome = state
        .ledger
        .transfer(TransferRequest {
            from_customer_id: payload.from_customer_id,
            to_customer_id: payload.to_customer_id,
            amount: payload.amount,
            currency: payload.currency,
        })
        .await?;
    Ok(Json(TransferResponse {
        message: "Transfer completed",
        withdraw_transaction: outcome.withdraw,
        deposit_transaction: outcome.deposit,
    }))
}
