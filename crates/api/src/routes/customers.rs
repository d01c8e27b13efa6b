//! Customer CRUD routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use sarraf_core::{Customer, CustomerPatch, LedgerError, NewCustomer};
use sarraf_shared::CustomerId;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::AppState;
use crate::error::ApiResult;

/// Creates the customer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

/// Request body for registering a customer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    /// Display name (required).
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Avatar image reference.
    pub avatar: Option<String>,
    /// Opening dinar balance, zero when omitted.
    #[serde(default)]
    pub dinar_balance: Decimal,
    /// Opening dollar balance, zero when omitted.
    #[serde(default)]
    pub dollar_balance: Decimal,
}

/// Request body for editing profile fields. Balances are never edited
/// through this route.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    /// New display name.
    pub name: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
    /// New postal address.
    pub address: Option<String>,
    /// New avatar reference.
    pub avatar: Option<String>,
}

/// GET `/customers` - List all customers.
async fn list_customers(State(state): State<AppState>) -> ApiResult<Json<Vec<Customer>>> {
    let customers = state
        .store
        .list_customers()
        .await
        .map_err(LedgerError::Store)?;
    Ok(Json(customers))
}

/// POST `/customers` - Register a customer.
async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> ApiResult<(StatusCode, Json<Customer>)> {
    if payload.name.trim().is_empty() {
        return Err(LedgerError::Validation("Customer name is required".to_string()).into());
    }
    let customer = state
        .ledger
        .create_customer(NewCustomer {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            avatar: payload.avatar,
            dinar_balance: payload.dinar_balance,
            dollar_balance: payload.dollar_balance,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET `/customers/{id}` - Fetch one customer.
async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> ApiResult<Json<Customer>> {
    let customer = state
        .store
        .find_customer(id)
        .await
        .map_err(LedgerError::Store)?
        .ok_or(LedgerError::CustomerNotFound(id))?;
    Ok(Json(customer))
}

/// PUT `/customers/{id}` - Update profile fields.
async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> ApiResult<Json<Customer>> {
    let customer = state
        .ledger
        .update_customer_profile(
            id,
            CustomerPatch {
                name: payload.name,
                email: payload.email,
                phone: payload.phone,
                address: payload.address,
                avatar: payload.avatar,
            },
        )
        .await?;
    Ok(Json(customer))
}

/// DELETE `/customers/{id}` - Remove a customer.
async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> ApiResult<Json<Value>> {
    state.ledger.delete_customer(id).await?;
    Ok(Json(json!({ "message": "Customer deleted" })))
}
