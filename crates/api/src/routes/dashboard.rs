//! Dashboard aggregates.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Datelike, Duration, Utc};
use rust_decimal::Decimal;
use sarraf_core::{ExchangeRate, LedgerError, Transaction, TransactionFilter};
use sarraf_shared::Currency;
use serde::Serialize;

use crate::AppState;
use crate::error::ApiResult;

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(overview))
        .route("/dashboard/monthly-totals", get(monthly_totals))
}

/// Top-level dashboard figures.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Number of registered customers.
    pub total_customers: usize,
    /// Sum of all dinar safes.
    pub total_dinar_balance: Decimal,
    /// Sum of all dollar safes.
    pub total_dollar_balance: Decimal,
    /// The dollar-to-dinar rate, falling back to the bootstrap value when
    /// no rate record exists. This read does not create the record.
    pub exchange_rate_value: Decimal,
    /// Transactions from the last 30 days, newest first, at most ten.
    pub recent_transactions: Vec<Transaction>,
}

/// One calendar-month bucket of summed transaction amounts.
#[derive(Debug, Serialize)]
pub struct MonthlyTotal {
    /// Month name.
    pub name: &'static str,
    /// Sum of amounts dated in that month, any year.
    pub total: Decimal,
}

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// GET `/dashboard` - Customer counts, balance totals, and recent activity.
async fn overview(State(state): State<AppState>) -> ApiResult<Json<DashboardResponse>> {
    let customers = state
        .store
        .list_customers()
        .await
        .map_err(LedgerError::Store)?;

    let mut total_dinar = Decimal::ZERO;
    let mut total_dollar = Decimal::ZERO;
    for customer in &customers {
        total_dinar += customer.safes.balance(Currency::Dinar);
        total_dollar += customer.safes.balance(Currency::Dollar);
    }

    let exchange_rate_value = state
        .store
        .find_rate()
        .await
        .map_err(LedgerError::Store)?
        .map_or(ExchangeRate::DEFAULT_DOLLAR_TO_DINAR, |rate| {
            rate.dollar_to_dinar
        });

    let filter = TransactionFilter {
        start_date: Some(Utc::now() - Duration::days(30)),
        ..TransactionFilter::default()
    };
    let mut recent = state
        .store
        .list_transactions(&filter)
        .await
        .map_err(LedgerError::Store)?;
    recent.truncate(10);

    Ok(Json(DashboardResponse {
        total_customers: customers.len(),
        total_dinar_balance: total_dinar,
        total_dollar_balance: total_dollar,
        exchange_rate_value,
        recent_transactions: recent,
    }))
}

/// GET `/dashboard/monthly-totals` - Twelve buckets of summed amounts keyed
/// by the calendar month of the transaction date, all years folded together.
async fn monthly_totals(State(state): State<AppState>) -> ApiResult<Json<Vec<MonthlyTotal>>> {
    let txs = state
        .store
        .list_transactions(&TransactionFilter::default())
        .await
        .map_err(LedgerError::Store)?;

    let mut buckets = [Decimal::ZERO; 12];
    for tx in &txs {
        if let Some(bucket) = buckets.get_mut(tx.date.month0() as usize) {
            *bucket += tx.amount;
        }
    }

    let data = MONTH_NAMES
        .into_iter()
        .zip(buckets)
        .map(|(name, total)| MonthlyTotal { name, total })
        .collect();
    Ok(Json(data))
}
