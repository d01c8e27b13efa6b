//! Exchange rate routes.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use sarraf_core::ExchangeRate;
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiResult;

/// Creates the exchange rate routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/exchange-rate", get(get_rate).put(set_rate))
}

/// Request body for setting the rate pair.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRateRequest {
    /// Rate applied when converting dinar to dollar.
    pub dinar_to_dollar: Decimal,
    /// Rate applied when converting dollar to dinar.
    pub dollar_to_dinar: Decimal,
}

/// GET `/exchange-rate` - Current rate, bootstrapping the default when the
/// record is absent.
async fn get_rate(State(state): State<AppState>) -> ApiResult<Json<ExchangeRate>> {
    let rate = state.ledger.get_rate().await?;
    Ok(Json(rate))
}

/// PUT `/exchange-rate` - Overwrite the singleton rate.
async fn set_rate(
    State(state): State<AppState>,
    Json(payload): Json<SetRateRequest>,
) -> ApiResult<Json<ExchangeRate>> {
    let rate = state
        .ledger
        .set_rate(payload.dinar_to_dollar, payload.dollar_to_dinar)
        .await?;
    Ok(Json(rate))
}
