//! Read-only analysis and filtering views over the transaction history.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{NaiveDate, TimeZone, Utc};
use sarraf_core::{LedgerError, Transaction, TransactionFilter};
use sarraf_shared::Currency;
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiResult;

/// Creates the analysis routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analysis", get(filtered))
        .route("/analysis/chart-data", get(filtered))
        .route("/analysis/chart", get(chart))
}

/// Query parameters shared by the analysis views.
///
/// `currency` accepts the presentation codes `IQD`/`USD` as well as the
/// internal names; `both` (the frontend's default) disables the filter.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisQuery {
    /// Include transactions dated on or after this day.
    pub start_date: Option<NaiveDate>,
    /// Include transactions dated on or before this day.
    pub end_date: Option<NaiveDate>,
    /// Currency filter: `IQD`, `USD`, `dinar`, `dollar`, or `both`.
    pub currency: Option<String>,
    /// Case-insensitive substring match against the note.
    pub search_term: Option<String>,
    /// Transaction type filter; `all` disables it.
    pub filter_type: Option<String>,
}

impl AnalysisQuery {
    fn into_filter(self) -> Result<TransactionFilter, LedgerError> {
        let mut filter = TransactionFilter {
            start_date: self
                .start_date
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| Utc.from_utc_datetime(&dt)),
            end_date: self
                .end_date
                .and_then(|d| d.and_hms_opt(23, 59, 59))
                .map(|dt| Utc.from_utc_datetime(&dt)),
            note_contains: self.search_term.filter(|term| !term.is_empty()),
            ..TransactionFilter::default()
        };

        if let Some(currency) = self.currency.as_deref().filter(|c| *c != "both") {
            let parsed = currency
                .parse::<Currency>()
                .map_err(LedgerError::Validation)?;
            filter.from_currency = Some(parsed);
        }

        if let Some(kind) = self.filter_type.as_deref().filter(|k| *k != "all") {
            filter.kind = Some(kind.parse().map_err(LedgerError::InvalidKind)?);
        }

        Ok(filter)
    }
}

/// GET `/analysis` and `/analysis/chart-data` - Transactions filtered by
/// date range and currency.
async fn filtered(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let filter = AnalysisQuery {
        search_term: None,
        filter_type: None,
        ..query
    }
    .into_filter()?;
    let txs = state
        .store
        .list_transactions(&filter)
        .await
        .map_err(LedgerError::Store)?;
    Ok(Json(txs))
}

/// GET `/analysis/chart` - Additionally filters by note text and type.
async fn chart(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let filter = query.into_filter()?;
    let txs = state
        .store
        .list_transactions(&filter)
        .await
        .map_err(LedgerError::Store)?;
    Ok(Json(txs))
}
