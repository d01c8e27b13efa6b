//! Error types for ledger operations.

use rust_decimal::Decimal;
use sarraf_shared::{Currency, CustomerId, TransactionId};
use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Unrecognized transaction type.
    #[error("Invalid transaction type: {0}")]
    InvalidKind(String),

    /// Amount must be positive.
    #[error("Transaction amount must be positive")]
    NonPositiveAmount,

    /// Exchange requires a target currency.
    #[error("Exchange requires a target currency")]
    MissingToCurrency,

    /// Exchange source and target currencies must differ.
    #[error("Exchange source and target currencies must be different")]
    SameCurrencyExchange,

    /// Exchange rates must be positive.
    #[error("Exchange rate must be positive")]
    NonPositiveRate,

    /// Malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    // ========== Funds Errors ==========
    /// The operation would drive a balance negative, where checked.
    #[error("Insufficient {currency} funds: {available} available, {requested} requested")]
    InsufficientFunds {
        /// The safe that would be overdrawn.
        currency: Currency,
        /// Balance before the operation.
        available: Decimal,
        /// Amount the operation needs.
        requested: Decimal,
    },

    // ========== Not-Found Errors ==========
    /// Customer not found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    // ========== Infrastructure ==========
    /// The ledger store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidKind(_) => "INVALID_TRANSACTION_TYPE",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::MissingToCurrency => "MISSING_TO_CURRENCY",
            Self::SameCurrencyExchange => "SAME_CURRENCY_EXCHANGE",
            Self::NonPositiveRate => "NON_POSITIVE_RATE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::Store(_) => "STORE_UNAVAILABLE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation and funds errors
            Self::InvalidKind(_)
            | Self::NonPositiveAmount
            | Self::MissingToCurrency
            | Self::SameCurrencyExchange
            | Self::NonPositiveRate
            | Self::Validation(_)
            | Self::InsufficientFunds { .. } => 400,

            // 404 Not Found
            Self::CustomerNotFound(_) | Self::TransactionNotFound(_) => 404,

            // 500 Internal Server Error - infrastructure
            Self::Store(_) => 500,
        }
    }
}
