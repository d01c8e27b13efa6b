//! The document-store port the ledger talks to.
//!
//! The store keeps three collections keyed by primary id: customers,
//! transactions, and the singleton exchange rate. Each operation is atomic
//! at the single-document level only; cross-document consistency is the
//! ledger service's job.

use async_trait::async_trait;
use sarraf_shared::{CustomerId, TransactionId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::{Customer, ExchangeRate, Transaction, TransactionFilter};

/// Infrastructure failure of the ledger store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not service the request.
    #[error("Ledger store unavailable: {0}")]
    Unavailable(String),
}

/// A full dump of the store, used for backup and destructive restore.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    /// All customer records.
    #[serde(default)]
    pub customers: Vec<Customer>,
    /// All transaction records.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// The exchange rate record, when one exists.
    #[serde(default)]
    pub exchange_rate: Option<ExchangeRate>,
}

/// Durable storage for customers, transactions, and the exchange rate.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Finds a customer by id.
    async fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>, StoreError>;

    /// Lists all customers.
    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError>;

    /// Inserts a new customer record.
    async fn insert_customer(&self, customer: Customer) -> Result<Customer, StoreError>;

    /// Replaces an existing customer record by id. Returns the stored
    /// record, or `None` when no record with that id exists.
    async fn update_customer(&self, customer: Customer)
        -> Result<Option<Customer>, StoreError>;

    /// Deletes a customer by id. Returns whether a record was removed.
    async fn delete_customer(&self, id: CustomerId) -> Result<bool, StoreError>;

    /// Finds a transaction by id.
    async fn find_transaction(
        &self,
        id: TransactionId,
    ) -> Result<Option<Transaction>, StoreError>;

    /// Lists transactions passing the filter, newest first.
    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Inserts a new transaction record.
    async fn insert_transaction(&self, tx: Transaction) -> Result<Transaction, StoreError>;

    /// Replaces an existing transaction record by id. Returns the stored
    /// record, or `None` when no record with that id exists.
    async fn update_transaction(
        &self,
        tx: Transaction,
    ) -> Result<Option<Transaction>, StoreError>;

    /// Deletes a transaction by id. Returns whether a record was removed.
    async fn delete_transaction(&self, id: TransactionId) -> Result<bool, StoreError>;

    /// Deletes every transaction owned by the customer. Returns the number
    /// of records removed.
    async fn delete_customer_transactions(
        &self,
        id: CustomerId,
    ) -> Result<usize, StoreError>;

    /// Returns the singleton exchange rate record, if present.
    async fn find_rate(&self) -> Result<Option<ExchangeRate>, StoreError>;

    /// Creates or overwrites the singleton exchange rate record.
    async fn put_rate(&self, rate: ExchangeRate) -> Result<ExchangeRate, StoreError>;

    /// Dumps the whole store.
    async fn snapshot(&self) -> Result<BackupData, StoreError>;

    /// Destructively replaces the whole store with the given dump.
    async fn restore(&self, data: BackupData) -> Result<(), StoreError>;
}
