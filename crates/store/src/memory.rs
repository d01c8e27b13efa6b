//! In-memory document store.
//!
//! Three collections behind `tokio` read-write locks: customers and
//! transactions keyed by id, plus the singleton exchange rate. Suitable as
//! the single-process production store and as the test backend.

use std::collections::HashMap;

use async_trait::async_trait;
use sarraf_core::{
    BackupData, Customer, ExchangeRate, LedgerStore, StoreError, Transaction, TransactionFilter,
};
use sarraf_shared::{CustomerId, TransactionId};
use tokio::sync::RwLock;

/// A process-local [`LedgerStore`].
#[derive(Default)]
pub struct MemoryStore {
    customers: RwLock<HashMap<CustomerId, Customer>>,
    transactions: RwLock<HashMap<TransactionId, Transaction>>,
    rate: RwLock<Option<ExchangeRate>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        Ok(self.customers.read().await.get(&id).cloned())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        let mut customers: Vec<Customer> =
            self.customers.read().await.values().cloned().collect();
        // Newest registrations first, id as a stable tiebreaker.
        customers.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(customers)
    }

    async fn insert_customer(&self, customer: Customer) -> Result<Customer, StoreError> {
        self.customers
            .write()
            .await
            .insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn update_customer(
        &self,
        customer: Customer,
    ) -> Result<Option<Customer>, StoreError> {
        let mut customers = self.customers.write().await;
        if !customers.contains_key(&customer.id) {
            return Ok(None);
        }
        customers.insert(customer.id, customer.clone());
        Ok(Some(customer))
    }

    async fn delete_customer(&self, id: CustomerId) -> Result<bool, StoreError> {
        Ok(self.customers.write().await.remove(&id).is_some())
    }

    async fn find_transaction(
        &self,
        id: TransactionId,
    ) -> Result<Option<Transaction>, StoreError> {
        Ok(self.transactions.read().await.get(&id).cloned())
    }

    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError> {
        let mut txs: Vec<Transaction> = self
            .transactions
            .read()
            .await
            .values()
            .filter(|tx| filter.matches(tx))
            .cloned()
            .collect();
        txs.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(txs)
    }

    async fn insert_transaction(&self, tx: Transaction) -> Result<Transaction, StoreError> {
        self.transactions.write().await.insert(tx.id, tx.clone());
        Ok(tx)
    }

    async fn update_transaction(
        &self,
        tx: Transaction,
    ) -> Result<Option<Transaction>, StoreError> {
        let mut txs = self.transactions.write().await;
        if !txs.contains_key(&tx.id) {
            return Ok(None);
        }
        txs.insert(tx.id, tx.clone());
        Ok(Some(tx))
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<bool, StoreError> {
        Ok(self.transactions.write().await.remove(&id).is_some())
    }

    async fn delete_customer_transactions(
        &self,
        id: CustomerId,
    ) -> Result<usize, StoreError> {
        let mut txs = self.transactions.write().await;
        let before = txs.len();
        txs.retain(|_, tx| tx.customer_id != id);
        Ok(before - txs.len())
    }

    async fn find_rate(&self) -> Result<Option<ExchangeRate>, StoreError> {
        Ok(*self.rate.read().await)
    }

    async fn put_rate(&self, rate: ExchangeRate) -> Result<ExchangeRate, StoreError> {
        *self.rate.write().await = Some(rate);
        Ok(rate)
    }

    async fn snapshot(&self) -> Result<BackupData, StoreError> {
        Ok(BackupData {
            customers: self.list_customers().await?,
            transactions: self.list_transactions(&TransactionFilter::default()).await?,
            exchange_rate: self.find_rate().await?,
        })
    }

    async fn restore(&self, data: BackupData) -> Result<(), StoreError> {
        // Take every lock before touching anything so readers never see a
        // half-replaced store.
        let mut customers = self.customers.write().await;
        let mut transactions = self.transactions.write().await;
        let mut rate = self.rate.write().await;

        *customers = data.customers.into_iter().map(|c| (c.id, c)).collect();
        *transactions = data.transactions.into_iter().map(|t| (t.id, t)).collect();
        *rate = data.exchange_rate;
        Ok(())
    }
}
