//! The ledger service: rate provider, transaction applier, and transfer
//! orchestration.
//!
//! The service exclusively owns the write path to customer balances and
//! transaction records. Every balance-mutating operation holds the owning
//! customer's lock for its whole read-modify-write cycle, closing the
//! lost-update window the per-document store leaves open.
//!
//! Write ordering within one operation is fixed: customer balances first,
//! transaction record second.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use sarraf_shared::config::LedgerConfig;
use sarraf_shared::{Currency, CustomerId, TransactionId};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::info;

use super::balance::Effect;
use super::error::LedgerError;
use super::rate::ExchangeRate;
use super::types::{Customer, NewTransaction, Transaction};
use crate::store::LedgerStore;

/// Request to move funds between two customers in one currency.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Customer to debit.
    pub from_customer_id: CustomerId,
    /// Customer to credit.
    pub to_customer_id: CustomerId,
    /// Amount to move.
    pub amount: Decimal,
    /// Currency of both legs.
    pub currency: Currency,
}

/// The two records a completed transfer leaves behind.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// The withdraw leg on the source customer.
    pub withdraw: Transaction,
    /// The deposit leg on the target customer.
    pub deposit: Transaction,
}

/// Orchestrates ledger operations over the store port.
pub struct LedgerService {
    store: Arc<dyn LedgerStore>,
    policy: LedgerConfig,
    locks: DashMap<CustomerId, Arc<Mutex<()>>>,
}

impl LedgerService {
    /// Creates a service over the given store with the given policy flags.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>, policy: LedgerConfig) -> Self {
        Self {
            store,
            policy,
            locks: DashMap::new(),
        }
    }

    pub(super) fn store(&self) -> &dyn LedgerStore {
        self.store.as_ref()
    }

    pub(super) const fn policy(&self) -> LedgerConfig {
        self.policy
    }

    /// Acquires the per-customer critical section.
    pub(super) async fn lock_customer(&self, id: CustomerId) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    pub(super) async fn load_customer(&self, id: CustomerId) -> Result<Customer, LedgerError> {
        self.store
            .find_customer(id)
            .await?
            .ok_or(LedgerError::CustomerNotFound(id))
    }

    /// Persists a customer's balances, treating a vanished record as
    /// not-found. Callers hold the customer lock.
    pub(super) async fn persist_balances(&self, customer: Customer) -> Result<(), LedgerError> {
        let id = customer.id;
        self.store
            .update_customer(customer)
            .await?
            .map(|_| ())
            .ok_or(LedgerError::CustomerNotFound(id))
    }

    // ========== Exchange Rate Provider ==========

    /// Returns the stored exchange rate, creating and persisting the
    /// default when none exists yet.
    pub async fn get_rate(&self) -> Result<ExchangeRate, LedgerError> {
        if let Some(rate) = self.store.find_rate().await? {
            return Ok(rate);
        }
        let rate = self.store.put_rate(ExchangeRate::default()).await?;
        info!(
            dinar_to_dollar = %rate.dinar_to_dollar,
            dollar_to_dinar = %rate.dollar_to_dinar,
            "Bootstrapped default exchange rate"
        );
        Ok(rate)
    }

    /// Creates or overwrites the singleton exchange rate.
    pub async fn set_rate(
        &self,
        dinar_to_dollar: Decimal,
        dollar_to_dinar: Decimal,
    ) -> Result<ExchangeRate, LedgerError> {
        if dinar_to_dollar <= Decimal::ZERO || dollar_to_dinar <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveRate);
        }
        let rate = self
            .store
            .put_rate(ExchangeRate::new(dinar_to_dollar, dollar_to_dinar))
            .await?;
        info!(
            dinar_to_dollar = %rate.dinar_to_dollar,
            dollar_to_dinar = %rate.dollar_to_dinar,
            "Exchange rate updated"
        );
        Ok(rate)
    }

    // ========== Transaction Applier ==========

    /// Applies a new transaction to its customer's balances and records it.
    ///
    /// Steps, in fixed order:
    /// 1. Validate the type/amount/currency combination.
    /// 2. Load the customer.
    /// 3. Load (or bootstrap) the exchange rate.
    /// 4. Compute the new balances.
    /// 5. Persist the balances.
    /// 6. Persist the transaction record.
    ///
    /// Overdraft is only rejected when `enforce_funds_on_create` is set;
    /// the historical default lets withdraw and exchange drive a balance
    /// negative.
    pub async fn create_transaction(
        &self,
        input: NewTransaction,
    ) -> Result<Transaction, LedgerError> {
        let effect = Effect::new(
            input.kind,
            input.amount,
            input.from_currency,
            input.to_currency,
        )?;

        let _guard = self.lock_customer(input.customer_id).await;
        let mut customer = self.load_customer(input.customer_id).await?;
        let rate = self.get_rate().await?;

        if self.policy.enforce_funds_on_create {
            if let Some((currency, available)) = effect.overdraw(&customer.safes) {
                return Err(LedgerError::InsufficientFunds {
                    currency,
                    available,
                    requested: effect.amount(),
                });
            }
        }

        effect.apply(&mut customer.safes, &rate);
        customer.updated_at = Utc::now();
        self.persist_balances(customer).await?;

        let tx = Transaction {
            id: TransactionId::new(),
            customer_id: input.customer_id,
            kind: input.kind,
            amount: input.amount,
            from_currency: input.from_currency,
            to_currency: input.to_currency,
            note: input.note,
            date: Utc::now(),
        };
        let tx = self.store.insert_transaction(tx).await?;

        info!(
            transaction_id = %tx.id,
            customer_id = %tx.customer_id,
            kind = %tx.kind,
            amount = %tx.amount,
            currency = %tx.from_currency,
            "Transaction created"
        );
        Ok(tx)
    }

    // ========== Transfer Orchestrator ==========

    /// Moves funds between two customers as a withdraw leg plus a deposit
    /// leg in the same currency.
    ///
    /// Unlike plain creation, the source balance check is always enforced.
    /// Both customer locks are taken in id order before any read, so two
    /// opposing transfers cannot deadlock. No cross-customer atomicity
    /// exists beyond that: each leg is its own balance-then-record write.
    pub async fn transfer(&self, req: TransferRequest) -> Result<TransferOutcome, LedgerError> {
        if req.amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount);
        }
        if req.from_customer_id == req.to_customer_id {
            return Err(LedgerError::Validation(
                "Cannot transfer between a customer's own safes; use an exchange".to_string(),
            ));
        }

        let (first, second) = if req.from_customer_id <= req.to_customer_id {
            (req.from_customer_id, req.to_customer_id)
        } else {
            (req.to_customer_id, req.from_customer_id)
        };
        let _guard_first = self.lock_customer(first).await;
        let _guard_second = self.lock_customer(second).await;

        let mut from_customer = self.load_customer(req.from_customer_id).await?;
        let mut to_customer = self.load_customer(req.to_customer_id).await?;

        let available = from_customer.safes.balance(req.currency);
        if available < req.amount {
            return Err(LedgerError::InsufficientFunds {
                currency: req.currency,
                available,
                requested: req.amount,
            });
        }

        // Withdraw leg.
        *from_customer.safes.balance_mut(req.currency) -= req.amount;
        from_customer.updated_at = Utc::now();
        self.persist_balances(from_customer).await?;
        let withdraw = self
            .store
            .insert_transaction(Transaction {
                id: TransactionId::new(),
                customer_id: req.from_customer_id,
                kind: super::types::TransactionKind::Withdraw,
                amount: req.amount,
                from_currency: req.currency,
                to_currency: None,
                note: None,
                date: Utc::now(),
            })
            .await?;

        // Deposit leg.
        *to_customer.safes.balance_mut(req.currency) += req.amount;
        to_customer.updated_at = Utc::now();
        self.persist_balances(to_customer).await?;
        let deposit = self
            .store
            .insert_transaction(Transaction {
                id: TransactionId::new(),
                customer_id: req.to_customer_id,
                kind: super::types::TransactionKind::Deposit,
                amount: req.amount,
                from_currency: req.currency,
                to_currency: None,
                note: None,
                date: Utc::now(),
            })
            .await?;

        info!(
            from = %req.from_customer_id,
            to = %req.to_customer_id,
            amount = %req.amount,
            currency = %req.currency,
            "Transfer completed"
        );
        Ok(TransferOutcome { withdraw, deposit })
    }
}
