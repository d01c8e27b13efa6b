//! Editing and deleting recorded transactions.
//!
//! Both operations work by reversing the original record's effect on the
//! customer's balances, using the rate current at edit time for exchange
//! legs. The edit path additionally guards the new transaction against
//! overdraft, rolling the reversal back when the check fails so the ledger
//! ends exactly where it started.

use chrono::Utc;
use sarraf_shared::TransactionId;
use tracing::info;

use super::balance::Effect;
use super::error::LedgerError;
use super::service::LedgerService;
use super::types::{Transaction, TransactionUpdate};

impl LedgerService {
    /// Replaces a recorded transaction's fields and re-derives the
    /// customer's balances.
    ///
    /// Steps:
    /// 1. Load the record and its owning customer.
    /// 2. Reverse the original effect and persist the balances.
    /// 3. If the new transaction would overdraw its source safe, re-apply
    ///    the original effect, persist, and fail: the failure path must
    ///    leave balances bit-equal to the pre-call state.
    /// 4. Otherwise apply the new effect and persist the balances.
    /// 5. Overwrite the record's fields.
    pub async fn update_transaction(
        &self,
        id: TransactionId,
        update: TransactionUpdate,
    ) -> Result<Transaction, LedgerError> {
        let new_effect = Effect::new(
            update.kind,
            update.amount,
            update.from_currency,
            update.to_currency,
        )?;

        // Peek at the record to learn the owning customer, then take the
        // lock and reload so a racing edit cannot slip between.
        let owner = self
            .store()
            .find_transaction(id)
            .await?
            .ok_or(LedgerError::TransactionNotFound(id))?
            .customer_id;
        let _guard = self.lock_customer(owner).await;

        let mut tx = self
            .store()
            .find_transaction(id)
            .await?
            .ok_or(LedgerError::TransactionNotFound(id))?;
        let mut customer = self.load_customer(tx.customer_id).await?;

        // Reversal and re-application both use the rate current right now,
        // not the rate the record was created under.
        let rate = self.get_rate().await?;
        let original_effect =
            Effect::new(tx.kind, tx.amount, tx.from_currency, tx.to_currency)?;

        original_effect.reverse(&mut customer.safes, &rate);
        self.persist_balances(customer.clone()).await?;

        if let Some((currency, available)) = new_effect.overdraw(&customer.safes) {
            // Undo the reversal; the ledger must end in its pre-edit state.
            original_effect.apply(&mut customer.safes, &rate);
            self.persist_balances(customer).await?;
            return Err(LedgerError::InsufficientFunds {
                currency,
                available,
                requested: new_effect.amount(),
            });
        }

        new_effect.apply(&mut customer.safes, &rate);
        customer.updated_at = Utc::now();
        self.persist_balances(customer).await?;

        tx.kind = update.kind;
        tx.amount = update.amount;
        tx.from_currency = update.from_currency;
        tx.to_currency = update.to_currency;
        tx.note = update.note;
        let tx = self
            .store()
            .update_transaction(tx)
            .await?
            .ok_or(LedgerError::TransactionNotFound(id))?;

        info!(
            transaction_id = %tx.id,
            customer_id = %tx.customer_id,
            kind = %tx.kind,
            amount = %tx.amount,
            "Transaction updated"
        );
        Ok(tx)
    }

    /// Removes a recorded transaction after reversing its balance effect.
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<(), LedgerError> {
        let owner = self
            .store()
            .find_transaction(id)
            .await?
            .ok_or(LedgerError::TransactionNotFound(id))?
            .customer_id;
        let _guard = self.lock_customer(owner).await;

        let tx = self
            .store()
            .find_transaction(id)
            .await?
            .ok_or(LedgerError::TransactionNotFound(id))?;
        let mut customer = self.load_customer(tx.customer_id).await?;

        let rate = self.get_rate().await?;
        let effect = Effect::new(tx.kind, tx.amount, tx.from_currency, tx.to_currency)?;

        effect.reverse(&mut customer.safes, &rate);
        customer.updated_at = Utc::now();
        self.persist_balances(customer).await?;

        self.store().delete_transaction(id).await?;

        info!(
            transaction_id = %id,
            customer_id = %tx.customer_id,
            "Transaction deleted"
        );
        Ok(())
    }
}
