//! Customer registration and profile maintenance.
//!
//! Balances enter through the opening amounts at registration and are
//! afterwards touched only by the transaction paths; profile edits never
//! reach the safes.

use chrono::Utc;
use sarraf_shared::CustomerId;
use tracing::info;

use super::error::LedgerError;
use super::service::LedgerService;
use super::types::{Customer, CustomerPatch, NewCustomer};

impl LedgerService {
    /// Registers a customer with both safes present from the start.
    pub async fn create_customer(&self, input: NewCustomer) -> Result<Customer, LedgerError> {
        let customer = self.store().insert_customer(Customer::new(input)).await?;
        info!(customer_id = %customer.id, name = %customer.name, "Customer created");
        Ok(customer)
    }

    /// Updates profile fields, leaving the safes untouched.
    pub async fn update_customer_profile(
        &self,
        id: CustomerId,
        patch: CustomerPatch,
    ) -> Result<Customer, LedgerError> {
        let _guard = self.lock_customer(id).await;
        let mut customer = self.load_customer(id).await?;

        if let Some(name) = patch.name {
            customer.name = name;
        }
        customer.email = patch.email.or(customer.email);
        customer.phone = patch.phone.or(customer.phone);
        customer.address = patch.address.or(customer.address);
        customer.avatar = patch.avatar.or(customer.avatar);
        customer.updated_at = Utc::now();

        self.store()
            .update_customer(customer)
            .await?
            .ok_or(LedgerError::CustomerNotFound(id))
    }

    /// Deletes a customer.
    ///
    /// Whether their transaction records go with them is the
    /// `cascade_delete_transactions` policy flag; the default orphans the
    /// records.
    pub async fn delete_customer(&self, id: CustomerId) -> Result<(), LedgerError> {
        let _guard = self.lock_customer(id).await;

        if !self.store().delete_customer(id).await? {
            return Err(LedgerError::CustomerNotFound(id));
        }
        if self.policy().cascade_delete_transactions {
            let removed = self.store().delete_customer_transactions(id).await?;
            info!(customer_id = %id, removed, "Cascade-deleted customer transactions");
        }
        info!(customer_id = %id, "Customer deleted");
        Ok(())
    }
}
