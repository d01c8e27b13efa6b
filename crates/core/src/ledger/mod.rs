//! The two-currency ledger.
//!
//! This module implements the core ledger functionality:
//! - Customer safes and transaction records
//! - The balance engine (apply / reverse of a transaction's effect)
//! - Exchange rate handling and the asymmetric conversion rule
//! - The ledger service orchestrating create / edit / delete / transfer
//! - Error types for ledger operations

pub mod balance;
pub mod customers;
pub mod editor;
pub mod error;
pub mod rate;
pub mod service;
pub mod types;

#[cfg(test)]
mod balance_props;

pub use balance::Effect;
pub use error::LedgerError;
pub use rate::ExchangeRate;
pub use service::{LedgerService, TransferOutcome, TransferRequest};
pub use types::{
    Customer, CustomerPatch, NewCustomer, NewTransaction, Safes, Transaction, TransactionFilter,
    TransactionKind, TransactionUpdate,
};
