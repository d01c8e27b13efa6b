//! Core business logic for Sarraf.
//!
//! This crate contains pure business logic with ZERO web or storage-engine
//! dependencies. All domain types, the balance engine, and the ledger
//! service live here; persistence is reached only through the
//! [`store::LedgerStore`] port.
//!
//! # Modules
//!
//! - `ledger` - Customers, transactions, balances, and the operations on them
//! - `store` - The document-store port the ledger talks to

pub mod ledger;
pub mod store;

pub use ledger::{
    Customer, CustomerPatch, Effect, ExchangeRate, LedgerError, LedgerService, NewCustomer,
    NewTransaction, Safes, Transaction, TransactionFilter, TransactionKind, TransactionUpdate,
    TransferOutcome, TransferRequest,
};
pub use store::{BackupData, LedgerStore, StoreError};
