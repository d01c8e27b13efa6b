//! Storage backends for the ledger.
//!
//! The ledger core defines the [`LedgerStore`](sarraf_core::LedgerStore)
//! port; this crate supplies the in-process implementation. Every
//! operation is atomic per document, matching the consistency the ledger
//! service is written against.

pub mod memory;

pub use memory::MemoryStore;
