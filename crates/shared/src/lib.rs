//! Shared types and configuration for Sarraf.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - The two-currency enum
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{Currency, CustomerId, TransactionId};
