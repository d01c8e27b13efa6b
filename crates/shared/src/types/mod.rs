//! Common type definitions.

pub mod currency;
pub mod id;

pub use currency::Currency;
pub use id::{CustomerId, TransactionId};
